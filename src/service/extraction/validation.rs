//! Per-kind validation and false-positive suppression
//!
//! A match that fails validation is silently dropped from the results;
//! rejection is expected filtering, not an error.

use std::net::IpAddr;

use crate::model::IocKind;

/// Domains that are overwhelmingly false positives in scraped content:
/// example/test domains, major tech companies, CDNs and shared
/// infrastructure, social media, certificate authorities and standards
/// bodies. Subdomains of these are rejected too.
const DOMAIN_WHITELIST: &[&str] = &[
    // Generic/example domains
    "example.com",
    "localhost",
    "example.org",
    "example.net",
    "test.com",
    // Major tech companies
    "microsoft.com",
    "google.com",
    "github.com",
    "stackoverflow.com",
    "apple.com",
    "amazon.com",
    "aws.amazon.com",
    "cloudfront.net",
    "azurewebsites.net",
    "azure.com",
    "office.com",
    "live.com",
    "outlook.com",
    "hotmail.com",
    "gmail.com",
    "yahoo.com",
    // CDNs and common infrastructure
    "cloudflare.com",
    "fastly.com",
    "akamai.com",
    "jquery.com",
    "cdnjs.cloudflare.com",
    "bootstrapcdn.com",
    "maxcdn.bootstrapcdn.com",
    "fonts.googleapis.com",
    "fonts.gstatic.com",
    "ajax.googleapis.com",
    "code.jquery.com",
    "unpkg.com",
    "jsdelivr.net",
    // Social media
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "youtube.com",
    "instagram.com",
    "tiktok.com",
    "reddit.com",
    // Certificate authorities and security vendors
    "digicert.com",
    "letsencrypt.org",
    "sectigo.com",
    "globalsign.com",
    "symantec.com",
    "verisign.com",
    "godaddy.com",
    // Standards bodies
    "w3.org",
    "mozilla.org",
    "ietf.org",
    "rfc-editor.org",
];

/// Hostname prefixes used by CDNs and asset pipelines
const CDN_PREFIXES: &[&str] = &[
    "static.", "assets.", "cdn.", "img.", "images.", "media.", "css.", "js.", "fonts.", "api.",
    "www.gstatic.com",
];

/// Filenames too ubiquitous to be meaningful indicators
const GENERIC_FILENAMES: &[&str] = &[
    "index.html",
    "index.htm",
    "main.js",
    "app.js",
    "jquery.js",
    "bootstrap.css",
    "style.css",
    "main.css",
    "app.css",
    "favicon.ico",
    "robots.txt",
    "sitemap.xml",
    "manifest.json",
];

/// Largest valid autonomous system number (32-bit ASN space)
const MAX_ASN: u64 = 4_294_967_295;

/// Validate a matched value for its kind
pub fn validate(kind: IocKind, value: &str, include_private_ips: bool) -> bool {
    match kind {
        IocKind::IpAddress => validate_ip(value, include_private_ips),
        IocKind::Domain => validate_domain(value),
        IocKind::Url => validate_url(value),
        IocKind::Hash => !value.is_empty() && value.chars().all(|c| c.is_ascii_hexdigit()),
        IocKind::Filename => validate_filename(value),
        IocKind::Asn => validate_asn(value),
    }
}

/// RFC 1918 ranges plus loopback
pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let octets = v4.octets();
            octets[0] == 10
                || (octets[0] == 172 && (16..=31).contains(&octets[1]))
                || (octets[0] == 192 && octets[1] == 168)
                || octets[0] == 127
        }
        IpAddr::V6(_) => false,
    }
}

fn validate_ip(value: &str, include_private_ips: bool) -> bool {
    let ip: IpAddr = match value.parse() {
        Ok(ip) => ip,
        Err(_) => return false,
    };

    include_private_ips || !is_private_ip(&ip)
}

/// Whitelist check shared by domains and URL hosts: exact match or
/// subdomain of a whitelisted entry.
fn is_whitelisted_host(host: &str) -> bool {
    DOMAIN_WHITELIST
        .iter()
        .any(|entry| host == *entry || host.ends_with(&format!(".{entry}")))
}

fn validate_domain(value: &str) -> bool {
    let lower = value.to_lowercase();

    if is_whitelisted_host(&lower) {
        return false;
    }

    // Must have at least one dot and a plausible TLD
    if !lower.contains('.') {
        return false;
    }
    let tld = lower.rsplit('.').next().unwrap_or("");
    if tld.len() < 2 {
        return false;
    }

    !CDN_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

fn validate_url(value: &str) -> bool {
    let parsed = match url::Url::parse(value) {
        Ok(u) => u,
        Err(_) => return false,
    };

    // Host check mirrors the domain whitelist; the parser already strips
    // the port from host_str.
    let host = match parsed.host_str() {
        Some(h) => h.to_lowercase(),
        None => return false,
    };

    !is_whitelisted_host(&host)
}

fn validate_filename(value: &str) -> bool {
    if value.is_empty() || !value.contains('.') {
        return false;
    }

    let lower = value.to_lowercase();
    !GENERIC_FILENAMES.iter().any(|generic| lower == *generic)
}

fn validate_asn(value: &str) -> bool {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u64>() {
        Ok(asn) => (1..=MAX_ASN).contains(&asn),
        Err(_) => false,
    }
}
