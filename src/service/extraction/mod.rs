//! IOC extraction engine
//!
//! Scans text with per-kind pattern tables, validates every match, scores
//! it against its surrounding context and deduplicates the results. The
//! extractor never fails: text without valid indicators simply yields an
//! empty result.

mod confidence;
mod validation;

use std::collections::HashSet;

use regex::Regex;

use crate::model::{Candidate, ExtractionResult, IocKind};

/// Characters of context captured on each side of a match
const CONTEXT_CHARS: usize = 100;

/// Multi-pattern IOC extractor
///
/// Holds only compiled pattern tables, so a single instance is safely
/// reusable across calls; `extract` is a pure function of its arguments.
pub struct IocExtractor {
    patterns: Vec<(IocKind, Vec<Regex>)>,
}

impl IocExtractor {
    pub fn new() -> Self {
        Self {
            patterns: vec![
                (
                    IocKind::IpAddress,
                    compile(&[
                        // IPv4 dotted quad
                        r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b",
                        // IPv6 full form
                        r"\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b",
                        // IPv6 compressed form
                        r"\b(?:[0-9a-fA-F]{1,4}:){1,7}:(?:[0-9a-fA-F]{1,4}){0,7}\b",
                    ]),
                ),
                (
                    IocKind::Domain,
                    compile(&[
                        r"\b(?:[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}\b",
                    ]),
                ),
                (
                    IocKind::Url,
                    compile(&[
                        r"https?://(?:[-\w.])+(?::[0-9]+)?(?:/[^?\s]*)?(?:\?[^#\s]*)?(?:#[^\s]*)?",
                        r"ftp://(?:[-\w.])+(?::[0-9]+)?(?:/[^\s]*)?",
                    ]),
                ),
                (
                    IocKind::Hash,
                    compile(&[
                        r"\b[a-fA-F0-9]{32}\b",  // MD5
                        r"\b[a-fA-F0-9]{40}\b",  // SHA1
                        r"\b[a-fA-F0-9]{64}\b",  // SHA256
                        r"\b[a-fA-F0-9]{128}\b", // SHA512
                    ]),
                ),
                (
                    IocKind::Filename,
                    compile(&[
                        r"\b[\w\-.]+\.(?:exe|dll|bat|cmd|scr|pif|com|jar|zip|rar|7z|tar|gz|doc|docx|xls|xlsx|pdf|js|vbs|ps1|sh)\b",
                    ]),
                ),
                (
                    IocKind::Asn,
                    compile(&[r"\bAS\d{1,10}\b", r"\bASN\s*:?\s*\d{1,10}\b"]),
                ),
            ],
        }
    }

    /// Extract all IOC candidates from `text`
    ///
    /// Every pattern of every kind is evaluated independently and the
    /// matches pooled; a candidate survives only if its kind-specific
    /// validation accepts it. The result is unique on `(kind, value)` with
    /// the first occurrence winning, in insertion order.
    pub fn extract(&self, text: &str, include_private_ips: bool) -> ExtractionResult {
        let mut seen: HashSet<(IocKind, String)> = HashSet::new();
        let mut candidates = Vec::new();

        for (kind, patterns) in &self.patterns {
            for pattern in patterns {
                for found in pattern.find_iter(text) {
                    let value = found.as_str().trim();
                    if value.is_empty() {
                        continue;
                    }

                    if !validation::validate(*kind, value, include_private_ips) {
                        continue;
                    }

                    let key = (*kind, value.to_string());
                    if seen.contains(&key) {
                        continue;
                    }

                    let context = context_window(text, found.start(), found.end());
                    let candidate = Candidate {
                        kind: *kind,
                        value: value.to_string(),
                        context: context.to_string(),
                        confidence: confidence::score(*kind, value, context),
                    };

                    seen.insert(key);
                    candidates.push(candidate);
                }
            }
        }

        tracing::debug!(
            candidates = candidates.len(),
            text_length = text.len(),
            "IOC extraction complete"
        );

        candidates
    }
}

impl Default for IocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| Regex::new(&format!("(?i){source}")).unwrap())
        .collect()
}

/// Symmetric window of up to `CONTEXT_CHARS` characters around a match,
/// clamped to the text bounds and snapped to char boundaries.
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    text[from..to].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_always_in_range() {
        let extractor = IocExtractor::new();
        let text = "malware at 203.0.113.7, hash d41d8cd98f00b204e9800998ecf8427e, \
                    sample.exe from http://bit.ly/x via evil-domain.biz on AS13335 \
                    trojan botnet phishing exploit breach apt actor campaign indicator ioc";

        let candidates = extractor.extract(text, false);
        assert!(!candidates.is_empty());
        for candidate in &candidates {
            assert!(
                (0.0..=1.0).contains(&candidate.confidence),
                "confidence out of range for {}: {}",
                candidate.value,
                candidate.confidence
            );
            assert!(!candidate.value.is_empty());
        }
    }

    #[test]
    fn test_empty_and_clean_text() {
        let extractor = IocExtractor::new();
        assert!(extractor.extract("", false).is_empty());
        assert!(extractor
            .extract("nothing interesting in here at all", false)
            .is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let extractor = IocExtractor::new();
        let hash = "a".repeat(64);
        // First mention sits in threat context, the repeat does not
        let text = format!("malware trojan sample {hash} was observed. Later, {hash} again.");

        let hashes: Vec<_> = extractor
            .extract(&text, false)
            .into_iter()
            .filter(|c| c.kind == IocKind::Hash)
            .collect();

        assert_eq!(hashes.len(), 1);
        // 0.6 base + 0.15 length + 2 keywords
        assert!((hashes[0].confidence - 0.85).abs() < 1e-9);
        assert!(hashes[0].context.contains("malware"));
    }

    #[test]
    fn test_private_ip_suppression() {
        let extractor = IocExtractor::new();
        let text = "10.0.0.5 is the internal host";

        let without = extractor.extract(text, false);
        assert!(without.iter().all(|c| c.kind != IocKind::IpAddress));

        let with = extractor.extract(text, true);
        let ip = with
            .iter()
            .find(|c| c.kind == IocKind::IpAddress)
            .expect("private IP should surface when requested");
        assert_eq!(ip.value, "10.0.0.5");
    }

    #[test]
    fn test_ipv6_forms() {
        let extractor = IocExtractor::new();
        let text = "beacons to 2001:0db8:85a3:0000:0000:8a2e:0370:7334 and fe80::1";

        let values: Vec<_> = extractor
            .extract(text, true)
            .into_iter()
            .filter(|c| c.kind == IocKind::IpAddress)
            .map(|c| c.value)
            .collect();

        assert!(values.contains(&"2001:0db8:85a3:0000:0000:8a2e:0370:7334".to_string()));
        assert!(values.contains(&"fe80::1".to_string()));
    }

    #[test]
    fn test_sha256_confidence_floor() {
        let extractor = IocExtractor::new();
        let hash = "d".repeat(64);
        let text = format!("the file {hash} was uploaded yesterday");

        let candidates = extractor.extract(&text, false);
        let found = candidates
            .iter()
            .find(|c| c.kind == IocKind::Hash)
            .expect("64-hex token should classify as a hash");
        assert_eq!(found.value, hash);
        assert!(found.confidence >= 0.75);
    }

    #[test]
    fn test_suspicious_filename() {
        let extractor = IocExtractor::new();
        let candidates = extractor.extract("download payload.exe now", false);

        let found = candidates
            .iter()
            .find(|c| c.kind == IocKind::Filename)
            .expect("executable filename should surface");
        assert_eq!(found.value, "payload.exe");
        assert!(found.confidence >= 0.8);
    }

    #[test]
    fn test_whitelisted_hosts_never_surface() {
        let extractor = IocExtractor::new();
        let text = "malware hosted on google.com and mail.google.com, \
                    see https://docs.google.com/report for details";

        let candidates = extractor.extract(text, false);
        assert!(candidates
            .iter()
            .all(|c| c.kind != IocKind::Domain && c.kind != IocKind::Url));
    }

    #[test]
    fn test_asn_extraction() {
        let extractor = IocExtractor::new();
        let text = "traffic from AS13335 and ASN: 64512, but AS0 is bogus";

        let values: Vec<_> = extractor
            .extract(text, false)
            .into_iter()
            .filter(|c| c.kind == IocKind::Asn)
            .map(|c| c.value)
            .collect();

        assert!(values.contains(&"AS13335".to_string()));
        assert!(values.iter().any(|v| v.contains("64512")));
        assert!(!values.contains(&"AS0".to_string()));
    }

    #[test]
    fn test_context_window_is_clamped_and_trimmed() {
        let extractor = IocExtractor::new();
        let padding = "x".repeat(300);
        let text = format!("{padding} 203.0.113.7 {padding}");

        let candidates = extractor.extract(&text, false);
        let ip = candidates
            .iter()
            .find(|c| c.kind == IocKind::IpAddress)
            .expect("public IP should surface");

        // 100 chars each side plus the match and separators
        assert!(ip.context.chars().count() <= 2 * CONTEXT_CHARS + ip.value.len() + 2);
        assert!(ip.context.contains("203.0.113.7"));
    }

    #[test]
    fn test_context_window_respects_char_boundaries() {
        let extractor = IocExtractor::new();
        // Multibyte padding right up against the match span
        let padding = "é".repeat(150);
        let text = format!("{padding} 203.0.113.7 {padding}");

        let candidates = extractor.extract(&text, false);
        assert!(candidates.iter().any(|c| c.value == "203.0.113.7"));
    }

    #[test]
    fn test_url_with_port_path_and_query() {
        let extractor = IocExtractor::new();
        let text = "payload served from http://evil-domain.biz:8080/drop?id=7#top today";

        let url = extractor
            .extract(text, false)
            .into_iter()
            .find(|c| c.kind == IocKind::Url)
            .expect("ftp/http URLs should surface");
        assert_eq!(url.value, "http://evil-domain.biz:8080/drop?id=7#top");
    }
}
