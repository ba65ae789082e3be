//! Confidence scoring for extracted candidates
//!
//! Deterministic function of the candidate kind, its value and the text
//! window it was found in. Scores start from a base and gain bonuses for
//! threat-flavored context and kind-specific traits, clamped to 1.0.

use std::net::IpAddr;

use crate::model::IocKind;

use super::validation::is_private_ip;

/// Base score for a validated match in visible content
const BASE_CONFIDENCE: f64 = 0.6;

/// Bonus per distinct threat keyword found in the context window
const KEYWORD_BONUS: f64 = 0.05;

/// Cap on the total keyword bonus
const KEYWORD_BONUS_CAP: f64 = 0.3;

/// Context terms that raise confidence, counted once each per candidate
const THREAT_KEYWORDS: &[&str] = &[
    "malware",
    "threat",
    "malicious",
    "suspicious",
    "infected",
    "virus",
    "trojan",
    "backdoor",
    "c2",
    "command",
    "control",
    "botnet",
    "phishing",
    "attack",
    "exploit",
    "vulnerability",
    "breach",
    "compromise",
    "incident",
    "indicator",
    "ioc",
    "artifact",
    "campaign",
    "apt",
    "actor",
];

/// Extensions typical of droppers and loaders
const SUSPICIOUS_EXTENSIONS: &[&str] = &[".exe", ".scr", ".bat", ".cmd", ".pif", ".com", ".dll"];

/// URL fragments associated with link shorteners and redirectors
const SHORTENER_MARKERS: &[&str] = &["bit.ly", "tinyurl", "shortened", "redirect"];

/// Score a validated candidate
pub fn score(kind: IocKind, value: &str, context: &str) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    let context_lower = context.to_lowercase();
    let keyword_hits = THREAT_KEYWORDS
        .iter()
        .filter(|keyword| context_lower.contains(*keyword))
        .count();
    confidence += KEYWORD_BONUS_CAP.min(keyword_hits as f64 * KEYWORD_BONUS);

    let value_lower = value.to_lowercase();
    match kind {
        IocKind::Hash => {
            // SHA256 is the most common shape for published malware hashes
            if value.len() == 64 {
                confidence += 0.15;
            } else if value.len() == 32 {
                confidence += 0.1;
            }
        }
        IocKind::Filename => {
            if SUSPICIOUS_EXTENSIONS
                .iter()
                .any(|ext| value_lower.ends_with(ext))
            {
                confidence += 0.2;
            }
        }
        IocKind::IpAddress => {
            // Routable addresses in visible content are more suspicious
            if let Ok(ip) = value.parse::<IpAddr>() {
                if !is_private_ip(&ip) {
                    confidence += 0.1;
                }
            }
        }
        IocKind::Url => {
            if SHORTENER_MARKERS
                .iter()
                .any(|marker| value_lower.contains(marker))
            {
                confidence += 0.1;
            }
        }
        IocKind::Domain | IocKind::Asn => {}
    }

    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn test_base_score_without_keywords() {
        assert!(approx(score(IocKind::Domain, "evil-domain.biz", "plain text"), 0.6));
    }

    #[test]
    fn test_keyword_bonus_is_capped() {
        // Seven distinct keywords would add 0.35 uncapped
        let context = "malware trojan botnet phishing exploit breach apt";
        assert!(approx(score(IocKind::Domain, "evil-domain.biz", context), 0.9));
    }

    #[test]
    fn test_hash_length_bonuses() {
        let sha256 = "a".repeat(64);
        let md5 = "a".repeat(32);
        let sha1 = "a".repeat(40);
        assert!(approx(score(IocKind::Hash, &sha256, ""), 0.75));
        assert!(approx(score(IocKind::Hash, &md5, ""), 0.7));
        assert!(approx(score(IocKind::Hash, &sha1, ""), 0.6));
    }

    #[test]
    fn test_score_clamped_to_one() {
        let sha256 = "a".repeat(64);
        let context = "malware trojan botnet phishing exploit breach apt actor";
        assert!(approx(score(IocKind::Hash, &sha256, context), 1.0));
    }

    #[test]
    fn test_suspicious_filename_extension() {
        assert!(approx(score(IocKind::Filename, "payload.exe", ""), 0.8));
        assert!(approx(score(IocKind::Filename, "Dropper.DLL", ""), 0.8));
        assert!(approx(score(IocKind::Filename, "report.pdf", ""), 0.6));
    }

    #[test]
    fn test_public_ip_bonus() {
        assert!(approx(score(IocKind::IpAddress, "8.8.8.8", ""), 0.7));
        assert!(approx(score(IocKind::IpAddress, "10.0.0.5", ""), 0.6));
    }

    #[test]
    fn test_shortener_url_bonus() {
        assert!(approx(score(IocKind::Url, "http://bit.ly/abc", ""), 0.7));
        assert!(approx(score(IocKind::Url, "http://evil-domain.biz/x", ""), 0.6));
    }
}
