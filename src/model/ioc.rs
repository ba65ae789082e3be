//! Core IOC data model shared between the extractor and the scraper.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of indicator of compromise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IocKind {
    IpAddress,
    Url,
    Domain,
    Hash,
    Filename,
    Asn,
}

impl fmt::Display for IocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IocKind::IpAddress => "ip_address",
            IocKind::Url => "url",
            IocKind::Domain => "domain",
            IocKind::Hash => "hash",
            IocKind::Filename => "filename",
            IocKind::Asn => "asn",
        };
        f.write_str(name)
    }
}

/// A single extracted indicator
///
/// `value` is the trimmed matched text, `context` the surrounding text
/// window it was found in, `confidence` a score in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: IocKind,
    pub value: String,
    pub context: String,
    pub confidence: f64,
}

/// Ordered list of candidates, unique on `(kind, value)`, first occurrence wins
pub type ExtractionResult = Vec<Candidate>;

/// Which representation of the response body was scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// HTML body reduced to its human-visible text
    HtmlVisible,
    /// Body scanned as-is (plain text, JSON, XML, ...)
    Raw,
}

/// Result of a single scrape invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScrapeOutcome {
    Success {
        candidates: ExtractionResult,
        /// Byte length of the untouched response body
        raw_length: usize,
        /// Byte length of the text that was actually scanned
        analyzed_length: usize,
        content_kind: ContentKind,
        status_code: u16,
    },
    Failure {
        error: String,
    },
}
