//! IOC scraping core
//!
//! Scans text retrieved from the web for indicators of compromise (IP
//! addresses, URLs, domains, file hashes, suspicious filenames and
//! autonomous-system numbers), scoring each candidate and suppressing
//! known false positives.
//!
//! Two entry points:
//! - [`IocExtractor::extract`] scans arbitrary text directly.
//! - [`WebScraper::scrape`] fetches a URL, reduces HTML bodies to their
//!   human-visible text and runs extraction over the result.
//!
//! Persistence and the REST surface live with the callers; this crate
//! owns only extraction, reduction and the single-fetch orchestration.

pub mod model;
pub mod service;

pub use model::{Candidate, ContentKind, ExtractionResult, IocKind, ScrapeOutcome, ScraperConfig};
pub use service::{IocExtractor, WebScraper};
