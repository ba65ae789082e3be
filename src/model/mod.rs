pub mod config;
mod ioc;

pub use config::ScraperConfig;
pub use ioc::{Candidate, ContentKind, ExtractionResult, IocKind, ScrapeOutcome};
