pub mod extraction;
pub mod scrape;
pub mod visible_text;

pub use extraction::IocExtractor;
pub use scrape::{ScrapeError, WebScraper};
pub use visible_text::reduce_visible_text;
