//! Scrape orchestration: one fetch, content-type dispatch, result packaging
//!
//! Transport failures, HTTP error statuses and anything escaping the
//! analysis pipeline all fold into `ScrapeOutcome::Failure`; nothing
//! propagates past `scrape` as a panic or error.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::model::{ContentKind, ScrapeOutcome, ScraperConfig};
use crate::service::extraction::IocExtractor;
use crate::service::visible_text::reduce_visible_text;

/// Transport-level failures, surfaced to callers as `Failure { error }`
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Fetches a single URL and extracts IOC candidates from its content
///
/// Holds no cross-call state beyond the HTTP client and the immutable
/// pattern tables, so one instance is safely reentrant; callers wanting
/// parallel scrapes run independent invocations concurrently. No retries
/// are performed here.
pub struct WebScraper {
    client: Client,
    extractor: Arc<IocExtractor>,
}

impl WebScraper {
    pub fn new(config: &ScraperConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            extractor: Arc::new(IocExtractor::new()),
        }
    }

    /// Scrape a URL and extract IOC candidates from its visible content
    ///
    /// HTML bodies are reduced to visible text first; anything else (plain
    /// text, JSON, XML, ...) is scanned as-is.
    pub async fn scrape(&self, url: &str, include_private_ips: bool) -> ScrapeOutcome {
        match self.fetch_and_analyze(url, include_private_ips).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Scrape failed");
                ScrapeOutcome::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn fetch_and_analyze(
        &self,
        url: &str,
        include_private_ips: bool,
    ) -> Result<ScrapeOutcome, ScrapeError> {
        tracing::debug!(url = %url, "Fetching page for IOC extraction");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status,
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let raw_content = response.text().await?;
        let raw_length = raw_content.len();
        let is_html = content_type.contains("html");

        // Reduction and extraction are CPU-bound; running them on a
        // blocking task keeps the executor responsive and turns a panic
        // into a JoinError instead of unwinding into the caller.
        let extractor = Arc::clone(&self.extractor);
        let analysis = tokio::task::spawn_blocking(move || {
            let (analyzed, content_kind) = if is_html {
                (reduce_visible_text(&raw_content), ContentKind::HtmlVisible)
            } else {
                (raw_content, ContentKind::Raw)
            };

            let candidates = extractor.extract(&analyzed, include_private_ips);
            (candidates, analyzed.len(), content_kind)
        })
        .await;

        match analysis {
            Ok((candidates, analyzed_length, content_kind)) => {
                tracing::debug!(
                    url = %url,
                    candidates = candidates.len(),
                    raw_length = raw_length,
                    analyzed_length = analyzed_length,
                    content_kind = ?content_kind,
                    "Scrape complete"
                );

                Ok(ScrapeOutcome::Success {
                    candidates,
                    raw_length,
                    analyzed_length,
                    content_kind,
                    status_code: status.as_u16(),
                })
            }
            Err(e) => Ok(ScrapeOutcome::Failure {
                error: format!("Unexpected error: {e}"),
            }),
        }
    }
}

impl Default for WebScraper {
    fn default() -> Self {
        Self::new(&ScraperConfig::default())
    }
}
