//! Trait definitions organizing crawler operations by pipeline stage.
//!
//! [`Fetch`] is the transport seam: the crawler only ever asks for the body of a
//! URL, so the rate-limited [`Edgar`](crate::Edgar) client and in-memory test
//! doubles are interchangeable. The remaining traits group the stages of the
//! 8-K pipeline, each implemented by [`Crawler`](crate::Crawler) for any fetcher.

use super::error::Result;
use super::filing::{DateFields, EnrichedFilingTable, ExhibitSet, Filing};
#[cfg(feature = "text")]
use super::text::ExhibitText;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Retrieves the body of a URL as text.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Paginated discovery of a company's filings.
#[async_trait]
pub trait DiscoveryOperations {
    /// Lists filings for `cik` dated strictly after `after_date`, newest first as
    /// returned by the registry.
    async fn discover(&self, cik: &str, after_date: NaiveDate) -> Result<Vec<Filing>>;
}

/// Exhibit and item code resolution from a filing's index page.
#[async_trait]
pub trait ExhibitOperations {
    /// Resolves exhibit document URLs and item codes for one filing.
    async fn resolve_exhibits(&self, txt_link: &str, doc_name: &str) -> Result<ExhibitSet>;
}

/// Acceptance and period-of-report dates from a filing's index page.
#[async_trait]
pub trait DateOperations {
    /// Reads the acceptance date and period of report for one filing.
    async fn extract_dates(&self, txt_link: &str) -> Result<DateFields>;
}

/// Plain text of exhibit documents.
#[cfg(feature = "text")]
#[async_trait]
pub trait TextOperations {
    /// Fetches and cleans every exhibit in order. Returns `None` for an empty list.
    async fn fetch_exhibit_text(&self, urls: &[String]) -> Option<ExhibitText>;
}

/// The full discover → exhibits → dates pipeline for one company.
#[async_trait]
pub trait PipelineOperations {
    async fn get_data(&self, cik: &str, ticker: &str) -> Result<EnrichedFilingTable>;
}
