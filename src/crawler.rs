use chrono::NaiveDate;

use super::config::CrawlerConfig;
use super::options::DiscoveryOptions;
use super::parsing::fields::{FieldExtractor, KeywordOffset};
use super::traits::Fetch;

/// Drives the 8-K pipeline against any [`Fetch`] implementation.
///
/// The stages are split across the operation traits
/// ([`DiscoveryOperations`](crate::DiscoveryOperations),
/// [`ExhibitOperations`](crate::ExhibitOperations),
/// [`DateOperations`](crate::DateOperations),
/// [`PipelineOperations`](crate::PipelineOperations) and, with the `text`
/// feature, [`TextOperations`](crate::TextOperations)).
///
/// # Examples
///
/// ```ignore
/// use chrono::NaiveDate;
/// use exhibitkit::{Crawler, Edgar, PipelineOperations};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let edgar = Edgar::new("MyApp contact@example.com")?;
///     let crawler = Crawler::new(edgar, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
///
///     let table = crawler.get_data("320193", "AAPL").await?;
///     for row in &table {
///         println!("{} {:?}", row.filing.txt_link, row.exhibits.item_no);
///     }
///     Ok(())
/// }
/// ```
pub struct Crawler<F> {
    pub(crate) fetcher: F,
    pub(crate) after_date: NaiveDate,
    pub(crate) config: CrawlerConfig,
    pub(crate) discovery: DiscoveryOptions,
    pub(crate) accepted: Box<dyn FieldExtractor>,
    pub(crate) period_of_report: Box<dyn FieldExtractor>,
}

impl<F: Fetch> Crawler<F> {
    pub fn new(fetcher: F, after_date: NaiveDate) -> Self {
        Self::with_config(fetcher, after_date, CrawlerConfig::default())
    }

    pub fn with_config(fetcher: F, after_date: NaiveDate, config: CrawlerConfig) -> Self {
        Self {
            fetcher,
            after_date,
            config,
            discovery: DiscoveryOptions::default(),
            accepted: Box::new(KeywordOffset::accepted()),
            period_of_report: Box::new(KeywordOffset::period_of_report()),
        }
    }

    pub fn with_discovery_options(mut self, options: DiscoveryOptions) -> Self {
        self.discovery = options;
        self
    }

    /// Replaces the acceptance date and period-of-report extractors.
    pub fn with_date_extractors(
        mut self,
        accepted: impl FieldExtractor + 'static,
        period_of_report: impl FieldExtractor + 'static,
    ) -> Self {
        self.accepted = Box::new(accepted);
        self.period_of_report = Box::new(period_of_report);
        self
    }

    /// Cutoff used by later [`get_data`](crate::PipelineOperations::get_data) calls.
    pub fn set_after_date(&mut self, after_date: NaiveDate) {
        self.after_date = after_date;
    }

    pub fn after_date(&self) -> NaiveDate {
        self.after_date
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub(crate) fn concurrency(&self) -> usize {
        self.config.concurrency.max(1)
    }
}
