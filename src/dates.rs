use super::crawler::Crawler;
use super::error::Result;
use super::filing::{DateFields, index_url};
use super::parsing::document::page_text;
use super::traits::{DateOperations, Fetch};
use async_trait::async_trait;
use scraper::Html;

impl<F: Fetch> Crawler<F> {
    /// Applies the configured extractors to an already-fetched index page.
    pub fn dates_from_page(&self, html: &str) -> DateFields {
        let text = page_text(&Html::parse_document(html));

        DateFields {
            accepted_date: self.accepted.extract(&text),
            period_of_report: self.period_of_report.extract(&text),
        }
    }
}

#[async_trait]
impl<F: Fetch> DateOperations for Crawler<F> {
    /// Fetches the filing's index page and reads the acceptance and
    /// period-of-report dates. A label missing from the page yields `None`; only a
    /// failed fetch is an error.
    async fn extract_dates(&self, txt_link: &str) -> Result<DateFields> {
        let url = index_url(txt_link);
        let html = self.fetcher.fetch(&url).await?;
        Ok(self.dates_from_page(&html))
    }
}
