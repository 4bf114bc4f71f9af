//! Paginated discovery of a company's filings through the EDGAR browse endpoint.
//!
//! Each page is requested with `output=xml` and the offset advanced by the number
//! of raw entries the page contained. Filtering by date and link type happens after
//! the page is counted, so a page whose entries are all filtered out does not end
//! pagination; only a page with no entries at all does.

use super::crawler::Crawler;
use super::error::{EdgarError, Result};
use super::filing::Filing;
use super::parsing::browse::{FilingListPage, parse_filing_list};
use super::traits::{DiscoveryOperations, Fetch};
use async_trait::async_trait;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Index links on the browse endpoint end in `.htm`; the index page itself is
/// served as `.html`.
fn index_link(href: &str) -> Option<String> {
    (href.rsplit('.').next() == Some("htm")).then(|| format!("{href}l"))
}

/// Keeps entries dated strictly after `after_date` whose link is an `.htm` index.
pub(crate) fn filter_page(
    page: &FilingListPage,
    after_date: NaiveDate,
) -> Result<Vec<(String, NaiveDate)>> {
    let mut kept = Vec::new();

    for (href, date) in page.entries() {
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)?;
        if date <= after_date {
            continue;
        }
        if let Some(link) = index_link(href) {
            kept.push((link, date));
        }
    }

    Ok(kept)
}

impl<F: Fetch> Crawler<F> {
    fn browse_page_url(&self, cik: &str, start: usize) -> Result<String> {
        let params = self.discovery.to_query_params(cik, start);
        let query_string = serde_urlencoded::to_string(&params)
            .map_err(|e| EdgarError::InvalidResponse(e.to_string()))?;

        Ok(format!("{}?{}", self.config.browse_url, query_string))
    }

    async fn discover_pages(&self, cik: &str, after_date: NaiveDate) -> Result<Vec<Filing>> {
        let mut filings = Vec::new();
        let mut start = 0;
        let mut pages = 0;

        loop {
            if let Some(max) = self.discovery.max_pages {
                if pages >= max {
                    tracing::debug!("Stopping discovery for CIK {} after {} pages", cik, pages);
                    break;
                }
            }

            let url = self.browse_page_url(cik, start)?;
            let content = self.fetcher.fetch(&url).await?;
            let page = parse_filing_list(&content)?;
            pages += 1;

            let raw_len = page.raw_len();
            if raw_len == 0 {
                break;
            }

            let kept = filter_page(&page, after_date)?;
            tracing::debug!(
                "CIK {} page at offset {}: {} entries, {} kept",
                cik,
                start,
                raw_len,
                kept.len()
            );

            filings.extend(
                kept.into_iter()
                    .map(|(link, date)| Filing::from_index_link(cik, &link, date)),
            );
            start += raw_len;
        }

        Ok(filings)
    }
}

#[async_trait]
impl<F: Fetch> DiscoveryOperations for Crawler<F> {
    /// Pages through the company's filing list until the registry returns an empty
    /// page.
    ///
    /// # Errors
    ///
    /// Any transport, XML or date failure aborts discovery for the company and is
    /// returned as `EdgarError::Discovery`; partial results are discarded.
    async fn discover(&self, cik: &str, after_date: NaiveDate) -> Result<Vec<Filing>> {
        match self.discover_pages(cik, after_date).await {
            Ok(filings) => {
                tracing::info!(
                    "Discovered {} filings for CIK {} after {}",
                    filings.len(),
                    cik,
                    after_date
                );
                Ok(filings)
            }
            Err(e) => {
                tracing::error!("Filing discovery failed for CIK {}: {}", cik, e);
                Err(EdgarError::Discovery {
                    cik: cik.to_string(),
                    source: Box::new(e),
                })
            }
        }
    }
}
