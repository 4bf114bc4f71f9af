//! End-to-end crawl for one company.
//!
//! Discovery failures abort the run. Exhibit and date failures are isolated to the
//! row they occur on: the row keeps its default values for that stage and a
//! [`StageFailure`](crate::StageFailure) is recorded, so the table always has one row
//! per discovered filing, in discovery order.

use super::crawler::Crawler;
use super::error::Result;
use super::filing::{BatchStatus, EnrichedFilingTable, Stage};
use super::traits::{
    DateOperations, DiscoveryOperations, ExhibitOperations, Fetch, PipelineOperations,
};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

impl<F: Fetch> Crawler<F> {
    async fn attach_exhibits(&self, table: &mut EnrichedFilingTable) {
        let links: Vec<(String, String)> = table
            .iter()
            .map(|row| (row.filing.txt_link.clone(), row.filing.doc_name.clone()))
            .collect();

        let lookups: Vec<_> = links
            .iter()
            .map(|(txt_link, doc_name)| self.resolve_exhibits(txt_link, doc_name))
            .collect();
        let results: Vec<_> = stream::iter(lookups)
            .buffered(self.concurrency())
            .collect()
            .await;

        for (row, result) in table.rows.iter_mut().zip(results) {
            match result {
                Ok(exhibits) => row.exhibits = exhibits,
                Err(e) => {
                    tracing::warn!("Exhibit resolution failed for {}: {}", row.filing.txt_link, e);
                    row.record_failure(Stage::Exhibits, e.to_string());
                }
            }
        }
    }

    async fn attach_dates(&self, table: &mut EnrichedFilingTable) {
        let links: Vec<String> = table.iter().map(|row| row.filing.txt_link.clone()).collect();

        let lookups: Vec<_> = links.iter().map(|link| self.extract_dates(link)).collect();
        let results: Vec<_> = stream::iter(lookups)
            .buffered(self.concurrency())
            .collect()
            .await;

        for (row, result) in table.rows.iter_mut().zip(results) {
            match result {
                Ok(dates) => row.dates = dates,
                Err(e) => {
                    tracing::warn!("Date extraction failed for {}: {}", row.filing.txt_link, e);
                    row.record_failure(Stage::Dates, e.to_string());
                }
            }
        }
    }
}

#[async_trait]
impl<F: Fetch> PipelineOperations for Crawler<F> {
    /// Discovers filings after the crawler's cutoff date, then attaches exhibits,
    /// item codes and dates to every row.
    ///
    /// # Errors
    ///
    /// Returns `EdgarError::Discovery` if the filing list cannot be retrieved. Later
    /// stages never fail the call; check [`EnrichedFilingTable::status`].
    async fn get_data(&self, cik: &str, ticker: &str) -> Result<EnrichedFilingTable> {
        let filings = self.discover(cik, self.after_date).await?;
        let mut table = EnrichedFilingTable::new(cik, ticker, filings);

        if table.is_empty() {
            tracing::info!("No filings for {} ({}) after {}", ticker, cik, self.after_date);
            return Ok(table);
        }

        tracing::info!("Resolving exhibits for {} filings of {}", table.len(), ticker);
        self.attach_exhibits(&mut table).await;

        tracing::info!("Extracting dates for {} filings of {}", table.len(), ticker);
        self.attach_dates(&mut table).await;

        if let BatchStatus::Partial { failed_rows } = table.status() {
            tracing::warn!(
                "{} of {} filings for {} are incomplete",
                failed_rows,
                table.len(),
                ticker
            );
        }

        Ok(table)
    }
}
