//! Best-effort plain text of a filing's exhibits.
//!
//! Exhibits are fetched one URL at a time (or `concurrency` at a time, re-ordered
//! afterwards). A URL that cannot be fetched is skipped and reported in
//! [`ExhibitText::skipped`]; after a transport-level failure the fetcher pauses for
//! `connection_backoff` before moving on. Every URL is followed by
//! `politeness_delay` regardless of outcome.

use super::crawler::Crawler;
use super::error::EdgarError;
use super::parsing::document::exhibit_text;
use super::traits::{Fetch, TextOperations};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tokio::time::sleep;

/// Concatenated exhibit text of one filing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExhibitText {
    pub text: String,
    /// URLs whose text is missing from `text`
    pub skipped: Vec<String>,
}

impl ExhibitText {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl<F: Fetch> Crawler<F> {
    async fn fetch_one_exhibit(&self, url: &str) -> Result<String, EdgarError> {
        let outcome = match self.fetcher.fetch(url).await {
            Ok(html) => Ok(exhibit_text(&html)),
            Err(e) => {
                tracing::warn!("Skipping exhibit {}: {}", url, e);
                if e.is_transport() {
                    sleep(self.config.connection_backoff).await;
                }
                Err(e)
            }
        };

        sleep(self.config.politeness_delay).await;
        outcome
    }
}

#[async_trait]
impl<F: Fetch> TextOperations for Crawler<F> {
    async fn fetch_exhibit_text(&self, urls: &[String]) -> Option<ExhibitText> {
        if urls.is_empty() {
            return None;
        }

        let fetches: Vec<_> = urls.iter().map(|url| self.fetch_one_exhibit(url)).collect();
        let outcomes: Vec<_> = stream::iter(fetches)
            .buffered(self.concurrency())
            .collect()
            .await;

        let mut parts = Vec::with_capacity(urls.len());
        let mut skipped = Vec::new();
        for (url, outcome) in urls.iter().zip(outcomes) {
            match outcome {
                Ok(text) if !text.is_empty() => parts.push(text),
                Ok(_) => {}
                Err(_) => skipped.push(url.clone()),
            }
        }

        Some(ExhibitText {
            text: parts.join(" "),
            skipped,
        })
    }
}
