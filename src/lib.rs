//! # ExhibitKit - 8-K filing discovery and exhibit resolution for SEC EDGAR
//!
//! ExhibitKit crawls a company's 8-K filings on EDGAR and builds one table row per
//! filing, enriched with the filing's exhibit URLs, item codes, acceptance date and
//! period of report.
//!
//! ## Features
//!
//! - **Rate-limited HTTP client** - Complies with SEC.gov fair access rules
//! - **Filing discovery** - Pages through the company browse endpoint with a date cutoff
//! - **Exhibit resolution** - Reads exhibit documents and item codes from the filing index
//! - **Date extraction** - Pluggable extractors for the acceptance and report dates
//! - **Exhibit text** (`text` feature) - Normalized plain text of exhibit documents
//!
//! ## Requirements
//!
//! ExhibitKit is async-first and needs an async runtime such as
//! [tokio](https://tokio.rs).
//!
//! ## Basic Usage
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use exhibitkit::{Crawler, Edgar, PipelineOperations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SEC.gov requires a user agent with contact details
//!     let edgar = Edgar::new("YourAppName contact@example.com")?;
//!     let crawler = Crawler::new(edgar, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
//!
//!     let table = crawler.get_data("320193", "AAPL").await?;
//!     for row in &table {
//!         println!("{} {:?}", row.filing.doc_name, row.exhibits.exhibit_link);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod crawler;
mod dates;
mod discovery;
mod error;
mod exhibits;
mod filing;
mod options;
pub mod parsing;
mod pipeline;
mod traits;

#[cfg(feature = "text")]
mod text;

// Transport
pub use config::{CrawlerConfig, EdgarConfig};
pub use core::Edgar;
pub use error::{EdgarError, Result};

// Pipeline
pub use crawler::Crawler;
pub use filing::{
    BatchStatus, COLUMNS, DateFields, EnrichedFiling, EnrichedFilingTable, ExhibitSet, Filing,
    Stage, StageFailure, exhibit_url, index_url,
};
pub use options::DiscoveryOptions;
pub use parsing::fields::{FieldExtractor, KeywordOffset};

pub use traits::{DateOperations, DiscoveryOperations, ExhibitOperations, Fetch, PipelineOperations};

#[cfg(feature = "text")]
pub use text::ExhibitText;
#[cfg(feature = "text")]
pub use traits::TextOperations;

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
