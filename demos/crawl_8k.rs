//! 8-K crawl example
//!
//! This example walks the full pipeline for one company:
//! - Discover 8-K filings after a cutoff date
//! - Resolve exhibit URLs and item codes
//! - Read acceptance and period-of-report dates
//! - Fetch the text of the newest filing's exhibits
//!
//! Run with: `RUST_LOG=exhibitkit=debug cargo run --example crawl_8k -- 320193 AAPL 2024-01-01`

use chrono::NaiveDate;
use exhibitkit::{
    BatchStatus, Crawler, CrawlerConfig, DiscoveryOptions, Edgar, PipelineOperations,
    TextOperations,
};
use std::error::Error;
use tracing_subscriber::{EnvFilter, fmt};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let mut args = std::env::args().skip(1);
    let cik = args.next().unwrap_or_else(|| "320193".to_string());
    let ticker = args.next().unwrap_or_else(|| "AAPL".to_string());
    let after_date = match args.next() {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")?,
        None => NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid default date")?,
    };

    // SEC.gov requires a user agent in the format: "AppName contact@example.com"
    let edgar = Edgar::new("ExhibitKit Example user@example.com")?;
    let crawler = Crawler::with_config(edgar, after_date, CrawlerConfig::default())
        .with_discovery_options(DiscoveryOptions::new().with_max_pages(5));

    println!("=== 8-K filings for {} ({}) after {} ===\n", ticker, cik, after_date);
    let table = crawler.get_data(&cik, &ticker).await?;

    for row in &table {
        println!("{}", row.filing.txt_link);
        println!(
            "  accepted {} / period {}",
            row.dates.accepted_date.as_deref().unwrap_or("-"),
            row.dates.period_of_report.as_deref().unwrap_or("-")
        );
        println!("  items: {}", row.exhibits.item_no.join(", "));
        for link in &row.exhibits.exhibit_link {
            println!("  exhibit: {}", link);
        }
        for failure in &row.failures {
            println!("  ! {:?}: {}", failure.stage, failure.message);
        }
    }

    if let BatchStatus::Partial { failed_rows } = table.status() {
        println!("\n{} of {} rows are incomplete", failed_rows, table.len());
    }

    if let Some(row) = table.iter().find(|row| !row.exhibits.exhibit_link.is_empty()) {
        if let Some(text) = crawler.fetch_exhibit_text(&row.exhibits.exhibit_link).await {
            let preview: String = text.text.chars().take(500).collect();
            println!("\nExhibit text of {}:\n{}", row.filing.doc_name, preview);
            if !text.is_complete() {
                println!("(skipped: {})", text.skipped.join(", "));
            }
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&table)?);

    Ok(())
}
