mod common;

use common::{FILING_A, FILING_B, FixtureFetcher, crawler, index_url, read_fixture};
use exhibitkit::{DateOperations, EdgarError, KeywordOffset};

#[tokio::test]
async fn extract_dates_from_index_page() {
    let crawler = crawler(FixtureFetcher::registry());

    let dates = crawler.extract_dates(FILING_A).await.unwrap();
    assert_eq!(dates.accepted_date.as_deref(), Some("2020-03-02"));
    assert_eq!(dates.period_of_report.as_deref(), Some("2020-02-26"));

    let dates = crawler.extract_dates(FILING_B).await.unwrap();
    assert_eq!(dates.accepted_date.as_deref(), Some("2020-01-28"));
    assert_eq!(dates.period_of_report.as_deref(), Some("2020-01-28"));
}

#[tokio::test]
async fn missing_label_yields_none() {
    let fetcher = FixtureFetcher::new()
        .with_fixture(index_url(FILING_A), "index/no-table-index.html");
    let crawler = crawler(fetcher);

    let dates = crawler.extract_dates(FILING_A).await.unwrap();

    assert_eq!(dates.accepted_date.as_deref(), Some("2020-02-10"));
    assert_eq!(dates.period_of_report, None);
}

#[tokio::test]
async fn extract_dates_propagates_fetch_errors() {
    let crawler = crawler(FixtureFetcher::new());

    let result = crawler.extract_dates(FILING_A).await;

    assert!(matches!(result, Err(EdgarError::NotFound)));
}

#[test]
fn custom_extractors() {
    let html = read_fixture("index/0001140361-20-004713-index.html");
    let crawler = crawler(FixtureFetcher::new()).with_date_extractors(
        // Date and time of acceptance
        KeywordOffset::new("Accepted", 10, 19),
        |text: &str| text.contains("Item 9.01").then(|| "has exhibits".to_string()),
    );

    let dates = crawler.dates_from_page(&html);

    assert_eq!(dates.accepted_date.as_deref(), Some("2020-03-02 16:31:12"));
    assert_eq!(dates.period_of_report.as_deref(), Some("has exhibits"));
}
