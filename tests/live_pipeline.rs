use chrono::NaiveDate;
use exhibitkit::{
    Crawler, DiscoveryOperations, DiscoveryOptions, Edgar, ExhibitOperations, PipelineOperations,
};

fn crawler() -> Crawler<Edgar> {
    let edgar = Edgar::new("test_agent example@example.com").unwrap();
    Crawler::new(edgar, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
        .with_discovery_options(DiscoveryOptions::new().with_page_size(20).with_max_pages(2))
}

#[tokio::test]
#[ignore]
async fn discover_recent_8k_filings() {
    let crawler = crawler();
    let cutoff = crawler.after_date();

    let filings = crawler.discover("320193", cutoff).await.unwrap();

    assert!(!filings.is_empty());
    for filing in &filings {
        assert!(filing.filing_date > cutoff);
        assert!(filing.txt_link.ends_with(".txt"));
        assert!(filing.txt_link.ends_with(&filing.doc_name));
    }
}

#[tokio::test]
#[ignore]
async fn resolve_exhibits_of_latest_filing() {
    let crawler = crawler();
    let filings = crawler.discover("320193", crawler.after_date()).await.unwrap();
    let latest = filings.first().unwrap();

    let set = crawler
        .resolve_exhibits(&latest.txt_link, &latest.doc_name)
        .await
        .unwrap();

    assert!(!set.item_no.is_empty());
    assert!(set.item_no.iter().all(|code| code.starts_with("Item")));
}

#[tokio::test]
#[ignore]
async fn get_data_end_to_end() {
    let table = crawler().get_data("320193", "AAPL").await.unwrap();

    assert!(!table.is_empty());
    for row in &table {
        assert_eq!(row.ticker, "AAPL");
        if let Some(accepted) = &row.dates.accepted_date {
            assert_eq!(accepted.len(), 10);
        }
    }
}

#[cfg(feature = "text")]
#[tokio::test]
#[ignore]
async fn fetch_text_of_latest_exhibits() {
    use exhibitkit::TextOperations;

    let crawler = crawler();
    let table = crawler.get_data("320193", "AAPL").await.unwrap();
    let row = table
        .iter()
        .find(|row| !row.exhibits.exhibit_link.is_empty())
        .unwrap();

    let text = crawler
        .fetch_exhibit_text(&row.exhibits.exhibit_link)
        .await
        .unwrap();

    assert!(!text.text.is_empty());
}
