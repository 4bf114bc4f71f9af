use async_trait::async_trait;
use chrono::NaiveDate;
use exhibitkit::{Crawler, CrawlerConfig, EdgarError, Fetch};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

#[allow(dead_code)]
pub const CIK: &str = "320193";
#[allow(dead_code)]
pub const TICKER: &str = "AAPL";

#[allow(dead_code)]
pub const FILING_A: &str =
    "https://www.sec.gov/Archives/edgar/data/320193/000114036120004713/0001140361-20-004713.txt";
#[allow(dead_code)]
pub const FILING_B: &str =
    "https://www.sec.gov/Archives/edgar/data/320193/000032019320000010/0000320193-20-000010.txt";

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
}

#[allow(dead_code)]
pub fn browse_url(start: usize) -> String {
    format!(
        "https://www.sec.gov/cgi-bin/browse-edgar?action=getcompany&type=8-K&output=xml&CIK={CIK}&count=100&start={start}"
    )
}

#[allow(dead_code)]
pub fn index_url(txt_link: &str) -> String {
    exhibitkit::index_url(txt_link)
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    ConnectionFailure,
    NotFound,
}

/// In-memory registry keyed by URL. Unknown URLs answer `NotFound`.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.replies.insert(url.into(), Reply::Body(body.into()));
        self
    }

    pub fn with_fixture(self, url: impl Into<String>, fixture: &str) -> Self {
        self.with_body(url, read_fixture(fixture))
    }

    pub fn with_reply(mut self, url: impl Into<String>, reply: Reply) -> Self {
        self.replies.insert(url.into(), reply);
        self
    }

    /// The registry used by most tests: two 8-K filings after the cutoff spread
    /// over two non-empty browse pages, then an empty page.
    pub fn registry() -> Self {
        Self::new()
            .with_fixture(browse_url(0), "browse/page_0.xml")
            .with_fixture(browse_url(3), "browse/page_3.xml")
            .with_fixture(browse_url(5), "browse/empty.xml")
            .with_fixture(index_url(FILING_A), "index/0001140361-20-004713-index.html")
            .with_fixture(index_url(FILING_B), "index/0000320193-20-000010-index.html")
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Fetch for FixtureFetcher {
    async fn fetch(&self, url: &str) -> exhibitkit::Result<String> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.replies.get(url) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::ConnectionFailure) => Err(EdgarError::Connection {
                url: url.to_string(),
                message: "connection reset by peer".to_string(),
            }),
            Some(Reply::NotFound) | None => Err(EdgarError::NotFound),
        }
    }
}

/// Crawler over `fetcher` with the fixture cutoff and no pauses.
#[allow(dead_code)]
pub fn crawler(fetcher: FixtureFetcher) -> Crawler<FixtureFetcher> {
    let config = CrawlerConfig::default()
        .with_politeness_delay(Duration::ZERO)
        .with_connection_backoff(Duration::ZERO);
    Crawler::with_config(fetcher, cutoff(), config)
}
