use std::time::Duration;

/// Configuration for the Edgar client
#[derive(Debug, Clone)]
pub struct EdgarConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Rate limit in requests per second
    pub rate_limit: u32,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: "exhibitkit/0.1.0".to_string(),
            rate_limit: 10,
            timeout: Duration::from_secs(30),
        }
    }
}

impl EdgarConfig {
    /// Creates a new EdgarConfig with custom settings
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use exhibitkit::{Edgar, EdgarConfig};
    /// use std::time::Duration;
    /// let config = EdgarConfig::new("YourAppName contact@example.com", 10, Duration::from_secs(30));
    /// let edgar = Edgar::with_config(config)?;
    /// # Ok::<(), exhibitkit::EdgarError>(())
    /// ```
    pub fn new(user_agent: impl Into<String>, rate_limit: u32, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            rate_limit,
            timeout,
        }
    }
}

/// Settings for the filing crawler that sit above the HTTP transport.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Company browse endpoint used for filing discovery
    pub browse_url: String,
    /// Maximum number of per-filing requests in flight. `1` runs sequentially.
    pub concurrency: usize,
    /// Pause after every exhibit document fetch
    pub politeness_delay: Duration,
    /// Pause after a connection-level failure while fetching exhibit text
    pub connection_backoff: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            browse_url: "https://www.sec.gov/cgi-bin/browse-edgar".to_string(),
            concurrency: 1,
            politeness_delay: Duration::from_millis(100),
            connection_backoff: Duration::from_secs(10),
        }
    }
}

impl CrawlerConfig {
    pub fn with_browse_url(mut self, url: impl Into<String>) -> Self {
        self.browse_url = url.into();
        self
    }

    /// Values below one are treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    pub fn with_connection_backoff(mut self, backoff: Duration) -> Self {
        self.connection_backoff = backoff;
        self
    }
}
