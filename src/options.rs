/// Options for paging through a company's filing list.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Form type requested from the registry
    pub form_type: String,
    /// Entries requested per page
    pub page_size: usize,
    /// Stop after this many pages even if the registry keeps returning entries
    pub max_pages: Option<usize>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            form_type: "8-K".to_string(),
            page_size: 100,
            max_pages: None,
        }
    }
}

impl DiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form_type(mut self, form_type: impl Into<String>) -> Self {
        self.form_type = form_type.into();
        self
    }

    /// Values below one are treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Query parameters for one page of the company browse endpoint.
    pub fn to_query_params(&self, cik: &str, start: usize) -> Vec<(&'static str, String)> {
        vec![
            ("action", "getcompany".to_string()),
            ("type", self.form_type.clone()),
            ("output", "xml".to_string()),
            ("CIK", cik.to_string()),
            ("count", self.page_size.to_string()),
            ("start", start.to_string()),
        ]
    }
}
