//! Filing rows and the aligned table the pipeline produces.
//!
//! A [`Filing`] is created by discovery and never removed; later stages attach an
//! [`ExhibitSet`] and [`DateFields`] to the same position. There is no row id, so
//! the position in [`EnrichedFilingTable::rows`] is the join key between stages.

use chrono::NaiveDate;
use serde::Serialize;

const INDEX_SUFFIX: &str = "-index.html";
const TXT_SUFFIX: &str = ".txt";

/// One 8-K submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filing {
    pub cik: String,
    /// Raw `.txt` submission URL
    pub txt_link: String,
    /// Final path segment of `txt_link`
    pub doc_name: String,
    #[serde(skip_serializing)]
    pub filing_date: NaiveDate,
}

impl Filing {
    /// Builds a filing from a discovered `-index.html` link.
    pub fn from_index_link(cik: impl Into<String>, index_link: &str, filing_date: NaiveDate) -> Self {
        let txt_link = index_link.replace(INDEX_SUFFIX, TXT_SUFFIX);
        let doc_name = last_segment(&txt_link).to_string();

        Self {
            cik: cik.into(),
            txt_link,
            doc_name,
            filing_date,
        }
    }

    pub fn index_url(&self) -> String {
        index_url(&self.txt_link)
    }
}

/// Index page URL for a raw `.txt` submission link.
pub fn index_url(txt_link: &str) -> String {
    match txt_link.strip_suffix(TXT_SUFFIX) {
        Some(stem) => format!("{stem}{INDEX_SUFFIX}"),
        None => txt_link.replace(TXT_SUFFIX, INDEX_SUFFIX),
    }
}

/// Swaps `doc_name` for `document` in the final segment of `txt_link`, keeping the
/// filing's directory.
pub fn exhibit_url(txt_link: &str, doc_name: &str, document: &str) -> String {
    match txt_link.rsplit_once('/') {
        Some((dir, last)) if last == doc_name => format!("{dir}/{document}"),
        _ => txt_link.replacen(doc_name, document, 1),
    }
}

fn last_segment(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or(link)
}

/// Exhibit documents and item codes of one filing. The two lists are extracted
/// independently and their lengths need not match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExhibitSet {
    pub exhibit_link: Vec<String>,
    pub item_no: Vec<String>,
}

/// Ten-character date strings read from a filing's index page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateFields {
    pub accepted_date: Option<String>,
    pub period_of_report: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Exhibits,
    Dates,
}

/// A per-row stage failure. The row keeps empty/`None` values for that stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedFiling {
    pub ticker: String,
    pub filing: Filing,
    pub exhibits: ExhibitSet,
    pub dates: DateFields,
    pub failures: Vec<StageFailure>,
}

impl EnrichedFiling {
    pub fn new(ticker: impl Into<String>, filing: Filing) -> Self {
        Self {
            ticker: ticker.into(),
            filing,
            exhibits: ExhibitSet::default(),
            dates: DateFields::default(),
            failures: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_failure(&mut self, stage: Stage, message: impl Into<String>) {
        self.failures.push(StageFailure {
            stage,
            message: message.into(),
        });
    }
}

impl Serialize for EnrichedFiling {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut row = serializer.serialize_struct("EnrichedFiling", COLUMNS.len())?;
        row.serialize_field("cik", &self.filing.cik)?;
        row.serialize_field("ticker", &self.ticker)?;
        row.serialize_field("txt_link", &self.filing.txt_link)?;
        row.serialize_field("doc_name", &self.filing.doc_name)?;
        row.serialize_field("exhibit_link", &self.exhibits.exhibit_link)?;
        row.serialize_field("item_no", &self.exhibits.item_no)?;
        row.serialize_field("accepted_date", &self.dates.accepted_date)?;
        row.serialize_field("period_of_report", &self.dates.period_of_report)?;
        row.end()
    }
}

/// Column names of a serialized [`EnrichedFiling`], in order.
pub const COLUMNS: [&str; 8] = [
    "cik",
    "ticker",
    "txt_link",
    "doc_name",
    "exhibit_link",
    "item_no",
    "accepted_date",
    "period_of_report",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Complete,
    Partial { failed_rows: usize },
}

/// All filings of one (cik, ticker) pair, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnrichedFilingTable {
    #[serde(skip)]
    pub cik: String,
    #[serde(skip)]
    pub ticker: String,
    pub rows: Vec<EnrichedFiling>,
}

impl EnrichedFilingTable {
    pub fn new(cik: impl Into<String>, ticker: impl Into<String>, filings: Vec<Filing>) -> Self {
        let ticker = ticker.into();
        let rows = filings
            .into_iter()
            .map(|filing| EnrichedFiling::new(ticker.clone(), filing))
            .collect();

        Self {
            cik: cik.into(),
            ticker,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedFiling> {
        self.rows.iter()
    }

    pub fn status(&self) -> BatchStatus {
        let failed_rows = self.rows.iter().filter(|row| !row.is_complete()).count();
        if failed_rows == 0 {
            BatchStatus::Complete
        } else {
            BatchStatus::Partial { failed_rows }
        }
    }
}

impl<'a> IntoIterator for &'a EnrichedFilingTable {
    type Item = &'a EnrichedFiling;
    type IntoIter = std::slice::Iter<'a, EnrichedFiling>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
