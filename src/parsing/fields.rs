//! Field extraction from the flattened text of a filing index page.
use once_cell::sync::Lazy;
use regex::Regex;

/// `Item` + whitespace + digits + one or more `:`/`.` + two digits, e.g. `Item 1.01`.
static ITEM_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Item\s+\d+[:.]+\d{2}").expect("Failed to compile ITEM_CODE_RE"));

pub const ACCEPTED_KEYWORD: &str = "Accepted";
pub const PERIOD_OF_REPORT_KEYWORD: &str = "Period of Report";

/// Pulls one value out of free text.
///
/// Implemented for [`KeywordOffset`] and for any `Fn(&str) -> Option<String>`, so a
/// different extraction policy can be plugged into the crawler without touching
/// the pipeline.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Option<String>;
}

impl<F> FieldExtractor for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn extract(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Reads `width` characters that start `offset` characters after the first
/// occurrence of `keyword`. No validation is applied to what is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordOffset {
    keyword: String,
    offset: usize,
    width: usize,
}

impl KeywordOffset {
    /// Distance from the end of the label to its value on EDGAR index pages.
    pub const DEFAULT_OFFSET: usize = 10;
    /// `YYYY-MM-DD`
    pub const DATE_WIDTH: usize = 10;

    pub fn new(keyword: impl Into<String>, offset: usize, width: usize) -> Self {
        Self {
            keyword: keyword.into(),
            offset,
            width,
        }
    }

    /// A date labelled `keyword` at the default offset.
    pub fn date(keyword: impl Into<String>) -> Self {
        Self::new(keyword, Self::DEFAULT_OFFSET, Self::DATE_WIDTH)
    }

    pub fn accepted() -> Self {
        Self::date(ACCEPTED_KEYWORD)
    }

    pub fn period_of_report() -> Self {
        Self::date(PERIOD_OF_REPORT_KEYWORD)
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

impl FieldExtractor for KeywordOffset {
    fn extract(&self, text: &str) -> Option<String> {
        let start = text.find(&self.keyword)? + self.keyword.len();
        let value: String = text[start..]
            .chars()
            .skip(self.offset)
            .take(self.width)
            .collect();

        (!value.is_empty()).then_some(value)
    }
}

/// Every item code in `text`, in order of appearance, duplicates included.
pub fn extract_item_codes(text: &str) -> Vec<String> {
    ITEM_CODE_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_codes() {
        let text = "Item 1.01 Entry into a Material Definitive Agreement... Item 9.01 Financial Statements and Exhibits";
        assert_eq!(extract_item_codes(text), vec!["Item 1.01", "Item 9.01"]);
    }

    #[test]
    fn test_item_code_separators() {
        let text = "Item 2:02 Results; Item  5..07 Votes; Item 8 Other; item 7.01 lower";
        assert_eq!(extract_item_codes(text), vec!["Item 2:02", "Item  5..07"]);
    }

    #[test]
    fn test_item_codes_keep_duplicates() {
        let text = "Items: Item 2.02 ... Item 2.02";
        assert_eq!(extract_item_codes(text).len(), 2);
    }

    #[test]
    fn test_keyword_offset() {
        let text = "Accepted0123456789 2020-01-15 16:30:55";
        let extractor = KeywordOffset::new(ACCEPTED_KEYWORD, 11, KeywordOffset::DATE_WIDTH);
        assert_eq!(extractor.extract(text).as_deref(), Some("2020-01-15"));

        let text = "Accepted01234567892020-01-15";
        assert_eq!(
            KeywordOffset::accepted().extract(text).as_deref(),
            Some("2020-01-15")
        );
    }

    #[test]
    fn test_keyword_missing() {
        assert_eq!(KeywordOffset::period_of_report().extract("Filing Date 2020-01-15"), None);
    }

    #[test]
    fn test_keyword_at_end_of_text() {
        assert_eq!(KeywordOffset::accepted().extract("Accepted"), None);
        assert_eq!(
            KeywordOffset::accepted().extract("Accepted0123456789202").as_deref(),
            Some("202")
        );
    }

    #[test]
    fn test_keyword_offset_counts_characters() {
        let text = "Accepted\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}\u{a0}2021-03-04";
        assert_eq!(
            KeywordOffset::accepted().extract(text).as_deref(),
            Some("2021-03-04")
        );
    }

    #[test]
    fn test_closure_extractor() {
        let extractor = |text: &str| text.get(0..4).map(str::to_string);
        assert_eq!(extractor.extract("2020-01-15").as_deref(), Some("2020"));
    }
}
