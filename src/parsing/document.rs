//! Text extraction from HTML pages and exhibit documents.
#[cfg(feature = "text")]
use once_cell::sync::Lazy;
use scraper::Html;
#[cfg(feature = "text")]
use scraper::{Node, Selector};
#[cfg(feature = "text")]
use unicode_normalization::UnicodeNormalization;

#[cfg(feature = "text")]
static HTML_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("html").expect("Failed to compile HTML_SELECTOR"));

/// All text of a parsed page, concatenated without separators.
pub fn page_text(document: &Html) -> String {
    document.root_element().text().collect()
}

/// Narrative text of an exhibit document.
///
/// Each `html` section contributes its text with every table left out, cleaned by
/// [`clean_text`]. Sections are joined with a single space.
#[cfg(feature = "text")]
pub fn exhibit_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&HTML_SELECTOR)
        .map(|section| {
            let mut raw = String::new();
            for node in section.descendants() {
                let Node::Text(text) = node.value() else {
                    continue;
                };
                let in_table = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|element| element.name() == "table")
                });
                if !in_table {
                    raw.push_str(text);
                }
            }
            clean_text(&raw)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// NFKD-normalizes `raw`, turns tabs, line breaks and stray `/s` markers into
/// spaces, and unescapes `\'`.
#[cfg(feature = "text")]
pub fn clean_text(raw: &str) -> String {
    let normalized: String = raw.nfkd().collect();
    normalized
        .replace(['\t', '\r', '\n'], " ")
        .replace("/s", " ")
        .replace("\\'", "'")
}
