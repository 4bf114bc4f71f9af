//! Exhibit documents and item codes of a single filing.
//!
//! The filing's index page lists every document of the submission in a table
//! tagged `class="tableFile"` / `summary="Document Format Files"`. Rows whose
//! `Type` mentions `EX` are exhibits; their file names are swapped into the raw
//! submission link to get the exhibit URL. Item codes are read from the whole page,
//! not just the table.

use super::crawler::Crawler;
use super::error::{EdgarError, Result};
use super::filing::{ExhibitSet, exhibit_url, index_url};
use super::parsing::document::page_text;
use super::parsing::fields::extract_item_codes;
use super::parsing::table::{HtmlTable, TableCell};
use super::traits::{ExhibitOperations, Fetch};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static DOCUMENT_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"table.tableFile[summary="Document Format Files"]"#)
        .expect("Failed to compile DOCUMENT_TABLE_SELECTOR")
});

const TYPE_COLUMN: &str = "Type";
const DOCUMENT_COLUMN: &str = "Document";
const EXHIBIT_MARKER: &str = "EX";

/// File names of the exhibit rows in a document table, in table order.
pub(crate) fn exhibit_documents(table: &HtmlTable) -> Result<Vec<String>> {
    let missing = |column: &str| {
        EdgarError::InvalidResponse(format!("Document table has no {} column", column))
    };
    let types = table.column(TYPE_COLUMN).ok_or_else(|| missing(TYPE_COLUMN))?;
    let documents = table
        .column(DOCUMENT_COLUMN)
        .ok_or_else(|| missing(DOCUMENT_COLUMN))?;

    Ok(types
        .into_iter()
        .zip(documents)
        .filter(|(kind, _)| kind.text.contains(EXHIBIT_MARKER))
        .map(|(_, document)| TableCell::value(document).to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// Resolves an already-fetched index page.
pub(crate) fn parse_index_page(
    html: &str,
    page_url: &str,
    txt_link: &str,
    doc_name: &str,
) -> Result<ExhibitSet> {
    let document = Html::parse_document(html);

    let table = HtmlTable::find(&document, &DOCUMENT_TABLE_SELECTOR)
        .ok_or_else(|| EdgarError::MissingTable(page_url.to_string()))?;

    let exhibit_link = exhibit_documents(&table)?
        .iter()
        .map(|name| exhibit_url(txt_link, doc_name, name))
        .collect();
    let item_no = extract_item_codes(&page_text(&document));

    Ok(ExhibitSet {
        exhibit_link,
        item_no,
    })
}

#[async_trait]
impl<F: Fetch> ExhibitOperations for Crawler<F> {
    /// Fetches the filing's index page and resolves its exhibits and item codes.
    ///
    /// # Errors
    ///
    /// * `EdgarError::MissingTable` - the page has no document table
    /// * `EdgarError::InvalidResponse` - the table lacks a `Type` or `Document` column
    /// * transport errors from the fetcher
    async fn resolve_exhibits(&self, txt_link: &str, doc_name: &str) -> Result<ExhibitSet> {
        let url = index_url(txt_link);
        let html = self.fetcher.fetch(&url).await?;
        let exhibits = parse_index_page(&html, &url, txt_link, doc_name)?;

        tracing::debug!(
            "{}: {} exhibits, {} item codes",
            url,
            exhibits.exhibit_link.len(),
            exhibits.item_no.len()
        );
        Ok(exhibits)
    }
}
