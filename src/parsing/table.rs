//! Minimal HTML table extraction on top of `scraper`.
//!
//! Produces header names and rows of normalized cell text. Cells also keep the
//! text of their first link, which is what EDGAR index pages put the document
//! file name in.
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));
static HEADER_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("Failed to compile HEADER_CELL_SELECTOR"));
static DATA_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile DATA_CELL_SELECTOR"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Failed to compile LINK_SELECTOR"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub link_text: Option<String>,
}

impl TableCell {
    fn from_element(cell: ElementRef<'_>) -> Self {
        let link_text = cell
            .select(&LINK_SELECTOR)
            .next()
            .map(|a| norm_text(&a.text().collect::<String>()))
            .filter(|s| !s.is_empty());

        Self {
            text: norm_text(&cell.text().collect::<String>()),
            link_text,
        }
    }

    /// Link text when the cell holds a link, otherwise the first word of the cell.
    pub fn value(&self) -> &str {
        match &self.link_text {
            Some(link) => link,
            None => self.text.split_whitespace().next().unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
}

impl HtmlTable {
    /// First table in `document` matching `selector`.
    pub fn find(document: &Html, selector: &Selector) -> Option<Self> {
        document.select(selector).next().map(Self::from_element)
    }

    /// Header labels come from the first row that has `th` cells; every row with
    /// `td` cells is a data row.
    pub fn from_element(table: ElementRef<'_>) -> Self {
        let mut headers = Vec::new();
        let mut rows = Vec::new();

        for tr in table.select(&ROW_SELECTOR) {
            let cells: Vec<TableCell> = tr
                .select(&DATA_CELL_SELECTOR)
                .map(TableCell::from_element)
                .collect();

            if cells.is_empty() {
                if headers.is_empty() {
                    headers = tr
                        .select(&HEADER_CELL_SELECTOR)
                        .map(|th| norm_text(&th.text().collect::<String>()))
                        .collect();
                }
                continue;
            }

            rows.push(cells);
        }

        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of the named column, one per data row. Short rows yield an empty cell.
    pub fn column(&self, name: &str) -> Option<Vec<&TableCell>> {
        static EMPTY: TableCell = TableCell {
            text: String::new(),
            link_text: None,
        };

        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).unwrap_or(&EMPTY))
                .collect(),
        )
    }
}

/// Collapse whitespace & trim
pub fn norm_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
<table class="tableFile" summary="Document Format Files">
  <tr><th>Seq</th><th>Description</th><th>Document</th><th>Type</th><th>Size</th></tr>
  <tr>
    <td>1</td><td>FORM 8-K</td>
    <td><a href="/ix?doc=/Archives/edgar/data/1/000000000120000001/d8k.htm">d8k.htm</a> <span>iXBRL</span></td>
    <td>8-K</td><td>40123</td>
  </tr>
  <tr>
    <td>2</td><td>PRESS RELEASE</td>
    <td><a href="/Archives/edgar/data/1/000000000120000001/ex991.htm">ex991.htm</a></td>
    <td>EX-99.1</td><td>10456</td>
  </tr>
  <tr><td>3</td><td>Complete submission text file</td><td>0000000001-20-000001.txt</td><td>&nbsp;</td></tr>
</table>"#;

    fn parse() -> HtmlTable {
        let document = Html::parse_fragment(TABLE);
        let selector = Selector::parse("table").unwrap();
        HtmlTable::find(&document, &selector).unwrap()
    }

    #[test]
    fn test_headers_and_rows() {
        let table = parse();
        assert_eq!(
            table.headers,
            vec!["Seq", "Description", "Document", "Type", "Size"]
        );
        assert_eq!(table.rows.len(), 3);
    }

    #[test]
    fn test_document_column_prefers_link_text() {
        let table = parse();
        let documents: Vec<&str> = table
            .column("Document")
            .unwrap()
            .into_iter()
            .map(TableCell::value)
            .collect();
        assert_eq!(
            documents,
            vec!["d8k.htm", "ex991.htm", "0000000001-20-000001.txt"]
        );
    }

    #[test]
    fn test_short_row_yields_empty_cell() {
        let table = parse();
        let sizes = table.column("Size").unwrap();
        assert_eq!(sizes.len(), 3);
        assert_eq!(sizes[2].text, "");
    }

    #[test]
    fn test_missing_column() {
        assert!(parse().column("Checksum").is_none());
    }

    #[test]
    fn test_norm_text() {
        assert_eq!(norm_text("  EX-10.1 \n\t "), "EX-10.1");
        assert_eq!(norm_text("a\u{a0} b"), "a b");
    }
}
