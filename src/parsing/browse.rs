//! Parser for one page of the company browse endpoint (`output=xml`).
//!
//! The registry answers with a `companyFilings` document whose `filing` elements
//! carry, among other things, a `filingHREF` and a `dateFiled`. Only those two
//! are needed, and they are always paired within their own `filing` element. A
//! filing missing either value is counted but not returned.
use crate::Result;
use crate::error::EdgarError;
use quick_xml::{Reader, events::Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Href,
    DateFiled,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        if name.eq_ignore_ascii_case(b"filinghref") {
            Some(Field::Href)
        } else if name.eq_ignore_ascii_case(b"datefiled") {
            Some(Field::DateFiled)
        } else {
            None
        }
    }
}

fn is_filing(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"filing")
}

/// Link and filing date of one `filing` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingEntry {
    pub href: String,
    pub date_filed: String,
}

#[derive(Debug, Default)]
struct PartialEntry {
    href: Option<String>,
    date_filed: Option<String>,
}

impl PartialEntry {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Href => &mut self.href,
            Field::DateFiled => &mut self.date_filed,
        }
    }

    fn finish(self) -> Option<FilingEntry> {
        match (self.href, self.date_filed) {
            (Some(href), Some(date_filed)) if !href.is_empty() && !date_filed.is_empty() => {
                Some(FilingEntry { href, date_filed })
            }
            _ => None,
        }
    }
}

/// Filings from one page, unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingListPage {
    pub filings: Vec<FilingEntry>,
    /// `filing` elements dropped for a missing link or date
    pub incomplete: usize,
}

impl FilingListPage {
    /// Number of `filing` elements on the page, complete or not. Zero means
    /// pagination is done.
    pub fn raw_len(&self) -> usize {
        self.filings.len() + self.incomplete
    }

    /// `(href, date)` pairs in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filings
            .iter()
            .map(|entry| (entry.href.as_str(), entry.date_filed.as_str()))
    }
}

/// Parses a browse endpoint XML page.
///
/// # Errors
///
/// Returns `EdgarError::XmlError` when the document is not well-formed XML.
pub fn parse_filing_list(content: &str) -> Result<FilingListPage> {
    let mut reader = Reader::from_str(content);
    let config = reader.config_mut();
    config.trim_text(true);

    let mut buf = Vec::new();
    let mut page = FilingListPage::default();
    let mut entry: Option<PartialEntry> = None;
    let mut current = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if is_filing(e.name().as_ref()) => {
                entry = Some(PartialEntry::default());
                current = None;
            }
            Event::Start(ref e) => {
                current = Field::from_tag(e.name().as_ref());
                if let (Some(field), Some(entry)) = (current, entry.as_mut()) {
                    *entry.slot(field) = Some(String::new());
                }
            }
            Event::Empty(ref e) if is_filing(e.name().as_ref()) => {
                tracing::warn!("Skipping empty filing element");
                page.incomplete += 1;
            }
            // `<filingHREF/>` or `<dateFiled/>`
            Event::Empty(ref e) => {
                if let (Some(field), Some(entry)) =
                    (Field::from_tag(e.name().as_ref()), entry.as_mut())
                {
                    *entry.slot(field) = Some(String::new());
                }
            }
            Event::Text(ref text) => {
                if let (Some(field), Some(entry)) = (current, entry.as_mut()) {
                    let value = text
                        .unescape()
                        .map_err(|e| EdgarError::XmlError(e.to_string()))?;
                    push_text(entry.slot(field), &value);
                }
            }
            Event::CData(ref data) => {
                if let (Some(field), Some(entry)) = (current, entry.as_mut()) {
                    let bytes = data.clone().into_inner();
                    push_text(entry.slot(field), &String::from_utf8_lossy(&bytes));
                }
            }
            Event::End(ref e) if is_filing(e.name().as_ref()) => {
                current = None;
                if let Some(partial) = entry.take() {
                    match partial.finish() {
                        Some(filing) => page.filings.push(filing),
                        None => {
                            tracing::warn!("Skipping filing without a link or filing date");
                            page.incomplete += 1;
                        }
                    }
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(page)
}

fn push_text(slot: &mut Option<String>, value: &str) {
    slot.get_or_insert_with(String::new).push_str(value.trim());
}
