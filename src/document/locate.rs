// src/document/locate.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::{debug, trace};

use super::Document;

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector should parse"));
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("row selector should parse"));

/// Tokens a standings header must mention, in any order.
pub const HEADER_TOKENS: [&str; 4] = ["gold", "silver", "bronze", "total"];

/// The part of the document believed to hold the standings.
#[derive(Clone, Copy, Debug)]
pub enum CandidateRegion<'a> {
    Table(ElementRef<'a>),
    Window(&'a str),
}

/// Find the standings region. `None` means there is no live data to extract.
///
/// Structured documents: the first table (document order) whose first row
/// mentions every [`HEADER_TOKENS`] entry. Text documents: `window` bytes
/// following the first case-insensitive occurrence of the anchor.
pub fn locate(doc: &Document, window: usize) -> Option<CandidateRegion<'_>> {
    match doc {
        Document::Structured(html) => html
            .select(&TABLE_SELECTOR)
            .enumerate()
            .find(|(idx, table)| {
                let hit = header_row(*table).is_some_and(|row| is_standings_header(*table, row));
                trace!(table = idx, hit, "header probe");
                hit
            })
            .map(|(idx, table)| {
                debug!(table = idx, "standings table located");
                CandidateRegion::Table(table)
            }),
        Document::Text { body, anchor } => {
            text_window(body, anchor, window).map(CandidateRegion::Window)
        }
    }
}

/// Rows belonging to `table` itself, in document order; rows of nested tables are skipped.
pub(crate) fn own_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    table
        .select(&ROW_SELECTOR)
        .filter(move |tr| nearest_table(tr.ancestors().filter_map(ElementRef::wrap)) == Some(table))
}

pub(crate) fn header_row(table: ElementRef<'_>) -> Option<ElementRef<'_>> {
    own_rows(table).next()
}

fn nearest_table<'a>(mut elements: impl Iterator<Item = ElementRef<'a>>) -> Option<ElementRef<'a>> {
    elements.find(|el| el.value().name() == "table")
}

/// Header text excluding anything inside a nested table.
fn is_standings_header(table: ElementRef<'_>, row: ElementRef<'_>) -> bool {
    let text = row
        .descendants()
        .filter(|n| nearest_table(n.ancestors().filter_map(ElementRef::wrap)) == Some(table))
        .filter_map(|n| n.value().as_text().map(|t| t.to_string()))
        .collect::<String>()
        .to_lowercase();
    HEADER_TOKENS.iter().all(|tok| text.contains(tok))
}

fn text_window<'a>(body: &'a str, anchor: &str, window: usize) -> Option<&'a str> {
    if anchor.is_empty() {
        return None;
    }
    // ASCII lowercasing keeps byte offsets aligned with `body`.
    let start = body
        .to_ascii_lowercase()
        .find(&anchor.to_ascii_lowercase())?
        + anchor.len();
    let mut end = start.saturating_add(window).min(body.len());
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    debug!(start, end, "text window located");
    Some(&body[start..end])
}
