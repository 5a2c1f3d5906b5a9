// src/document/mod.rs

pub mod locate;
pub mod rows;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::SourceMode;
use crate::normalize::normalize_ws;

pub use locate::{locate, CandidateRegion};
pub use rows::{extract_rows, ColumnLayout};

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("anchor selector should parse"));
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(?:html|body|table|tr|td|div|p|span)[\s>/]").expect("markup regex should compile")
});

/// The raw source, read once under one capability shape.
pub enum Document {
    Structured(Html),
    Text { body: String, anchor: String },
}

impl Document {
    /// Build the document for `mode`. In text mode, markup is flattened to its
    /// visible text first so the anchor and row regex see plain words.
    pub fn parse(mode: SourceMode, raw: &str, anchor: &str) -> Self {
        match mode {
            SourceMode::Structured => Document::Structured(Html::parse_document(raw)),
            SourceMode::Text => Document::Text {
                body: flatten_if_markup(raw),
                anchor: anchor.to_string(),
            },
        }
    }

    pub fn mode(&self) -> SourceMode {
        match self {
            Document::Structured(_) => SourceMode::Structured,
            Document::Text { .. } => SourceMode::Text,
        }
    }
}

fn flatten_if_markup(raw: &str) -> String {
    if !MARKUP_TAG.is_match(raw) {
        return raw.to_string();
    }
    let html = Html::parse_document(raw);
    let text = html.root_element().text().collect::<Vec<_>>().join(" ");
    normalize_ws(&text)
}

/// One cell: its rendered text and, when it has one, the text of its first
/// non-empty hyperlink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCell {
    pub text: String,
    pub link_text: Option<String>,
}

impl RawCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link_text: None,
        }
    }

    pub fn from_element(cell: ElementRef<'_>) -> Self {
        let text = normalize_ws(&cell.text().collect::<String>());
        let link_text = cell
            .select(&ANCHOR_SELECTOR)
            .map(|a| normalize_ws(&a.text().collect::<String>()))
            .find(|t| !t.is_empty());
        Self { text, link_text }
    }
}

/// A row as found, before identity or numbers are interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<RawCell>,
    /// The first cell is a rank slot (possibly blank) rather than the name.
    pub has_leading_rank: bool,
}

impl RawRow {
    pub fn name_index(&self) -> usize {
        usize::from(self.has_leading_rank)
    }

    pub fn name_cell(&self) -> Option<&RawCell> {
        self.cells.get(self.name_index())
    }

    /// Declared rank, if the row has a rank slot holding a positive number.
    pub fn rank(&self) -> Option<u32> {
        if !self.has_leading_rank {
            return None;
        }
        let cell = self.cells.first()?;
        rows::parse_rank(&cell.text).filter(|r| *r > 0)
    }

    /// gold, silver, bronze, total cell texts. Missing cells read as "".
    pub fn medal_texts(&self, layout: &ColumnLayout) -> [&str; 4] {
        let base = self.name_index();
        layout.medal_offsets.map(|off| {
            self.cells
                .get(base + off)
                .map(|c| c.text.as_str())
                .unwrap_or("")
        })
    }
}
