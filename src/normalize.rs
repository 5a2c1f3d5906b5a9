// src/normalize.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{ColumnLayout, RawRow};
use crate::identity::{resolve, IdentityTable};

/// Trailing host markers and footnote references: `*`, `†`, `[a]`, `[12]` …
static TRAILING_MARKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\s*(?:\[[^\]]*\]|[*†‡§#]))+\s*$").expect("marks regex should compile")
});

/// One entrant's standing, independent of the markup it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub rank: Option<u32>,
    pub code: String,
    pub display_name: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    /// As published; never recomputed from the other three.
    pub total: u32,
    pub flag_url: Option<String>,
    pub is_placeholder: bool,
}

impl CanonicalRecord {
    pub fn medal_sum(&self) -> u64 {
        u64::from(self.gold) + u64::from(self.silver) + u64::from(self.bronze)
    }
}

/// Collapse whitespace runs (including non-breaking spaces) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Display name with whitespace collapsed and trailing markers removed.
pub fn clean_display_name(raw: &str) -> String {
    let collapsed = normalize_ws(raw);
    TRAILING_MARKS.replace(&collapsed, "").trim().to_string()
}

/// Every non-digit is dropped and the rest parsed; anything unusable is 0.
pub fn parse_count(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// [`parse_count`] for cells that may be missing altogether.
pub fn parse_count_opt(raw: Option<&str>) -> u32 {
    raw.map_or(0, parse_count)
}

/// Turns raw rows into canonical records against one identity table.
pub struct Normalizer<'a> {
    table: &'a IdentityTable,
    flag_template: &'a str,
}

impl<'a> Normalizer<'a> {
    pub fn new(table: &'a IdentityTable, flag_template: &'a str) -> Self {
        Self {
            table,
            flag_template,
        }
    }

    /// `None` without a code, without an iso2 for it, or with an empty template.
    pub fn flag_url(&self, code: Option<&str>) -> Option<String> {
        if self.flag_template.is_empty() {
            return None;
        }
        let iso2 = self.table.iso2_for_code(code?)?;
        Some(self.flag_template.replace("{iso2}", iso2))
    }

    /// Build a record, or `None` when the row is not an entrant.
    pub fn record(&self, row: &RawRow, layout: &ColumnLayout) -> Option<CanonicalRecord> {
        let Some(identity) = row.name_cell().and_then(|cell| resolve(cell, self.table)) else {
            debug!(cells = ?row.cells.first().map(|c| &c.text), "dropping row without entrant name");
            return None;
        };
        let [gold, silver, bronze, total] = row.medal_texts(layout).map(parse_count);
        let flag_url = self.flag_url(identity.code.as_deref());
        if identity.code.is_none() {
            debug!(name = %identity.display_name, "no code resolved; using name");
        }
        Some(CanonicalRecord {
            rank: row.rank(),
            code: identity.code.unwrap_or_else(|| identity.display_name.clone()),
            display_name: identity.display_name,
            gold,
            silver,
            bronze,
            total,
            flag_url,
            is_placeholder: false,
        })
    }
}
