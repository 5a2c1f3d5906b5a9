// src/document/rows.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::{debug, instrument, trace};

use super::locate::{header_row, own_rows, CandidateRegion};
use super::{RawCell, RawRow};
use crate::config::RankColumn;

/// `rank name[*] gold silver bronze total`, matched left to right.
static TEXT_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<rank>\d+)\s+(?P<name>\p{L}[\p{L}'’\- ]*?\*?)\s+(?P<gold>\d+)\s+(?P<silver>\d+)\s+(?P<bronze>\d+)\s+(?P<total>\d+)",
    )
    .expect("text row regex should compile")
});

/// A rank cell: a plain integer, optionally carrying a tie marker (`=2`, `2=`, `T2`).
static RANK_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:=|T-?)?(\d+)=?$").expect("rank regex should compile"));

/// Where the medal columns sit, counted from the name column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    /// gold, silver, bronze, total
    pub medal_offsets: [usize; 4],
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            medal_offsets: [1, 2, 3, 4],
        }
    }
}

impl ColumnLayout {
    /// Read the layout from header cells when each medal column has its own
    /// header cell; the name column is the one just before the leftmost medal.
    /// Otherwise the default layout.
    pub fn from_header(headers: &[String]) -> Self {
        let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let find = |tok: &str| lower.iter().position(|h| h.contains(tok));
        let (Some(gold), Some(silver), Some(bronze), Some(total)) =
            (find("gold"), find("silver"), find("bronze"), find("total"))
        else {
            return Self::default();
        };
        let found = [gold, silver, bronze, total];
        let Some(name_idx) = found.iter().min().and_then(|first| first.checked_sub(1)) else {
            return Self::default();
        };
        Self {
            medal_offsets: found.map(|i| i - name_idx),
        }
    }
}

/// Parse a rank cell; `None` for anything that is not a (tie-marked) integer.
pub fn parse_rank(text: &str) -> Option<u32> {
    let caps = RANK_CELL.captures(text.trim())?;
    caps[1].parse().ok()
}

/// Probes deciding whether a row's first cell is a rank slot, tried in order.
/// A row none of them claims starts with its name.
const LEADING_RANK_PROBES: &[(&str, fn(&str) -> bool)] = &[
    ("explicit_rank", explicit_rank),
    ("blank_rank_slot", blank_rank_slot),
];

fn explicit_rank(text: &str) -> bool {
    parse_rank(text).is_some()
}

/// Merged rank cells are sometimes rendered as an empty slot rather than omitted.
fn blank_rank_slot(text: &str) -> bool {
    text.trim().is_empty()
}

/// Decide rank presence before anything reads names or numbers: every later
/// column index depends on it.
pub fn detect_leading_rank(cells: &[RawCell], rank_column: RankColumn) -> bool {
    if rank_column == RankColumn::Always {
        return true;
    }
    let Some(first) = cells.first() else {
        return false;
    };
    match LEADING_RANK_PROBES.iter().find(|(_, probe)| probe(first.text.as_str())) {
        Some((name, _)) => {
            trace!(probe = *name, "leading rank slot");
            true
        }
        None => false,
    }
}

/// Walk a region and yield its rows together with the column layout to read them by.
#[instrument(level = "debug", skip_all)]
pub fn extract_rows(region: &CandidateRegion<'_>, rank_column: RankColumn) -> (ColumnLayout, Vec<RawRow>) {
    match region {
        CandidateRegion::Table(table) => table_rows(*table, rank_column),
        CandidateRegion::Window(text) => (ColumnLayout::default(), text_rows(text)),
    }
}

fn table_rows(table: ElementRef<'_>, rank_column: RankColumn) -> (ColumnLayout, Vec<RawRow>) {
    let layout = header_row(table)
        .map(|row| {
            let headers: Vec<String> = row_cells(row).into_iter().map(|c| c.text).collect();
            ColumnLayout::from_header(&headers)
        })
        .unwrap_or_default();
    debug!(?layout, "column layout");

    let min_cells = rank_column.min_cells();
    let mut rows = Vec::new();
    for (idx, tr) in own_rows(table).enumerate().skip(1) {
        let cells = row_cells(tr);
        if cells.len() < min_cells {
            debug!(row = idx, cells = cells.len(), min_cells, "dropping short row");
            continue;
        }
        let has_leading_rank = detect_leading_rank(&cells, rank_column);
        rows.push(RawRow {
            cells,
            has_leading_rank,
        });
    }
    (layout, rows)
}

/// Direct `td`/`th` children only, so nested tables do not leak cells.
fn row_cells(tr: ElementRef<'_>) -> Vec<RawCell> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .map(RawCell::from_element)
        .collect()
}

fn text_rows(window: &str) -> Vec<RawRow> {
    TEXT_ROW
        .captures_iter(window)
        .map(|caps| {
            let cells = ["rank", "name", "gold", "silver", "bronze", "total"]
                .iter()
                .map(|g| RawCell::plain(caps[*g].trim()))
                .collect();
            RawRow {
                cells,
                has_leading_rank: true,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceMode;
    use crate::document::{locate, Document};

    fn texts(row: &RawRow) -> Vec<&str> {
        row.cells.iter().map(|c| c.text.as_str()).collect()
    }

    fn rows_of(html: &str, rank_column: RankColumn) -> (ColumnLayout, Vec<RawRow>) {
        let doc = Document::parse(SourceMode::Structured, html, "");
        let region = locate(&doc, 0).expect("table should be found");
        extract_rows(&region, rank_column)
    }

    const TIED: &str = r#"<table>
        <tr><th>Rank</th><th>NOC</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>
        <tr><td rowspan="2">1</td><td>Italy (ITA)</td><td>2</td><td>1</td><td>0</td><td>3</td></tr>
        <tr><td>Canada (CAN)</td><td>2</td><td>1</td><td>0</td><td>3</td></tr>
        <tr><td>3</td><td>Norway (NOR)</td><td>1</td><td>0</td><td>0</td><td>1</td></tr>
        <tr><td>Only</td><td>three</td><td>cells</td></tr>
    </table>"#;

    #[test]
    fn test_rowspan_omitted_rank_reads_name_from_first_cell() {
        let (layout, rows) = rows_of(TIED, RankColumn::MayOmit);
        assert_eq!(layout, ColumnLayout::default());
        assert_eq!(rows.len(), 3);

        let canada = &rows[1];
        assert!(!canada.has_leading_rank);
        assert_eq!(canada.name_cell().unwrap().text, "Canada (CAN)");
        assert_eq!(canada.rank(), None);
        assert_eq!(canada.medal_texts(&layout), ["2", "1", "0", "3"]);

        assert_eq!(rows[2].rank(), Some(3));
        assert_eq!(rows[2].name_cell().unwrap().text, "Norway (NOR)");
    }

    #[test]
    fn test_rank_always_present_rejects_five_cell_rows() {
        let (_, rows) = rows_of(TIED, RankColumn::Always);
        let names: Vec<_> = rows.iter().map(|r| r.name_cell().unwrap().text.as_str()).collect();
        assert_eq!(names, ["Italy (ITA)", "Norway (NOR)"]);
    }

    #[test]
    fn test_blank_rank_slot_shifts_to_next_cell() {
        let cells: Vec<RawCell> = ["", "Norway (NOR)", "1", "0", "0", "1"]
            .iter()
            .map(|t| RawCell::plain(*t))
            .collect();
        assert!(detect_leading_rank(&cells, RankColumn::MayOmit));
        let row = RawRow {
            cells,
            has_leading_rank: true,
        };
        assert_eq!(row.rank(), None);
        assert_eq!(row.name_cell().unwrap().text, "Norway (NOR)");
    }

    #[test]
    fn test_tie_marked_ranks() {
        assert_eq!(parse_rank("=2"), Some(2));
        assert_eq!(parse_rank(" 4= "), Some(4));
        assert_eq!(parse_rank("T3"), Some(3));
        assert_eq!(parse_rank("Italy"), None);
        assert_eq!(parse_rank("-1"), None);
        assert_eq!(parse_rank(""), None);
    }

    #[test]
    fn test_header_reorders_medal_columns() {
        let html = r#"<table>
            <tr><th>Rank</th><th>Nation</th><th>Total</th><th>Gold</th><th>Silver</th><th>Bronze</th></tr>
            <tr><td>1</td><td>Italy</td><td>3</td><td>2</td><td>1</td><td>0</td></tr>
            <tr><td>Canada</td><td>3</td><td>1</td><td>1</td><td>1</td></tr>
        </table>"#;
        let (layout, rows) = rows_of(html, RankColumn::MayOmit);
        assert_eq!(layout.medal_offsets, [2, 3, 4, 1]);
        assert_eq!(rows[0].medal_texts(&layout), ["2", "1", "0", "3"]);
        assert_eq!(rows[1].medal_texts(&layout), ["1", "1", "1", "3"]);
    }

    #[test]
    fn test_unfamiliar_rank_header_keeps_medal_columns() {
        for rank_header in ["Rk", "Place", "Pl."] {
            let html = format!(
                r#"<table>
                <tr><th>{}</th><th>Nation</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>
                <tr><td>1</td><td>Italy (ITA)</td><td>2</td><td>1</td><td>0</td><td>3</td></tr>
                <tr><td>Canada (CAN)</td><td>2</td><td>1</td><td>0</td><td>3</td></tr>
            </table>"#,
                rank_header
            );
            let (layout, rows) = rows_of(&html, RankColumn::MayOmit);
            assert_eq!(layout, ColumnLayout::default(), "header {}", rank_header);
            assert_eq!(rows[0].medal_texts(&layout), ["2", "1", "0", "3"]);
            assert_eq!(rows[1].medal_texts(&layout), ["2", "1", "0", "3"]);
        }
    }

    #[test]
    fn test_header_without_rank_column_over_ranked_rows() {
        let html = r#"<table>
            <tr><th>Nation</th><th>Total</th><th>Gold</th><th>Silver</th><th>Bronze</th></tr>
            <tr><td>1</td><td>Italy</td><td>3</td><td>2</td><td>1</td><td>0</td></tr>
            <tr><td>Canada</td><td>3</td><td>1</td><td>1</td><td>1</td></tr>
        </table>"#;
        let (layout, rows) = rows_of(html, RankColumn::MayOmit);
        assert_eq!(layout.medal_offsets, [2, 3, 4, 1]);
        assert_eq!(rows[0].rank(), Some(1));
        assert_eq!(rows[0].medal_texts(&layout), ["2", "1", "0", "3"]);
        assert_eq!(rows[1].medal_texts(&layout), ["1", "1", "1", "3"]);
    }

    #[test]
    fn test_nested_header_row_is_not_data() {
        let html = r#"<table><tr><td>
            <table>
              <tr><th>Rank</th><th>NOC</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>
              <tr><td>1</td><td>Italy (ITA)</td><td>2</td><td>1</td><td>0</td><td>3</td></tr>
            </table>
        </td></tr></table>"#;
        let (_, rows) = rows_of(html, RankColumn::MayOmit);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name_cell().unwrap().text, "Italy (ITA)");
    }

    #[test]
    fn test_single_cell_header_uses_default_layout() {
        let layout = ColumnLayout::from_header(&["Rank Nation Gold Silver Bronze Total".into()]);
        assert_eq!(layout, ColumnLayout::default());
    }

    #[test]
    fn test_text_rows_in_match_order() {
        let rows = text_rows(" 1 Norway* 16 8 13 37 2 United States 12 10 5 27 3 Côte d'Ivoire 1 0 0 1");
        assert_eq!(rows.len(), 3);
        assert_eq!(texts(&rows[0]), ["1", "Norway*", "16", "8", "13", "37"]);
        assert_eq!(texts(&rows[1]), ["2", "United States", "12", "10", "5", "27"]);
        assert_eq!(texts(&rows[2])[1], "Côte d'Ivoire");
        assert!(rows.iter().all(|r| r.has_leading_rank));
    }
}
