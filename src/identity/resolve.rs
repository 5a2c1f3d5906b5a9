// src/identity/resolve.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::IdentityTable;
use crate::document::RawCell;
use crate::normalize::{clean_display_name, normalize_ws};

static PAREN_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*([A-Z]{3})\s*\)").expect("code regex should compile"));

/// Who a row is about. `code` is `None` when no strategy resolved it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub display_name: String,
    pub code: Option<String>,
}

/// Ways of pulling a NOC code out of a name cell, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeStrategy {
    /// `Italy (ITA)` anywhere in the full cell text; the last one wins.
    ParenthesizedSuffix,
    /// `Italy ITA`: last whitespace token is exactly three uppercase letters.
    TrailingToken,
    /// Display name found in the name → code table.
    NameLookup,
}

/// A resolved code and the literal text it was read from, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeMatch {
    pub code: String,
    pub matched: Option<String>,
}

impl CodeStrategy {
    pub const ORDER: [CodeStrategy; 3] = [
        CodeStrategy::ParenthesizedSuffix,
        CodeStrategy::TrailingToken,
        CodeStrategy::NameLookup,
    ];

    pub fn find(&self, full_text: &str, display_name: &str, table: &IdentityTable) -> Option<CodeMatch> {
        match self {
            CodeStrategy::ParenthesizedSuffix => {
                let caps = PAREN_CODE.captures_iter(full_text).last()?;
                Some(CodeMatch {
                    code: caps[1].to_string(),
                    matched: Some(caps[0].to_string()),
                })
            }
            CodeStrategy::TrailingToken => {
                let token = clean_display_name(full_text)
                    .split_whitespace()
                    .last()?
                    .to_string();
                let is_code = token.len() == 3 && token.bytes().all(|b| b.is_ascii_uppercase());
                is_code.then(|| CodeMatch {
                    code: token.clone(),
                    matched: Some(token),
                })
            }
            CodeStrategy::NameLookup => table.code_for_name(display_name).map(|code| CodeMatch {
                code: code.to_string(),
                matched: None,
            }),
        }
    }
}

/// Resolve a name cell to an identity. `None` means the row is not an entrant
/// (empty name or a totals footer) and must be dropped.
///
/// Hyperlink text is preferred for the display name. Without a link, a code read
/// from the cell text is cut out of the name unless nothing would remain.
pub fn resolve(cell: &RawCell, table: &IdentityTable) -> Option<Identity> {
    let full = normalize_ws(&cell.text);
    let link = cell
        .link_text
        .as_deref()
        .map(clean_display_name)
        .filter(|s| !s.is_empty());
    let from_link = link.is_some();
    let mut display = link.unwrap_or_else(|| clean_display_name(&full));

    let mut code = None;
    for strategy in CodeStrategy::ORDER {
        if let Some(found) = strategy.find(&full, &display, table) {
            trace!(?strategy, code = %found.code, "code resolved");
            if !from_link {
                if let Some(matched) = &found.matched {
                    let stripped = cut_last(&display, matched);
                    if !stripped.is_empty() {
                        display = stripped;
                    }
                }
            }
            code = Some(found.code);
            break;
        }
    }

    let display = clean_display_name(&display);
    if display.is_empty() || display.to_lowercase().starts_with("totals") {
        return None;
    }
    Some(Identity {
        display_name: display,
        code,
    })
}

fn cut_last(haystack: &str, needle: &str) -> String {
    match haystack.rfind(needle) {
        Some(at) => {
            let joined = format!("{} {}", &haystack[..at], &haystack[at + needle.len()..]);
            clean_display_name(&joined)
        }
        None => haystack.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str, link: Option<&str>) -> RawCell {
        RawCell {
            text: text.to_string(),
            link_text: link.map(str::to_string),
        }
    }

    fn synthetic() -> IdentityTable {
        IdentityTable::new(
            [("Atlantis".to_string(), "ATL".to_string())],
            [("ATL".to_string(), "at".to_string())],
        )
    }

    #[test]
    fn test_parenthesized_code_without_link() {
        let id = resolve(&cell("Italy (ITA)", None), &synthetic()).unwrap();
        assert_eq!(id.code.as_deref(), Some("ITA"));
        assert_eq!(id.display_name, "Italy");
    }

    #[test]
    fn test_link_text_keeps_code_out_of_name() {
        let id = resolve(&cell("Italy ITA", Some("Italy")), &synthetic()).unwrap();
        assert_eq!(id.code.as_deref(), Some("ITA"));
        assert_eq!(id.display_name, "Italy");
    }

    #[test]
    fn test_parenthesized_beats_trailing_token() {
        let id = resolve(&cell("Foo (FOO) BAR", None), &synthetic()).unwrap();
        assert_eq!(id.code.as_deref(), Some("FOO"));
    }

    #[test]
    fn test_trailing_token_beats_table() {
        let id = resolve(&cell("Atlantis XYZ", Some("Atlantis")), &synthetic()).unwrap();
        assert_eq!(id.code.as_deref(), Some("XYZ"));
    }

    #[test]
    fn test_table_lookup_last() {
        let id = resolve(&cell("Atlantis*", None), &synthetic()).unwrap();
        assert_eq!(id.code.as_deref(), Some("ATL"));
        assert_eq!(id.display_name, "Atlantis");
    }

    #[test]
    fn test_unresolved_code_is_none_not_dropped() {
        let id = resolve(&cell("Lemuria", None), &synthetic()).unwrap();
        assert_eq!(id.code, None);
        assert_eq!(id.display_name, "Lemuria");
    }

    #[test]
    fn test_host_marker_stripped_from_link_text() {
        let id = resolve(&cell("Italy* (ITA)", Some("Italy*")), &synthetic()).unwrap();
        assert_eq!(id.display_name, "Italy");
        assert_eq!(id.code.as_deref(), Some("ITA"));
    }

    #[test]
    fn test_code_only_cell_keeps_code_as_name() {
        let id = resolve(&cell("USA", None), &synthetic()).unwrap();
        assert_eq!(id.display_name, "USA");
        assert_eq!(id.code.as_deref(), Some("USA"));
    }

    #[test]
    fn test_footer_and_empty_rows_dropped() {
        let table = synthetic();
        assert!(resolve(&cell("Totals (29 entries)", None), &table).is_none());
        assert!(resolve(&cell("TOTALS", None), &table).is_none());
        assert!(resolve(&cell(" * ", None), &table).is_none());
        assert!(resolve(&cell("", None), &table).is_none());
    }

    #[test]
    fn test_strategies_in_isolation() {
        let table = synthetic();
        assert_eq!(
            CodeStrategy::TrailingToken.find("Italy (ITA)", "Italy", &table),
            None
        );
        assert_eq!(
            CodeStrategy::NameLookup
                .find("whatever", "atlantis", &table)
                .map(|m| m.code),
            Some("ATL".to_string())
        );
    }
}
