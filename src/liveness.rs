// src/liveness.rs

use crate::normalize::CanonicalRecord;

/// Live iff some record has at least one medal. Totals are not consulted.
pub fn is_live(records: &[CanonicalRecord]) -> bool {
    records.iter().any(|r| r.medal_sum() > 0)
}
