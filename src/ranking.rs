// src/ranking.rs

use serde::Deserialize;
use std::cmp::Ordering;

use crate::normalize::CanonicalRecord;

/// Exactly one mode governs a run; it comes from configuration, never from the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Keep the rank the source declared (position when it declared none).
    #[default]
    Preserve,
    /// Ignore source ranks and order by medal counts.
    Recompute,
}

impl RankingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMode::Preserve => "preserve",
            RankingMode::Recompute => "recompute",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "preserve" => Some(RankingMode::Preserve),
            "recompute" => Some(RankingMode::Recompute),
            _ => None,
        }
    }
}

/// Order `records` and settle every rank according to `mode`.
pub fn apply(mut records: Vec<CanonicalRecord>, mode: RankingMode) -> Vec<CanonicalRecord> {
    match mode {
        RankingMode::Preserve => {
            for (pos, rec) in records.iter_mut().enumerate() {
                if rec.rank.is_none() {
                    rec.rank = Some(position_rank(pos));
                }
            }
            // stable: equal declared ranks keep source order
            records.sort_by_key(|r| r.rank);
        }
        RankingMode::Recompute => {
            records.sort_by(by_medals);
            for (pos, rec) in records.iter_mut().enumerate() {
                rec.rank = Some(position_rank(pos));
            }
        }
    }
    records
}

/// 1-based rank for a 0-based position, saturating at `u32::MAX`.
pub fn position_rank(pos: usize) -> u32 {
    u32::try_from(pos.saturating_add(1)).unwrap_or(u32::MAX)
}

/// gold, silver, bronze, total (all descending), then display name ascending.
pub fn by_medals(a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
    b.gold
        .cmp(&a.gold)
        .then_with(|| b.silver.cmp(&a.silver))
        .then_with(|| b.bronze.cmp(&a.bronze))
        .then_with(|| b.total.cmp(&a.total))
        .then_with(|| a.display_name.cmp(&b.display_name))
}
