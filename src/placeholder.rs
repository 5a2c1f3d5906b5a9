// src/placeholder.rs

use crate::normalize::{CanonicalRecord, Normalizer};
use crate::ranking::position_rank;

/// Filler entrants, in the order they are handed out.
pub static SEEDS: &[(&str, &str)] = &[
    ("Norway", "NOR"),
    ("Germany", "GER"),
    ("United States", "USA"),
    ("Italy", "ITA"),
    ("Canada", "CAN"),
    ("Netherlands", "NED"),
    ("Austria", "AUT"),
    ("Switzerland", "SUI"),
    ("Sweden", "SWE"),
    ("France", "FRA"),
    ("Japan", "JPN"),
    ("South Korea", "KOR"),
];

/// `count` zero-medal records cycling through [`SEEDS`], ranked by position.
pub fn generate(count: usize, normalizer: &Normalizer<'_>) -> Vec<CanonicalRecord> {
    SEEDS
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(pos, (name, code))| CanonicalRecord {
            rank: Some(position_rank(pos)),
            code: code.to_string(),
            display_name: name.to_string(),
            gold: 0,
            silver: 0,
            bronze: 0,
            total: 0,
            flag_url: normalizer.flag_url(Some(*code)),
            is_placeholder: true,
        })
        .collect()
}
