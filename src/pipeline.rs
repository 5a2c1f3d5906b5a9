// src/pipeline.rs

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::document::{extract_rows, locate, Document};
use crate::identity::IdentityTable;
use crate::normalize::{CanonicalRecord, Normalizer};
use crate::{liveness, placeholder, ranking};

/// Ordered records plus whether they reflect real results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    pub records: Vec<CanonicalRecord>,
    pub is_live: bool,
}

/// document → region → rows → records → liveness → ranking → top-N.
///
/// Never fails: a missing region yields empty, non-live standings and bad rows
/// are dropped one at a time.
#[instrument(level = "info", skip_all, fields(mode = doc.mode().as_str(), ranking = cfg.ranking.as_str()))]
pub fn extract(doc: &Document, table: &IdentityTable, cfg: &Config) -> Standings {
    let Some(region) = locate(doc, cfg.text_window) else {
        warn!("no standings region found");
        return Standings::default();
    };

    let (layout, rows) = extract_rows(&region, cfg.rank_column);
    let normalizer = Normalizer::new(table, &cfg.flag_url_template);
    let records: Vec<CanonicalRecord> = rows
        .iter()
        .filter_map(|row| normalizer.record(row, &layout))
        .collect();

    let is_live = liveness::is_live(&records);
    let mut records = ranking::apply(records, cfg.ranking);
    if cfg.top_n > 0 {
        records.truncate(cfg.top_n);
    }
    info!(rows = rows.len(), records = records.len(), is_live, "extracted standings");

    Standings { records, is_live }
}

/// [`extract`], then placeholders in place of non-live data when
/// `placeholder_count` asks for them. Liveness stays false either way.
pub fn run(doc: &Document, table: &IdentityTable, cfg: &Config) -> Standings {
    let standings = extract(doc, table, cfg);
    if standings.is_live || cfg.placeholder_count == 0 {
        return standings;
    }
    info!(count = cfg.placeholder_count, "not live; substituting placeholders");
    let normalizer = Normalizer::new(table, &cfg.flag_url_template);
    Standings {
        records: placeholder::generate(cfg.placeholder_count, &normalizer),
        is_live: false,
    }
}
