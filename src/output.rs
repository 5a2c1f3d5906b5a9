// src/output.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::info;

use crate::normalize::CanonicalRecord;
use crate::pipeline::Standings;

/// The persisted document handed to downstream consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub updated_at: DateTime<Utc>,
    pub source: String,
    pub is_live: bool,
    pub records: Vec<CanonicalRecord>,
}

impl Payload {
    pub fn new(source: impl Into<String>, standings: Standings) -> Self {
        Self {
            updated_at: Utc::now(),
            source: source.into(),
            is_live: standings.is_live,
            records: standings.records,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing payload")
    }
}

/// Write `payload` as JSON, replacing `path` only once the write succeeded.
pub fn write_payload<P: AsRef<Path>>(path: P, payload: &Payload) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {:?}", dir))?;
    serde_json::to_writer_pretty(&mut tmp, payload).context("serializing payload")?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("replacing {:?}", path))?;
    info!(
        path = %path.display(),
        records = payload.records.len(),
        is_live = payload.is_live,
        "payload written"
    );
    Ok(())
}
