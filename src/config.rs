// src/config.rs

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf};
use tracing::debug;

use crate::ranking::RankingMode;

/// Which capability shape the raw document is read as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Queryable HTML tree: table → row → cell.
    Structured,
    /// Flat text searched from an anchor phrase.
    Text,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Structured => "structured",
            SourceMode::Text => "text",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "structured" | "html" => Some(SourceMode::Structured),
            "text" => Some(SourceMode::Text),
            _ => None,
        }
    }
}

/// Whether every data row carries its own rank cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankColumn {
    Always,
    MayOmit,
}

impl RankColumn {
    /// Rows with fewer cells than this are rejected.
    pub fn min_cells(&self) -> usize {
        match self {
            RankColumn::Always => 6,
            RankColumn::MayOmit => 5,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "always" => Some(RankColumn::Always),
            "may_omit" | "omit" => Some(RankColumn::MayOmit),
            _ => None,
        }
    }
}

/// Everything a single run needs. Every field has a default so a YAML file
/// only has to name what it changes.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    /// Local file to read instead of fetching `source_url`.
    pub source_path: Option<PathBuf>,
    pub source_mode: SourceMode,
    pub anchor: String,
    /// Bytes of text following the anchor that the text fallback scans.
    pub text_window: usize,
    pub rank_column: RankColumn,
    pub ranking: RankingMode,
    /// 0 keeps every record.
    pub top_n: usize,
    /// 0 disables the placeholder fallback.
    pub placeholder_count: usize,
    pub flag_url_template: String,
    /// JSON file replacing the built-in identity table.
    pub identity_table: Option<PathBuf>,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: "https://en.wikipedia.org/wiki/2026_Winter_Olympics_medal_table".into(),
            source_path: None,
            source_mode: SourceMode::Structured,
            anchor: "Medal table".into(),
            text_window: 4000,
            rank_column: RankColumn::MayOmit,
            ranking: RankingMode::Preserve,
            top_n: 0,
            placeholder_count: 0,
            flag_url_template: "https://flagcdn.com/w40/{iso2}.png".into(),
            identity_table: None,
            output: PathBuf::from("medals.json"),
        }
    }
}

impl Config {
    /// Defaults, then the YAML file named by `MEDALS_CONFIG` (if any), then
    /// `MEDALS_*` environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var("MEDALS_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| env::var(key).ok())?;
        debug!(?cfg, "configuration loaded");
        Ok(cfg)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        serde_yaml::from_str(&raw).with_context(|| format!("parsing config file {:?}", path))
    }

    /// Apply `MEDALS_*` overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("MEDALS_SOURCE_URL") {
            self.source_url = v;
        }
        if let Some(v) = get("MEDALS_SOURCE_PATH") {
            self.source_path = Some(PathBuf::from(v));
        }
        if let Some(v) = get("MEDALS_SOURCE_MODE") {
            self.source_mode = SourceMode::from_str(&v)
                .ok_or_else(|| anyhow!("MEDALS_SOURCE_MODE: unknown mode {:?}", v))?;
        }
        if let Some(v) = get("MEDALS_ANCHOR") {
            self.anchor = v;
        }
        if let Some(v) = get("MEDALS_TEXT_WINDOW") {
            self.text_window = parse_usize("MEDALS_TEXT_WINDOW", &v)?;
        }
        if let Some(v) = get("MEDALS_RANK_COLUMN") {
            self.rank_column = RankColumn::from_str(&v)
                .ok_or_else(|| anyhow!("MEDALS_RANK_COLUMN: unknown value {:?}", v))?;
        }
        if let Some(v) = get("MEDALS_RANKING") {
            self.ranking = RankingMode::from_str(&v)
                .ok_or_else(|| anyhow!("MEDALS_RANKING: unknown mode {:?}", v))?;
        }
        if let Some(v) = get("MEDALS_TOP_N") {
            self.top_n = parse_usize("MEDALS_TOP_N", &v)?;
        }
        if let Some(v) = get("MEDALS_PLACEHOLDER_COUNT") {
            self.placeholder_count = parse_usize("MEDALS_PLACEHOLDER_COUNT", &v)?;
        }
        if let Some(v) = get("MEDALS_FLAG_URL_TEMPLATE") {
            self.flag_url_template = v;
        }
        if let Some(v) = get("MEDALS_IDENTITY_TABLE") {
            self.identity_table = Some(PathBuf::from(v));
        }
        if let Some(v) = get("MEDALS_OUTPUT") {
            self.output = PathBuf::from(v);
        }
        Ok(())
    }

    /// Human-readable origin of the document, carried into the payload.
    pub fn source_descriptor(&self) -> String {
        match &self.source_path {
            Some(p) => p.display().to_string(),
            None => self.source_url.clone(),
        }
    }
}

fn parse_usize(key: &str, v: &str) -> Result<usize> {
    v.trim()
        .parse()
        .with_context(|| format!("{}: expected a non-negative integer, got {:?}", key, v))
}
