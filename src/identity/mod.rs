// src/identity/mod.rs

pub mod builtin;
pub mod resolve;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};
use tracing::info;

use crate::normalize::normalize_ws;

pub use resolve::{resolve, CodeStrategy, Identity};

/// Read-only reference data: display name → NOC code, NOC code → iso2.
/// Both mappings are partial.
#[derive(Clone, Debug, Default)]
pub struct IdentityTable {
    names: HashMap<String, String>,
    iso2: HashMap<String, String>,
}

/// On-disk shape of an identity table.
#[derive(Debug, Deserialize)]
struct IdentityFile {
    #[serde(default)]
    names: HashMap<String, String>,
    #[serde(default)]
    iso2: HashMap<String, String>,
}

impl IdentityTable {
    pub fn new<N, I>(names: N, iso2: I) -> Self
    where
        N: IntoIterator<Item = (String, String)>,
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = Self::default();
        for (name, code) in names {
            table.insert_name(&name, &code);
        }
        for (code, iso) in iso2 {
            table.insert_iso2(&code, &iso);
        }
        table
    }

    /// The table compiled into the crate.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (code, name, iso) in builtin::NOCS {
            table.insert_name(name, code);
            if !iso.is_empty() {
                table.insert_iso2(code, iso);
            }
        }
        for (alias, code) in builtin::ALIASES {
            table.insert_name(alias, code);
        }
        table
    }

    /// Load `{"names": {..}, "iso2": {..}}` from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading identity table {:?}", path))?;
        let file: IdentityFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing identity table {:?}", path))?;
        let table = Self::new(file.names, file.iso2);
        info!(
            names = table.names.len(),
            iso2 = table.iso2.len(),
            "identity table loaded from {}",
            path.display()
        );
        Ok(table)
    }

    pub fn insert_name(&mut self, name: &str, code: &str) {
        self.names
            .insert(name_key(name), code.trim().to_ascii_uppercase());
    }

    pub fn insert_iso2(&mut self, code: &str, iso2: &str) {
        self.iso2.insert(
            code.trim().to_ascii_uppercase(),
            iso2.trim().to_ascii_lowercase(),
        );
    }

    /// Case- and whitespace-insensitive name lookup.
    pub fn code_for_name(&self, name: &str) -> Option<&str> {
        self.names.get(&name_key(name)).map(String::as_str)
    }

    /// Lowercase iso2 for a NOC code.
    pub fn iso2_for_code(&self, code: &str) -> Option<&str> {
        self.iso2
            .get(&code.trim().to_ascii_uppercase())
            .map(String::as_str)
    }
}

fn name_key(name: &str) -> String {
    normalize_ws(name).to_lowercase()
}
