//! JSON file source for publication records

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{RawRecord, RecordSource};

/// Reads the full record list from a JSON array on disk.
///
/// Stands in for the network fetch collaborator when running from the CLI.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<RawRecord>> {
        log::info!("Reading records from {}", self.path.display());

        if !self.path.exists() {
            return Err(anyhow::anyhow!("File not found: {}", self.path.display()));
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let records: Vec<RawRecord> = serde_json::from_str(&contents)?;

        log::info!("Loaded {} raw records", records.len());

        Ok(records)
    }
}
