//! Loading catalog text and engine configuration from disk

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

use super::{CatalogStore, LoadReport};
use crate::config::EngineConfig;

/// Read a TLE catalog file; files ending in `.gz` are decompressed
pub fn load_catalog_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    log::info!("Loading TLE catalog from {:?}", path);

    let file = File::open(path)
        .with_context(|| format!("Failed to open TLE catalog: {:?}", path))?;
    let mut reader = BufReader::new(file);

    let mut text = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(reader)
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to decompress TLE catalog: {:?}", path))?;
    } else {
        reader
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read TLE catalog: {:?}", path))?;
    }

    log::info!("Read {} bytes of catalog text", text.len());
    Ok(text)
}

/// Load and validate an engine configuration from JSON
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    log::info!("Loading engine config from {:?}", path);

    let file =
        File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;
    let config: EngineConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| "Failed to parse engine config JSON")?;
    config.validate()?;

    Ok(config)
}

/// Statistics about a loaded dataset
#[derive(Debug, Default, PartialEq)]
pub struct CatalogStats {
    pub parsed_records: usize,
    pub stored_entries: usize,
    pub entries_with_orbit: usize,
    pub skipped_records: usize,
    pub duplicate_ids: usize,
    pub clicked_entries: usize,
}

impl CatalogStats {
    pub fn from_store(store: &CatalogStore, report: &LoadReport) -> Self {
        let mut stats = Self {
            parsed_records: report.parsed,
            stored_entries: store.len(),
            skipped_records: report.skipped.len(),
            duplicate_ids: report.duplicates.len(),
            ..Default::default()
        };

        store.for_each(|entry| {
            if entry.has_orbit() {
                stats.entries_with_orbit += 1;
            }
            if entry.selection.clicked {
                stats.clicked_entries += 1;
            }
        });

        stats
    }
}
