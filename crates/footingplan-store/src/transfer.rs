//! Raw record import and export.
//!
//! Export writes a JSON array of [`ConfigRecord`]s. Import also accepts bare
//! structural parameter objects, either one object or an array of them; each
//! becomes a new record named after the file.

use std::fs;
use std::path::Path;

use footingplan_core::StructuralConfig;
use serde::Deserialize;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::model::ConfigRecord;
use crate::store::{write_records_file, ConfigStore};

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportEntry {
    Record(Box<ConfigRecord>),
    Config(StructuralConfig),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<ImportEntry>),
    One(ImportEntry),
}

/// Reads records from a JSON file.
pub fn import_records(path: &Path) -> StoreResult<Vec<ConfigRecord>> {
    let content = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Imported".to_string());

    let entries = match serde_json::from_str::<ImportFile>(&content) {
        Ok(ImportFile::Many(entries)) => entries,
        Ok(ImportFile::One(entry)) => vec![entry],
        Err(_) => {
            // Re-parse strictly so the error names what is actually wrong.
            let err = serde_json::from_str::<StructuralConfig>(&content)
                .err()
                .map(StoreError::from)
                .unwrap_or_else(|| {
                    StoreError::InvalidRecord(format!("{} holds no records", path.display()))
                });
            return Err(err);
        }
    };

    let single = entries.len() == 1;
    let records = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            ImportEntry::Record(record) => *record,
            ImportEntry::Config(config) => {
                let name = if single {
                    stem.clone()
                } else {
                    format!("{} {}", stem, i + 1)
                };
                ConfigRecord::new(name, config)
            }
        })
        .collect::<Vec<_>>();

    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

/// Writes `records` to `path` as a JSON array.
pub fn export_records(path: &Path, records: &[ConfigRecord]) -> StoreResult<()> {
    write_records_file(path, records)?;
    info!("Exported {} configurations to {}", records.len(), path.display());
    Ok(())
}

/// Imports every record in `path` into `store`. Returns the number stored.
pub fn import_into(store: &dyn ConfigStore, path: &Path) -> StoreResult<usize> {
    let records = import_records(path)?;
    let count = records.len();
    for record in records {
        store.put(record)?;
    }
    info!("Imported {} configurations from {}", count, path.display());
    Ok(count)
}

/// Exports everything in `store` to `path`. Returns the number written.
pub fn export_store(store: &dyn ConfigStore, path: &Path) -> StoreResult<usize> {
    let records = store.list()?;
    export_records(path, &records)?;
    Ok(records.len())
}
