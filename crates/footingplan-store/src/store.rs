//! Configuration Store backends.
//!
//! [`ConfigStore`] is the only thing the renderer sees: list, get, put and
//! delete of [`ConfigRecord`]s. Two backends are provided:
//! - [`InMemoryConfigStore`] keeps records in a lock-guarded map
//! - [`JsonFileConfigStore`] mirrors the in-memory map to one JSON file and
//!   rewrites the file after every mutation; a failed write leaves the
//!   map untouched
//!
//! Listing order is by name, then id, so output is stable across runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::model::ConfigRecord;

/// Storage for named structural configurations.
pub trait ConfigStore: Send + Sync {
    /// All records, sorted by name then id.
    fn list(&self) -> StoreResult<Vec<ConfigRecord>>;

    fn get(&self, id: &str) -> StoreResult<Option<ConfigRecord>>;

    /// Inserts or replaces the record with the same id.
    fn put(&self, record: ConfigRecord) -> StoreResult<()>;

    /// Removes a record. Fails with [`StoreError::NotFound`] for unknown ids.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Inserts a record that must not exist yet.
    fn create(&self, record: ConfigRecord) -> StoreResult<()> {
        if self.get(&record.id)?.is_some() {
            return Err(StoreError::AlreadyExists(record.id));
        }
        self.put(record)
    }

    /// Like [`get`](Self::get) but a missing record is an error.
    fn require(&self, id: &str) -> StoreResult<ConfigRecord> {
        self.get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Records whose name contains `query`, ignoring case.
    fn find_by_name(&self, query: &str) -> StoreResult<Vec<ConfigRecord>> {
        let query = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.name.to_lowercase().contains(&query))
            .collect())
    }
}

fn sorted(records: impl Iterator<Item = ConfigRecord>) -> Vec<ConfigRecord> {
    let mut records: Vec<_> = records.collect();
    records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    records
}

#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    records: RwLock<BTreeMap<String, ConfigRecord>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `records`. Later duplicates replace earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = ConfigRecord>) -> StoreResult<Self> {
        let store = Self::new();
        for record in records {
            store.put(record)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn list(&self) -> StoreResult<Vec<ConfigRecord>> {
        Ok(sorted(self.records.read().values().cloned()))
    }

    fn get(&self, id: &str) -> StoreResult<Option<ConfigRecord>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn put(&self, record: ConfigRecord) -> StoreResult<()> {
        record.validate()?;
        debug!("Storing configuration {} ({})", record.id, record.name);
        self.records.write().insert(record.id.clone(), record);
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.records
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Store backed by a single JSON array file.
#[derive(Debug)]
pub struct JsonFileConfigStore {
    path: PathBuf,
    inner: InMemoryConfigStore,
}

impl JsonFileConfigStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let records: Vec<ConfigRecord> = serde_json::from_str(&content)?;
            InMemoryConfigStore::with_records(records)?
        } else {
            InMemoryConfigStore::new()
        };
        info!(
            "Opened configuration store {} ({} records)",
            path.display(),
            inner.len()
        );
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the records and writes that copy to
    /// disk. The in-memory map is only replaced once the file write succeeds.
    fn commit<F>(&self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, ConfigRecord>) -> StoreResult<()>,
    {
        let mut records = self.inner.records.write();
        let mut next = records.clone();
        change(&mut next)?;
        write_records_file(&self.path, &sorted(next.values().cloned()))?;
        *records = next;
        Ok(())
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn list(&self) -> StoreResult<Vec<ConfigRecord>> {
        self.inner.list()
    }

    fn get(&self, id: &str) -> StoreResult<Option<ConfigRecord>> {
        self.inner.get(id)
    }

    fn put(&self, record: ConfigRecord) -> StoreResult<()> {
        record.validate()?;
        let id = record.id.clone();
        self.commit(|records| {
            records.insert(record.id.clone(), record);
            Ok(())
        })?;
        info!("Saved configuration {} to {}", id, self.path.display());
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.commit(|records| {
            records
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        })?;
        info!("Deleted configuration {} from {}", id, self.path.display());
        Ok(())
    }
}

/// Writes `records` as a pretty JSON array. The content goes to a sibling
/// file first and is renamed over `path`, so readers never see half a file.
pub(crate) fn write_records_file(path: &Path, records: &[ConfigRecord]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(records)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, content)?;
    fs::rename(&staging, path)?;
    Ok(())
}
