//! Persistence of uploaded datasets and their chart settings
//!
//! Everything is kept in a flat key-value store: one entry for the dataset
//! catalogue, one per dataset for its rows, and one per dataset for its chart
//! settings. Values are JSON. A corrupted entry reads as absent.

mod file;
mod memory;
mod settings;

use chrono::{DateTime, Local, Utc};
use log::{info, warn};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::dataset::Dataset;
use crate::error::{Result, StorageError};

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::settings::ChartSettings;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> StorageResult<()>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// Catalogue entry for a stored dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    /// Size of the stored JSON rows
    pub size_bytes: usize,
}

/// Dataset catalogue on top of a [`KeyValueStore`].
#[derive(Debug)]
pub struct DatasetStore<S: KeyValueStore> {
    store: S,
    keys: StorageConfig,
}

impl<S: KeyValueStore> DatasetStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, StorageConfig::default())
    }

    pub fn with_config(store: S, keys: StorageConfig) -> Self {
        DatasetStore { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn data_key(&self, id: &str) -> String {
        format!("{}{}", self.keys.data_prefix, id)
    }

    fn settings_key(&self, id: &str) -> String {
        format!("{}{}", self.keys.settings_prefix, id)
    }

    /// All catalogue entries, oldest first.
    pub fn list(&self) -> Vec<DatasetMeta> {
        self.read_json(&self.keys.list_key).unwrap_or_default()
    }

    /// Stores a new dataset and returns its generated id.
    ///
    /// A blank name is replaced by `Unnamed Data <local time>`. On failure no
    /// partial entry is left behind.
    pub fn add(&mut self, name: &str, dataset: &Dataset) -> Result<String> {
        let id = generate_id();
        let name = if name.trim().is_empty() {
            format!("Unnamed Data {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
        } else {
            name.to_string()
        };

        let size_bytes = self.write_rows(&id, dataset)?;
        let meta = DatasetMeta {
            id: id.clone(),
            name,
            timestamp: Utc::now(),
            size_bytes,
        };

        let mut list = self.list();
        list.push(meta);
        if let Err(err) = self.write_json(&self.keys.list_key.clone(), &list) {
            let data_key = self.data_key(&id);
            if let Err(rollback) = self.store.remove(&data_key) {
                warn!("failed to roll back '{}': {}", data_key, rollback);
            }
            return Err(err);
        }

        info!("stored dataset {} ({} rows, {} bytes)", id, dataset.len(), size_bytes);
        Ok(id)
    }

    /// Replaces the rows of a dataset, registering the id if it is new.
    pub fn put(&mut self, id: &str, dataset: &Dataset) -> Result<()> {
        check_id(id)?;
        let size_bytes = self.write_rows(id, dataset)?;

        let mut list = self.list();
        match list.iter_mut().find(|meta| meta.id == id) {
            Some(meta) => {
                meta.timestamp = Utc::now();
                meta.size_bytes = size_bytes;
            }
            None => list.push(DatasetMeta {
                id: id.to_string(),
                name: id.to_string(),
                timestamp: Utc::now(),
                size_bytes,
            }),
        }
        self.write_json(&self.keys.list_key.clone(), &list)
    }

    pub fn get(&self, id: &str) -> Option<Dataset> {
        if id.is_empty() {
            return None;
        }
        self.read_json(&self.data_key(id))
    }

    /// Removes a dataset and its settings. Returns whether it was catalogued.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        check_id(id)?;
        let data_key = self.data_key(id);
        let settings_key = self.settings_key(id);
        self.store.remove(&data_key)?;
        self.store.remove(&settings_key)?;

        let mut list = self.list();
        let before = list.len();
        list.retain(|meta| meta.id != id);
        let existed = list.len() != before;
        if existed {
            self.write_json(&self.keys.list_key.clone(), &list)?;
            info!("deleted dataset {}", id);
        }
        Ok(existed)
    }

    pub fn get_settings(&self, id: &str) -> Option<ChartSettings> {
        if id.is_empty() {
            return None;
        }
        self.read_json(&self.settings_key(id))
    }

    pub fn put_settings(&mut self, id: &str, settings: &ChartSettings) -> Result<()> {
        check_id(id)?;
        let key = self.settings_key(id);
        self.write_json(&key, settings)
    }

    fn write_rows(&mut self, id: &str, dataset: &Dataset) -> Result<usize> {
        let encoded = serde_json::to_string(dataset)?;
        let size = encoded.len();
        let key = self.data_key(id);
        self.store.set(&key, encoded)?;
        Ok(size)
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.store.set(key, encoded)?;
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                warn!("failed to read '{}': {}", key, err);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("ignoring corrupted entry '{}': {}", key, err);
                None
            }
        }
    }
}

fn check_id(id: &str) -> StorageResult<()> {
    if id.trim().is_empty() {
        return Err(StorageError::InvalidKey("empty dataset id".into()));
    }
    Ok(())
}

/// `dataset_<unix millis><7 base-36 chars>`
pub fn generate_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let suffix: String = (0..7)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("dataset_{}{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;
    use crate::error::Error;

    /// Store that refuses the catalogue write and every removal.
    #[derive(Default)]
    struct StubbornStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for StubbornStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> StorageResult<()> {
            if key == StorageConfig::default().list_key {
                return Err(StorageError::QuotaExceeded {
                    required: value.len(),
                    available: 0,
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Backend("read-only".into()))
        }
    }

    #[test]
    fn test_failed_rollback_keeps_original_error() {
        let mut store = DatasetStore::new(StubbornStore::default());
        let dataset = Dataset::from_rows(vec![Row::new().with("a", 1.0)]);

        let err = store.add("sales", &dataset).unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::QuotaExceeded { .. })
        ));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let rest = id.strip_prefix("dataset_").unwrap();
        assert!(rest.len() > 7);
        assert!(rest.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        assert_ne!(generate_id(), generate_id());
    }
}
