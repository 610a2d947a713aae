use std::collections::HashMap;

use super::{KeyValueStore, StorageResult};
use crate::error::StorageError;

/// In-memory store with an optional byte budget.
///
/// Usage is counted as the byte length of every key plus its value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_bytes(capacity: usize) -> Self {
        MemoryStore {
            entries: HashMap::new(),
            capacity: Some(capacity),
        }
    }

    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> StorageResult<()> {
        if let Some(capacity) = self.capacity {
            let replaced = self.entries.get(key).map(|old| key.len() + old.len()).unwrap_or(0);
            let available = capacity.saturating_sub(self.used_bytes() - replaced);
            let required = key.len() + value.len();
            if required > available {
                return Err(StorageError::QuotaExceeded {
                    required,
                    available,
                });
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota() {
        let mut store = MemoryStore::with_capacity_bytes(10);
        store.set("k", "12345".into()).unwrap();
        assert_eq!(store.used_bytes(), 6);

        // replacing an entry only counts the difference
        store.set("k", "123456789".into()).unwrap();

        let err = store.set("other", "x".into()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { required: 6, available: 0 }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("123456789"));
    }
}
