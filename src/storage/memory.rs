//! In-memory storage - used in tests and as a throwaway backend

use indexmap::IndexMap;
use std::cell::RefCell;

use super::{Storage, StorageError};

/// In-memory key-value storage
///
/// Data is lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<IndexMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().shift_remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let storage = MemoryStorage::new();
        storage.set("key1", "value1").unwrap();
        assert_eq!(storage.get("key1").unwrap(), Some("value1".to_string()));
        assert!(storage.contains("key1").unwrap());
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove() {
        let storage = MemoryStorage::new();
        storage.set("key1", "value1").unwrap();
        storage.remove("key1").unwrap();
        storage.remove("never-set").unwrap();
        assert_eq!(storage.get("key1").unwrap(), None);
        assert!(storage.is_empty());
    }
}
