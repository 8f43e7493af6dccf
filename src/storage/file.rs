//! File-backed storage
//!
//! The whole store is one JSON object mapping keys to string values. It is
//! re-read on every access and rewritten on every mutation, so several
//! processes see each other's writes (last write wins).

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

/// Key-value storage persisted to a single JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use the file at `path`; it is created on first write
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_map(&self) -> Result<IndexMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &IndexMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(map).map_err(|source| StorageError::Encode {
            path: self.path.clone(),
            source,
        })?;

        // Write to a sibling file first so a crash never leaves half a store
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!("Wrote {} keys to {:?}", map.len(), self.path);
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.shift_remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get("anything").unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::new(&path);
        storage.set("blog-admin", "true").unwrap();
        storage.set("blog-theme", "\"dark\"").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("blog-admin").unwrap(), Some("true".to_string()));
        assert_eq!(
            reopened.get("blog-theme").unwrap(),
            Some("\"dark\"".to_string())
        );

        reopened.remove("blog-admin").unwrap();
        assert_eq!(storage.get("blog-admin").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get("blog-posts"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_write_failure_is_not_reported_as_corruption() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let storage = FileStorage::new(blocker.join("storage.json"));
        assert!(matches!(
            storage.set("blog-admin", "true"),
            Err(StorageError::Io { .. })
        ));

        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let encode = StorageError::Encode {
            path: storage.path().to_path_buf(),
            source,
        };
        assert!(encode.to_string().starts_with("Failed to encode storage"));
        assert!(!encode.to_string().contains("corrupt"));
    }
}
