//! Storage module - persistent key-value storage behind a small trait
//!
//! Every record the blog keeps (posts, comments, settings, the session
//! flag) is a JSON string stored under a well-known key. Backends only
//! need to provide get/set/remove over string keys.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::{BlogError, Result};

/// Key-value storage service
///
/// Methods take `&self`: callers are single-threaded and several stores
/// share one backend.
pub trait Storage {
    /// Get the raw value stored under `key`
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> std::result::Result<(), StorageError>;

    /// Check if a key exists
    fn contains(&self, key: &str) -> std::result::Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Storage backend errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode storage for {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Names of the keys the blog stores its records under
#[derive(Debug, Clone)]
pub struct Keys {
    prefix: String,
}

impl Keys {
    /// Create a key set with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('-').to_string(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}-{}", self.prefix, name)
    }

    /// The post list
    pub fn posts(&self) -> String {
        self.key("posts")
    }

    /// The per-post comment map
    pub fn comments(&self) -> String {
        self.key("comments")
    }

    /// The settings record
    pub fn settings(&self) -> String {
        self.key("settings")
    }

    /// The admin session flag
    pub fn admin(&self) -> String {
        self.key("admin")
    }

    /// The admin password override
    pub fn admin_password(&self) -> String {
        self.key("admin-password")
    }

    /// The theme preference
    pub fn theme(&self) -> String {
        self.key("theme")
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::new("blog")
    }
}

/// Read and deserialize the JSON value stored under `key`
pub fn load_json<S, T>(storage: &S, key: &str) -> Result<Option<T>>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match storage.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| BlogError::Serialization {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Serialize `value` to JSON and store it under `key`
pub fn store_json<S, T>(storage: &S, key: &str, value: &T) -> Result<()>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| BlogError::Serialization {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw)?;
    Ok(())
}
