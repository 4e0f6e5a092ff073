//! # Key-Value Storage
//!
//! The preset store persists through a small string-keyed store abstraction.
//! Any backend that can get, set and remove strings works: a browser's local
//! storage behind WASM bindings, a directory of JSON files, or plain memory.
//!
//! Backends may be unavailable (e.g. storage disabled by the user) or fail on
//! individual operations; both are reported as [`StoreError`].
//!
//! ## Example
//!
//! ```rust
//! use ledwall_core::storage::{KeyValueStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.set("greeting", "hello").unwrap();
//! assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
//! ```

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

use std::collections::HashMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

/// Key written to check whether a store accepts writes
const AVAILABILITY_KEY: &str = "__storage_test__";

/// Failure of a key-value store operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store cannot be used at all
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// A single operation failed
    #[error("{operation} failed for '{key}': {reason}")]
    Io {
        operation: String,
        key: String,
        reason: String,
    },
}

impl StoreError {
    /// Create an Unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::Unavailable {
            reason: reason.into(),
        }
    }

    /// Create an Io error
    pub fn io(operation: impl Into<String>, key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Io {
            operation: operation.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// String-keyed persistence medium.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Check that the store accepts a write and a remove.
    fn is_available(&mut self) -> bool {
        self.set(AVAILABILITY_KEY, AVAILABILITY_KEY).is_ok() && self.remove(AVAILABILITY_KEY).is_ok()
    }
}

/// In-memory store. Can be built unavailable to exercise failure paths.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    available: bool,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty, available store
    pub fn new() -> Self {
        MemoryStore {
            entries: HashMap::new(),
            available: true,
            read_only: false,
        }
    }

    /// Create a store that rejects every operation
    pub fn unavailable() -> Self {
        MemoryStore {
            entries: HashMap::new(),
            available: false,
            read_only: false,
        }
    }

    /// Toggle availability, keeping stored entries
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Make writes and removes fail while reads keep working
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::unavailable("memory store disabled"))
        }
    }

    fn check_writable(&self, operation: &str, key: &str) -> Result<(), StoreError> {
        self.check()?;
        if self.read_only {
            return Err(StoreError::io(operation, key, "store is read-only"));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable("set", key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check_writable("remove", key)?;
        self.entries.remove(key);
        Ok(())
    }
}
