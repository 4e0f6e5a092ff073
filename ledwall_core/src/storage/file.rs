//! # File-Backed Store
//!
//! A [`KeyValueStore`] that keeps each key as a JSON file in a data
//! directory. Writes are safe against interruption and concurrent writers:
//!
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **Write locking**: an exclusive OS lock (via fs2) on `<key>.json.lock`
//!   is held for the duration of each write or remove
//!
//! ## Example
//!
//! ```rust,no_run
//! use ledwall_core::storage::{FileStore, KeyValueStore};
//!
//! let mut store = FileStore::open("./ledwall-data")?;
//! store.set("led-calculator-presets", "[]")?;
//! # Ok::<(), ledwall_core::storage::StoreError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{KeyValueStore, StoreError};

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::unavailable(format!("cannot create {}: {}", dir.display(), e))
        })?;
        log::debug!("file store opened at {}", dir.display());
        Ok(FileStore { dir })
    }

    /// Root directory of this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem_for(key)))
    }
}

/// Map a key to a safe file stem: anything outside `[A-Za-z0-9._-]` becomes `_`.
fn file_stem_for(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Exclusive lock on a key, released (and lock file removed) on drop.
struct KeyLock {
    lock_path: PathBuf,
    _lock_file: File,
}

impl KeyLock {
    fn acquire(path: &Path, key: &str) -> Result<Self, StoreError> {
        let lock_path = path.with_extension("json.lock");

        let lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| StoreError::io("create lock", key, e.to_string()))?;

        // Non-blocking: a concurrent writer is reported, not waited on
        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::io("lock", key, "locked by another process"))?;

        Ok(KeyLock {
            lock_path,
            _lock_file: lock_file,
        })
    }
}

impl Drop for KeyLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
        // OS lock is released when _lock_file is dropped
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io("read", key, e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let _lock = KeyLock::acquire(&path, key)?;

        let tmp_path = path.with_extension("json.tmp");

        let mut tmp_file =
            File::create(&tmp_path).map_err(|e| StoreError::io("create temp file", key, e.to_string()))?;

        tmp_file
            .write_all(value.as_bytes())
            .map_err(|e| StoreError::io("write temp file", key, e.to_string()))?;

        tmp_file
            .sync_all()
            .map_err(|e| StoreError::io("sync temp file", key, e.to_string()))?;

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::io("rename to final", key, e.to_string())
        })?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let _lock = KeyLock::acquire(&path, key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io("remove", key, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_store_dir(name: &str) -> PathBuf {
        let dir = temp_dir().join(format!("ledwall_test_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_stem_sanitizing() {
        assert_eq!(file_stem_for("led-calculator-presets"), "led-calculator-presets");
        assert_eq!(file_stem_for("a/b c"), "a_b_c");
        assert_eq!(file_stem_for("../etc"), ".._etc");
    }

    #[test]
    fn test_set_get_remove() {
        let dir = temp_store_dir("roundtrip");
        let mut store = FileStore::open(&dir).unwrap();

        assert_eq!(store.get("presets").unwrap(), None);

        store.set("presets", "[1,2,3]").unwrap();
        assert_eq!(store.get("presets").unwrap().as_deref(), Some("[1,2,3]"));

        store.set("presets", "[]").unwrap();
        assert_eq!(store.get("presets").unwrap().as_deref(), Some("[]"));

        store.remove("presets").unwrap();
        assert_eq!(store.get("presets").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_or_lock() {
        let dir = temp_store_dir("atomic");
        let mut store = FileStore::open(&dir).unwrap();

        store.set("presets", "[]").unwrap();

        let path = store.path_for("presets");
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(!path.with_extension("json.lock").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = temp_store_dir("remove_missing");
        let mut store = FileStore::open(&dir).unwrap();
        assert!(store.remove("nothing-here").is_ok());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_availability_check() {
        let dir = temp_store_dir("available");
        let mut store = FileStore::open(&dir).unwrap();
        assert!(store.is_available());
        assert!(!store.path_for("__storage_test__").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
