//! File-backed key-value store
//!
//! Each key is a file inside the data directory. Writes go to a temp file
//! first and are renamed into place.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tasklet_core::{CoreError, KeyValueStore};

use crate::error::{CliError, Result};

/// Directory of one-file-per-key values
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            CliError::io(format!("cannot create data directory {}", dir.display()), e)
        })?;
        Ok(Self { dir })
    }

    /// Get the storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> tasklet_core::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CoreError::storage(format!("invalid key '{}'", key)));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> tasklet_core::Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::storage_with_source(
                format!("cannot read {}", path.display()),
                e,
            )),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> tasklet_core::Result<()> {
        let path = self.path_for(key)?;
        let temp_path = self.dir.join(format!(".{}.tmp", key));

        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, &path)
        };

        write().map_err(|e| {
            CoreError::storage_with_source(format!("cannot write {}", path.display()), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.get("tasks").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested")).unwrap();

        store.set("filter", "active").unwrap();
        store.set("filter", "completed").unwrap();

        assert_eq!(store.get("filter").unwrap().as_deref(), Some("completed"));
        assert!(!store.dir().join(".filter.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
