use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed key-value store.
///
/// Keeps every key in memory and rewrites the whole file as a JSON object on
/// each mutation. Writes go to a temp file which is synced and then renamed
/// over the original, so a crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: BTreeMap<String, String>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let data: BTreeMap<String, String> =
                    serde_json::from_str(&text).map_err(|e| KVStoreError::CorruptionError {
                        message: format!("{}: {}", path.display(), e),
                    })?;
                info!(path = %path.display(), keys = data.len(), "Loaded key-value store");
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No existing key-value store, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                return Err(KVStoreError::IOError {
                    message: e.to_string(),
                })
            }
        };

        Ok(Self { data, path })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let bytes = serde_json::to_vec(&self.data).map_err(|e| KVStoreError::IOError {
            message: e.to_string(),
        })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;

        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Saved key-value store");
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &str) -> Result<Option<String>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), KVStoreError> {
        let previous = self.data.insert(key.to_string(), value.to_string());
        self.save_to_file().inspect_err(|_| {
            // Keep memory consistent with disk
            match previous {
                Some(old) => {
                    self.data.insert(key.to_string(), old);
                }
                None => {
                    self.data.remove(key);
                }
            }
        })
    }

    fn delete(&mut self, key: &str) -> Result<(), KVStoreError> {
        let Some(previous) = self.data.remove(key) else {
            return Ok(());
        };
        self.save_to_file().inspect_err(|_| {
            self.data.insert(key.to_string(), previous);
        })
    }

    fn exists(&self, key: &str) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileBackedKVStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = FileBackedKVStore::open(&path).unwrap();
            store.put("web3_message_history", "[]").unwrap();
            store.put("other", "value").unwrap();
        }

        let store = FileBackedKVStore::open(&path).unwrap();
        assert_eq!(
            store.get("web3_message_history").unwrap(),
            Some("[]".to_string())
        );
        assert_eq!(store.get("other").unwrap(), Some("value".to_string()));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_delete_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileBackedKVStore::open(&path).unwrap();
        store.put("a", "1").unwrap();
        store.delete("a").unwrap();

        let reopened = FileBackedKVStore::open(&path).unwrap();
        assert!(!reopened.exists("a").unwrap());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");

        let mut store = FileBackedKVStore::open(&path).unwrap();
        store.put("k", "v").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"\x00\x01 not json").unwrap();

        assert!(matches!(
            FileBackedKVStore::open(&path),
            Err(KVStoreError::CorruptionError { .. })
        ));
    }
}
