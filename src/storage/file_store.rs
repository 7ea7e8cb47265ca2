use log::debug;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Overrides the directory used by [`FileStore::in_user_data_dir`].
pub const DATA_DIR_ENV: &str = "PICROSSA_DATA_DIR";

/// One pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `$PICROSSA_DATA_DIR`, else `<platform data dir>/picrossa`.
    pub fn in_user_data_dir() -> Result<Self, StorageError> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(Self::new(dir));
            }
        }
        let data_dir = dirs::data_dir().ok_or(StorageError::Unavailable)?;
        Ok(Self::new(data_dir.join("picrossa")))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.data_dir)?;
        let contents = serde_json::to_string_pretty(&value)?;
        fs::write(&path, contents)?;
        debug!(target: "storage", "Wrote {}", path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("picrossa-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_set_get_remove() {
        let dir = scratch_dir();
        let mut store = FileStore::new(&dir);

        assert!(store.get("stats").unwrap().is_none());
        store.set("stats", json!({"total_completed": 2})).unwrap();
        assert!(dir.join("stats.json").exists());
        assert_eq!(
            store.get("stats").unwrap(),
            Some(json!({"total_completed": 2}))
        );

        store.remove("stats").unwrap();
        assert!(store.get("stats").unwrap().is_none());
        // removing twice is fine
        store.remove("stats").unwrap();

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let mut store = FileStore::new(scratch_dir());
        assert!(matches!(
            store.set("../escape", json!(1)),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.json"), "{not json").unwrap();

        let store = FileStore::new(&dir);
        assert!(matches!(store.get("settings"), Err(StorageError::Json(_))));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    #[serial]
    fn test_data_dir_env_override() {
        let dir = scratch_dir();
        std::env::set_var(DATA_DIR_ENV, &dir);
        let store = FileStore::in_user_data_dir().unwrap();
        std::env::remove_var(DATA_DIR_ENV);
        assert_eq!(store.data_dir(), dir.as_path());
    }
}
