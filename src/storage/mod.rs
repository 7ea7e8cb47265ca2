//! Key-value persistence for sessions, settings and stats.
//!
//! Persistence is best-effort: the `*_record` helpers log failures and
//! report them as `false`/`None` so gameplay never stops on a bad disk.

mod file_store;
mod memory_store;
mod storage_error;

use log::{error, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use file_store::{FileStore, DATA_DIR_ENV};
pub use memory_store::MemoryStore;
pub use storage_error::StorageError;

pub const CURRENT_GAME_KEY: &str = "current_game";
pub const SETTINGS_KEY: &str = "settings";
pub const STATS_KEY: &str = "stats";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

pub fn save_record<S, T>(store: &mut S, key: &str, record: &T) -> bool
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let result = serde_json::to_value(record)
        .map_err(StorageError::from)
        .and_then(|value| store.set(key, value));
    match result {
        Ok(()) => {
            trace!(target: "storage", "Saved {}", key);
            true
        }
        Err(err) => {
            error!(target: "storage", "Error saving {}: {}", key, err);
            false
        }
    }
}

pub fn load_record<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let value = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(err) => {
            error!(target: "storage", "Error loading {}: {}", key, err);
            return None;
        }
    };
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            error!(target: "storage", "Discarding unreadable {}: {}", key, err);
            None
        }
    }
}

pub fn remove_record<S>(store: &mut S, key: &str) -> bool
where
    S: KeyValueStore + ?Sized,
{
    match store.remove(key) {
        Ok(()) => true,
        Err(err) => {
            error!(target: "storage", "Error removing {}: {}", key, err);
            false
        }
    }
}
