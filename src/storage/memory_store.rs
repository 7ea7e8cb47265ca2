use serde_json::Value;
use std::collections::HashMap;

use super::{KeyValueStore, StorageError};

/// In-process store. `failing()` builds one that rejects every call, for
/// exercising the best-effort paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, Value>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            records: HashMap::new(),
            failing: true,
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.check()?;
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.check()?;
        self.records.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.records.remove(key);
        Ok(())
    }
}
