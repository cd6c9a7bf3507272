use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;

/// In-memory key-value store for unit tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: HashMap<String, String>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &str) -> Result<Option<String>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), KVStoreError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}
