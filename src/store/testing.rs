use super::{KeyValueStore, MemoryStore};
use crate::error::StoreError;

/// `MemoryStore` that returns a backend error for chosen keys.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_get: Option<String>,
    pub fail_set: Option<String>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn backend_error() -> StoreError {
    StoreError::Backend(rusqlite::Error::InvalidQuery)
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_get.as_deref() == Some(key) {
            return Err(backend_error());
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_set.as_deref() == Some(key) {
            return Err(backend_error());
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.clear()
    }
}
