//! In-memory store backend for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::KvError;
use crate::store::Store;

/// A [`Store`] keeping all values in a process-local hash map.
///
/// Values do not survive process restart. Clones share the same underlying
/// map, so a clone handed to another task observes all writes.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new, empty [`MemoryStore`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, KvError> {
        let map = self.inner.read().await;
        map.get(key)
            .cloned()
            .ok_or_else(|| KvError::NotFound(key.to_owned()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let mut map = self.inner.write().await;
        map.insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}
