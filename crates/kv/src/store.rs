//! The key-value store capability.

use async_trait::async_trait;

use crate::error::KvError;

/// A store holding opaque byte values under string keys.
///
/// Implementations must be safe for concurrent use: `get` and `set` may be
/// called from many tasks sharing one instance. Key namespace and uniqueness
/// semantics are owned by the implementation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::NotFound`] if the key has never been set, or a
    /// backend-specific error on retrieval failure.
    async fn get(&self, key: &str) -> Result<Vec<u8>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;
}
