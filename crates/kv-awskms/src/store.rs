//! [`AwsKmsStore`]: envelope encryption around any inner [`Store`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kv::{KvError, Store};

use crate::client::{AwsKms, KmsClient, KmsError};
use crate::config::Config;

/// A [`Store`] decorator that encrypts values through AWS KMS before they
/// reach the inner store and decrypts them on retrieval.
///
/// The decorator holds no key material and performs no local cryptography:
/// every `get` issues one remote Decrypt call and every `set` one remote
/// Encrypt call, plus exactly one call into the inner store. Ciphertext is
/// never inspected or validated locally.
///
/// A shared instance is safe for concurrent use as long as the inner store
/// and the KMS client are; the decorator itself holds only immutable
/// configuration.
pub struct AwsKmsStore {
    inner: Arc<dyn Store>,
    kms: Arc<dyn KmsClient>,
    key_id: String,
    encryption_context: HashMap<String, String>,
}

impl AwsKmsStore {
    /// Create a store that encrypts through an existing [`KmsClient`].
    ///
    /// # Errors
    ///
    /// Returns [`KmsError::InvalidKeyId`] if `key_id` is empty.
    pub fn with_client(
        inner: Arc<dyn Store>,
        kms: Arc<dyn KmsClient>,
        key_id: impl Into<String>,
        encryption_context: Option<HashMap<String, String>>,
    ) -> Result<Self, KmsError> {
        let key_id = key_id.into();
        if key_id.is_empty() {
            return Err(KmsError::InvalidKeyId(key_id));
        }

        Ok(Self {
            inner,
            kms,
            key_id,
            encryption_context: encryption_context.unwrap_or_default(),
        })
    }

    /// Create a store with a fresh SDK-backed KMS client built from the
    /// ambient AWS environment. `region` overrides the environment's region
    /// resolution when set.
    ///
    /// # Errors
    ///
    /// Returns [`KmsError::InvalidKeyId`] if `key_id` is empty.
    pub async fn new(
        inner: Arc<dyn Store>,
        region: Option<String>,
        key_id: impl Into<String>,
        encryption_context: Option<HashMap<String, String>>,
    ) -> Result<Self, KmsError> {
        let key_id = key_id.into();
        if key_id.is_empty() {
            return Err(KmsError::InvalidKeyId(key_id));
        }

        let kms = Arc::new(AwsKms::from_env(region).await);
        Self::with_client(inner, kms, key_id, encryption_context)
    }

    /// Create a store from a loaded [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`KmsError::InvalidKeyId`] if the configured key id is empty.
    pub async fn from_config(
        inner: Arc<dyn Store>,
        cfg: &Config,
        encryption_context: Option<HashMap<String, String>>,
    ) -> Result<Self, KmsError> {
        Self::new(
            inner,
            cfg.aws_region.clone(),
            cfg.kms_key_id.clone(),
            encryption_context,
        )
        .await
    }
}

#[async_trait]
impl Store for AwsKmsStore {
    /// Fetch and decrypt the value stored under `key`.
    ///
    /// Decrypted values are treated as text: leading and trailing whitespace
    /// is stripped before the bytes are returned. Values that are
    /// meaningfully binary, or that carry intentional surrounding
    /// whitespace, do not round-trip through this store.
    async fn get(&self, key: &str) -> Result<Vec<u8>, KvError> {
        let ciphertext = self
            .inner
            .get(key)
            .await
            .map_err(|e| KvError::wrap("failed to get data for KMS client", e))?;

        let plaintext = self
            .kms
            .decrypt(&ciphertext, &self.encryption_context)
            .await
            .map_err(|e| KvError::wrap("failed to decrypt with KMS client", e))?;

        Ok(plaintext.trim_ascii().to_vec())
    }

    /// Encrypt `value` and store the ciphertext under `key`.
    ///
    /// The inner store is not touched if encryption fails.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let ciphertext = self
            .kms
            .encrypt(&self.key_id, value, &self.encryption_context)
            .await
            .map_err(|e| KvError::wrap("failed to encrypt with KMS client", e))?;

        self.inner.set(key, &ciphertext).await
    }
}
