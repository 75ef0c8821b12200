//! The remote key-management seam: [`KmsClient`] and its SDK-backed implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_kms::primitives::Blob;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Errors produced by the KMS layer.
#[derive(Debug, Error)]
pub enum KmsError {
    /// The configured KMS key id is empty.
    #[error("invalid KMS key id specified: '{0}'")]
    InvalidKeyId(String),

    /// The remote Encrypt call failed.
    #[error("KMS Encrypt call failed")]
    Encrypt(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote Decrypt call failed.
    #[error("KMS Decrypt call failed")]
    Decrypt(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// KMS reported success but the response carried no payload.
    #[error("KMS response contained no {0}")]
    MissingPayload(&'static str),
}

/// Remote key-management capability: encrypt and decrypt without ever
/// holding key material locally.
///
/// `encryption_context` is authenticated, non-secret metadata bound to the
/// ciphertext; the exact same mapping must be presented on decrypt or the
/// service rejects the call. Implementations must be safe for concurrent use.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KmsClient: Send + Sync {
    /// Encrypt `plaintext` under the managed key named by `key_id`.
    async fn encrypt(
        &self,
        key_id: &str,
        plaintext: &[u8],
        encryption_context: &HashMap<String, String>,
    ) -> Result<Vec<u8>, KmsError>;

    /// Decrypt a ciphertext produced by [`KmsClient::encrypt`]. The managed
    /// key is identified from the ciphertext itself.
    async fn decrypt(
        &self,
        ciphertext: &[u8],
        encryption_context: &HashMap<String, String>,
    ) -> Result<Vec<u8>, KmsError>;
}

/// [`KmsClient`] backed by the AWS SDK.
#[derive(Clone)]
pub struct AwsKms {
    client: aws_sdk_kms::Client,
}

impl AwsKms {
    /// Wrap an already-configured SDK client.
    pub fn new(client: aws_sdk_kms::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS environment (standard credential
    /// chain, shared config). `region` overrides the environment's region
    /// resolution when set.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        Self {
            client: aws_sdk_kms::Client::new(&config),
        }
    }
}

#[async_trait]
impl KmsClient for AwsKms {
    async fn encrypt(
        &self,
        key_id: &str,
        plaintext: &[u8],
        encryption_context: &HashMap<String, String>,
    ) -> Result<Vec<u8>, KmsError> {
        debug!(key_id, "encrypting value with KMS");
        let resp = self
            .client
            .encrypt()
            .key_id(key_id)
            .plaintext(Blob::new(plaintext))
            .set_encryption_context(context_arg(encryption_context))
            .set_grant_tokens(Some(Vec::new()))
            .send()
            .await
            .map_err(|e| KmsError::Encrypt(Box::new(e)))?;

        let ciphertext = resp
            .ciphertext_blob()
            .ok_or(KmsError::MissingPayload("ciphertext"))?;
        Ok(ciphertext.as_ref().to_vec())
    }

    async fn decrypt(
        &self,
        ciphertext: &[u8],
        encryption_context: &HashMap<String, String>,
    ) -> Result<Vec<u8>, KmsError> {
        debug!("decrypting value with KMS");
        let resp = self
            .client
            .decrypt()
            .ciphertext_blob(Blob::new(ciphertext))
            .set_encryption_context(context_arg(encryption_context))
            .set_grant_tokens(Some(Vec::new()))
            .send()
            .await
            .map_err(|e| KmsError::Decrypt(Box::new(e)))?;

        let plaintext = resp
            .plaintext()
            .ok_or(KmsError::MissingPayload("plaintext"))?;
        Ok(plaintext.as_ref().to_vec())
    }
}

/// An empty context is sent as an absent field.
fn context_arg(context: &HashMap<String, String>) -> Option<HashMap<String, String>> {
    (!context.is_empty()).then(|| context.clone())
}
