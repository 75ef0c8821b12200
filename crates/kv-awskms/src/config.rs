//! Configuration loading and validation for the KMS store.
//!
//! Values are read from environment variables. The encryption context is a
//! construction-time parameter only and is never sourced from the
//! environment.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated KMS store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Id, ARN, or alias of the KMS key used for encryption. **Required.**
    pub kms_key_id: String,

    /// AWS region for the KMS client. Falls back to the SDK's own region
    /// resolution when unset.
    #[serde(default)]
    pub aws_region: Option<String>,
}

impl Config {
    /// Load and validate configuration from environment variables
    /// (`KMS_KEY_ID`, `AWS_REGION`).
    ///
    /// # Errors
    ///
    /// Returns an error if `KMS_KEY_ID` is absent or empty.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.kms_key_id.trim().is_empty() {
            anyhow::bail!("KMS_KEY_ID is required and must not be empty");
        }
        Ok(())
    }
}
