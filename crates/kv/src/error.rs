//! Errors shared by store backends and decorators.

use thiserror::Error;

/// Errors produced by key-value store operations.
#[derive(Debug, Error)]
pub enum KvError {
    /// The requested key does not exist in the store.
    #[error("key '{0}' not found")]
    NotFound(String),

    /// An I/O failure in a store backend.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A failure from a lower layer, annotated with the stage that failed.
    #[error("{context}")]
    Wrapped {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl KvError {
    /// Wrap `source` with a message identifying the stage that failed.
    pub fn wrap(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        KvError::Wrapped {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
