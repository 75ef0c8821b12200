//! Filesystem store backend: one file per key under a root directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::error::KvError;
use crate::store::Store;

/// A [`Store`] persisting each value as a file named after its key.
///
/// The key is used verbatim as a file name under the root directory; key
/// namespace rules (allowed characters, nesting) are the caller's concern.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on the
    /// first `set`, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl Store for FileStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, KvError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(KvError::NotFound(key.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        fs::create_dir_all(&self.root).await?;
        fs::write(self.path_for(key), value).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("secret", b"payload").await.unwrap();
        assert_eq!(store.get("secret").await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let err = store.get("absent").await.unwrap_err();
        assert!(matches!(err, KvError::NotFound(ref k) if k == "absent"));
    }

    #[tokio::test]
    async fn values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path())
            .set("durable", b"bytes")
            .await
            .unwrap();
        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("durable").await.unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn set_creates_missing_root_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("not").join("yet");
        let store = FileStore::new(&nested);
        store.set("key", b"v").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), b"v");
    }
}
