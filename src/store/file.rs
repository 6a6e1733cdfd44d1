//! Filesystem-backed state store
//!
//! Blobs live under `<root>/<namespace>/[<scope>/]<key>`. Writes go to a
//! temp file first, then rename, so a crashed run never leaves a truncated
//! blob behind.

use super::StateStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// State store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FileStateStore {
    root: PathBuf,
}

impl FileStateStore {
    /// Create a new file store rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, namespace: &str, key: &str, scope: Option<&str>) -> PathBuf {
        let mut path = self.root.join(namespace);
        if let Some(scope) = scope {
            path = path.join(scope);
        }
        path.join(key)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, namespace: &str, key: &str, scope: Option<&str>) -> Result<Vec<u8>> {
        let path = self.blob_path(namespace, key, scope);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::state_not_found(namespace, key))
            }
            Err(e) => Err(Error::storage(format!(
                "Failed to read state blob '{}': {e}",
                path.display()
            ))),
        }
    }

    async fn put(
        &self,
        namespace: &str,
        key: &str,
        scope: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let path = self.blob_path(namespace, key, scope);
        let parent = path
            .parent()
            .ok_or_else(|| Error::storage("State blob path has no parent directory"))?;
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::storage(format!(
                "Failed to create state directory '{}': {e}",
                parent.display()
            ))
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            Error::storage(format!(
                "Failed to write state blob '{}': {e}",
                temp_path.display()
            ))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            Error::storage(format!(
                "Failed to rename state blob '{}': {e}",
                path.display()
            ))
        })?;

        Ok(())
    }
}
