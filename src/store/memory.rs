//! In-memory state store
//!
//! Used by tests and by ephemeral runs where durability across processes
//! is not required.

use super::StateStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type BlobKey = (String, String, Option<String>);

/// State store holding blobs in a process-local map
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    blobs: Arc<RwLock<HashMap<BlobKey, Vec<u8>>>>,
}

impl MemoryStateStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently stored
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether the store holds no blobs
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, namespace: &str, key: &str, scope: Option<&str>) -> Result<Vec<u8>> {
        let blobs = self.blobs.read().await;
        blobs
            .get(&(
                namespace.to_string(),
                key.to_string(),
                scope.map(ToString::to_string),
            ))
            .cloned()
            .ok_or_else(|| Error::state_not_found(namespace, key))
    }

    async fn put(
        &self,
        namespace: &str,
        key: &str,
        scope: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(
            (
                namespace.to_string(),
                key.to_string(),
                scope.map(ToString::to_string),
            ),
            bytes,
        );
        Ok(())
    }
}
