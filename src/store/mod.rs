//! Keyed blob store for task state
//!
//! A `StateStore` holds opaque byte blobs keyed by a namespace, a key, and an
//! optional scope (the task-run identity). The incremental state cache uses it
//! to shadow the local state file between runs.
//!
//! # Overview
//!
//! The store module provides:
//! - `StateStore` - the blob store trait consumed by the cache
//! - `FileStateStore` - filesystem-backed store
//! - `MemoryStateStore` - in-memory store for tests and ephemeral runs

mod file;
mod memory;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

use crate::error::Result;
use async_trait::async_trait;

/// Keyed blob store consumed by the incremental state cache
///
/// A missing entry is signalled as `Error::StateNotFound`, which callers must
/// treat as the expected first-run case, distinct from real storage failures.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Fetch the blob stored under (namespace, key, scope)
    async fn get(&self, namespace: &str, key: &str, scope: Option<&str>) -> Result<Vec<u8>>;

    /// Store a blob under (namespace, key, scope), overwriting any previous value
    async fn put(
        &self,
        namespace: &str,
        key: &str,
        scope: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<()>;
}
