//! Tests for IncrementalStateCache

use super::*;
use crate::store::{MemoryStateStore, StateStore};
use std::sync::Arc;
use tempfile::tempdir;

fn cache_over(store: MemoryStateStore) -> IncrementalStateCache {
    IncrementalStateCache::new(Arc::new(store))
}

// ============================================================================
// Restore Tests
// ============================================================================

#[tokio::test]
async fn test_restore_first_run_creates_empty_file() {
    let dir = tempdir().unwrap();
    let cache = cache_over(MemoryStateStore::new());

    let path = cache.restore(dir.path()).await.unwrap();

    assert!(path.exists());
    assert_eq!(path.file_name().unwrap(), STATE_DB_FILENAME);
    assert_eq!(tokio::fs::read(&path).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_restore_writes_stored_bytes_verbatim() {
    let dir = tempdir().unwrap();
    let store = MemoryStateStore::new();
    store
        .put(STATE_NAMESPACE, STATE_DB_FILENAME, None, b"cursor".to_vec())
        .await
        .unwrap();

    let cache = cache_over(store);
    let path = cache.restore(dir.path()).await.unwrap();

    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"cursor");
}

#[tokio::test]
async fn test_restore_overwrites_stale_local_file() {
    let dir = tempdir().unwrap();
    let store = MemoryStateStore::new();
    store
        .put(STATE_NAMESPACE, STATE_DB_FILENAME, None, b"fresh".to_vec())
        .await
        .unwrap();

    // A leftover from some earlier run in the same directory
    let local = dir.path().join(STATE_DB_FILENAME);
    tokio::fs::write(&local, b"stale").await.unwrap();

    let cache = cache_over(store);
    cache.restore(dir.path()).await.unwrap();

    assert_eq!(tokio::fs::read(&local).await.unwrap(), b"fresh");
}

#[tokio::test]
async fn test_restore_missing_working_dir_is_fatal() {
    let cache = cache_over(MemoryStateStore::new());
    let result = cache
        .restore(std::path::Path::new("/nonexistent/working/dir"))
        .await;
    assert!(result.is_err());
    assert!(!result.unwrap_err().is_state_not_found());
}

// ============================================================================
// Persist Tests
// ============================================================================

#[tokio::test]
async fn test_persist_round_trip() {
    let dir = tempdir().unwrap();
    let store = MemoryStateStore::new();
    let cache = cache_over(store.clone());

    let path = cache.restore(dir.path()).await.unwrap();
    tokio::fs::write(&path, b"ABC").await.unwrap();
    cache.persist(dir.path()).await.unwrap();

    // A second restore for the same scope returns exactly the persisted bytes
    let dir2 = tempdir().unwrap();
    let path2 = cache.restore(dir2.path()).await.unwrap();
    assert_eq!(tokio::fs::read(&path2).await.unwrap(), b"ABC");
}

#[tokio::test]
async fn test_persist_overwrites_previous_value() {
    let dir = tempdir().unwrap();
    let store = MemoryStateStore::new();
    let cache = cache_over(store.clone());

    let path = cache.restore(dir.path()).await.unwrap();
    tokio::fs::write(&path, b"v1").await.unwrap();
    cache.persist(dir.path()).await.unwrap();
    tokio::fs::write(&path, b"v2").await.unwrap();
    cache.persist(dir.path()).await.unwrap();

    assert_eq!(
        store
            .get(STATE_NAMESPACE, STATE_DB_FILENAME, None)
            .await
            .unwrap(),
        b"v2"
    );
}

#[tokio::test]
async fn test_persist_without_state_file_is_fatal() {
    let dir = tempdir().unwrap();
    let cache = cache_over(MemoryStateStore::new());
    // No restore() happened; the file does not exist
    assert!(cache.persist(dir.path()).await.is_err());
}

// ============================================================================
// Scope Tests
// ============================================================================

#[tokio::test]
async fn test_scopes_do_not_share_state() {
    let store = MemoryStateStore::new();
    let cache_a = cache_over(store.clone()).with_scope("run-a");
    let cache_b = cache_over(store).with_scope("run-b");

    let dir_a = tempdir().unwrap();
    let path_a = cache_a.restore(dir_a.path()).await.unwrap();
    tokio::fs::write(&path_a, b"state-a").await.unwrap();
    cache_a.persist(dir_a.path()).await.unwrap();

    // Scope b starts empty even though scope a already persisted
    let dir_b = tempdir().unwrap();
    let path_b = cache_b.restore(dir_b.path()).await.unwrap();
    assert_eq!(tokio::fs::read(&path_b).await.unwrap().len(), 0);

    // And scope a still round-trips its own bytes
    let dir_a2 = tempdir().unwrap();
    let path_a2 = cache_a.restore(dir_a2.path()).await.unwrap();
    assert_eq!(tokio::fs::read(&path_a2).await.unwrap(), b"state-a");
}

#[tokio::test]
async fn test_scoped_and_unscoped_are_distinct() {
    let store = MemoryStateStore::new();
    let scoped = cache_over(store.clone()).with_scope("run-1");
    let unscoped = cache_over(store);

    let dir = tempdir().unwrap();
    let path = scoped.restore(dir.path()).await.unwrap();
    tokio::fs::write(&path, b"scoped-bytes").await.unwrap();
    scoped.persist(dir.path()).await.unwrap();

    let dir2 = tempdir().unwrap();
    let path2 = unscoped.restore(dir2.path()).await.unwrap();
    assert_eq!(tokio::fs::read(&path2).await.unwrap().len(), 0);
}
