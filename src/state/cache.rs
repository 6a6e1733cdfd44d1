//! Incremental state cache implementation
//!
//! One run of a sync task brackets the wrapped command with the cache:
//! `restore` places the previous incremental database in the working
//! directory before the command starts, `persist` ships whatever the command
//! left on disk back to the store afterwards.

use crate::error::{Error, Result};
use crate::store::StateStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Namespace the incremental database is stored under
pub const STATE_NAMESPACE: &str = "CloudQueryState";

/// Filename of the incremental database inside the working directory.
///
/// The misspelling is historical and load-bearing: it is also the storage key,
/// so renaming it would orphan state persisted under the old name.
pub const STATE_DB_FILENAME: &str = "icrementaldb.sqlite";

/// Shadows the local incremental database in a keyed blob store
///
/// The cache assumes the host runs at most one execution per state scope at a
/// time; it implements no locking of its own. Within one run the expected
/// call order is `restore`, then the wrapped command, then `persist` -
/// `persist` is called regardless of the command's exit code so a partially
/// advanced incremental cursor is preserved rather than discarded.
#[derive(Clone)]
pub struct IncrementalStateCache {
    store: Arc<dyn StateStore>,
    scope: Option<String>,
}

impl IncrementalStateCache {
    /// Create a cache over the given store, unscoped
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store, scope: None }
    }

    /// Partition storage by a task-run identity
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// State scope, if any
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Path of the state file inside a working directory
    pub fn state_file(working_dir: &Path) -> PathBuf {
        working_dir.join(STATE_DB_FILENAME)
    }

    /// Restore the previous state into the working directory
    ///
    /// On a store miss (the expected first-run case) an empty file is created
    /// instead; a failure to create that file is fatal. Either way the
    /// returned path exists and is readable afterwards.
    pub async fn restore(&self, working_dir: &Path) -> Result<PathBuf> {
        let path = Self::state_file(working_dir);

        match self
            .store
            .get(STATE_NAMESPACE, STATE_DB_FILENAME, self.scope.as_deref())
            .await
        {
            Ok(bytes) => {
                debug!(
                    scope = self.scope.as_deref(),
                    bytes = bytes.len(),
                    "restoring incremental state"
                );
                tokio::fs::write(&path, &bytes).await.map_err(|e| {
                    Error::state(format!(
                        "Failed to restore state file '{}': {e}",
                        path.display()
                    ))
                })?;
            }
            Err(e) if e.is_state_not_found() => {
                debug!(
                    scope = self.scope.as_deref(),
                    "no previous incremental state, starting empty"
                );
                tokio::fs::File::create(&path).await.map_err(|e| {
                    Error::state(format!(
                        "Unable to create incremental backend file '{}': {e}",
                        path.display()
                    ))
                })?;
            }
            Err(e) => return Err(e),
        }

        Ok(path)
    }

    /// Persist the state file back to the store
    ///
    /// Reads the full contents of the working-directory state file and stores
    /// them under the same (namespace, key, scope) tuple, overwriting any
    /// previous value. A store failure here is fatal: durability of the
    /// incremental state is part of the task's success contract.
    pub async fn persist(&self, working_dir: &Path) -> Result<()> {
        let path = Self::state_file(working_dir);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            Error::state(format!(
                "Failed to read state file '{}': {e}",
                path.display()
            ))
        })?;

        debug!(
            scope = self.scope.as_deref(),
            bytes = bytes.len(),
            "persisting incremental state"
        );
        self.store
            .put(
                STATE_NAMESPACE,
                STATE_DB_FILENAME,
                self.scope.as_deref(),
                bytes,
            )
            .await
    }
}

impl std::fmt::Debug for IncrementalStateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalStateCache")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
