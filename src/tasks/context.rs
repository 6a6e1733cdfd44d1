//! Task execution context
//!
//! Bundles the host-supplied collaborators a task needs: the keyed state
//! store, the config fetcher, the task-run identity (used as the state
//! scope), and an optional executor override that bypasses runner selection
//! (used by hosts that manage execution themselves, and by tests).

use crate::config::{ConfigFetcher, LocalFileFetcher};
use crate::exec::{self, CommandExecutor, TaskRunner};
use crate::store::{MemoryStateStore, StateStore};
use std::sync::Arc;

/// Collaborators for one task execution
#[derive(Clone)]
pub struct TaskContext {
    state_store: Arc<dyn StateStore>,
    config_fetcher: Arc<dyn ConfigFetcher>,
    executor_override: Option<Arc<dyn CommandExecutor>>,
    task_run_id: Option<String>,
}

impl TaskContext {
    /// Start building a context
    pub fn builder() -> TaskContextBuilder {
        TaskContextBuilder::default()
    }

    /// The keyed state store
    pub fn state_store(&self) -> Arc<dyn StateStore> {
        Arc::clone(&self.state_store)
    }

    /// The config fetcher
    pub fn config_fetcher(&self) -> &dyn ConfigFetcher {
        self.config_fetcher.as_ref()
    }

    /// Task-run identity, the state scope
    pub fn task_run_id(&self) -> Option<&str> {
        self.task_run_id.as_deref()
    }

    /// Executor for the given runner descriptor
    ///
    /// The override, when set, wins over runner selection.
    pub fn executor(&self, runner: &TaskRunner, default_image: &str) -> Arc<dyn CommandExecutor> {
        match &self.executor_override {
            Some(executor) => Arc::clone(executor),
            None => exec::executor_for(runner, default_image),
        }
    }
}

impl Default for TaskContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("task_run_id", &self.task_run_id)
            .field("has_executor_override", &self.executor_override.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for `TaskContext`
#[derive(Default)]
pub struct TaskContextBuilder {
    state_store: Option<Arc<dyn StateStore>>,
    config_fetcher: Option<Arc<dyn ConfigFetcher>>,
    executor_override: Option<Arc<dyn CommandExecutor>>,
    task_run_id: Option<String>,
}

impl TaskContextBuilder {
    /// Set the state store
    #[must_use]
    pub fn state_store(mut self, store: impl StateStore + 'static) -> Self {
        self.state_store = Some(Arc::new(store));
        self
    }

    /// Set the config fetcher
    #[must_use]
    pub fn config_fetcher(mut self, fetcher: impl ConfigFetcher + 'static) -> Self {
        self.config_fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Bypass runner selection with a fixed executor
    #[must_use]
    pub fn executor(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.executor_override = Some(Arc::new(executor));
        self
    }

    /// Set the task-run identity used as the state scope
    #[must_use]
    pub fn task_run_id(mut self, id: impl Into<String>) -> Self {
        self.task_run_id = Some(id.into());
        self
    }

    /// Build the context
    ///
    /// Missing collaborators fall back to an in-memory store and a local
    /// file fetcher.
    pub fn build(self) -> TaskContext {
        TaskContext {
            state_store: self
                .state_store
                .unwrap_or_else(|| Arc::new(MemoryStateStore::new())),
            config_fetcher: self
                .config_fetcher
                .unwrap_or_else(|| Arc::new(LocalFileFetcher::new())),
            executor_override: self.executor_override,
            task_run_id: self.task_run_id,
        }
    }
}
