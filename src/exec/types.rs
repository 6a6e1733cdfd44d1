//! Execution request and task-runner descriptor types

use crate::types::EnvMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default container image for CloudQuery runs
pub const DEFAULT_IMAGE: &str = "ghcr.io/cloudquery/cloudquery:latest";

/// Pluggable execution backend for the wrapped commands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskRunner {
    /// Run inside a container (the default)
    Docker(ContainerRunner),
    /// Run as a local process
    Process,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::Docker(ContainerRunner::default())
    }
}

/// Container runner descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContainerRunner {
    /// Image reference; falls back to the task's container image when unset
    #[serde(default)]
    pub image: Option<String>,

    /// Entrypoint override; an empty list clears the image's entrypoint
    #[serde(default)]
    pub entry_point: Vec<String>,

    /// User to run as inside the container
    #[serde(default)]
    pub user: Option<String>,
}

/// One assembled execution handed to a `CommandExecutor`
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Working directory the script runs in
    pub working_dir: PathBuf,

    /// Interpreter argv the script is passed to (default `/bin/sh -c`)
    pub interpreter: Vec<String>,

    /// The script: before-commands and commands joined with newlines
    pub script: String,

    /// Environment variables for the wrapped process
    pub env: EnvMap,
}

/// Raw result of one execution
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Exit code of the wrapped command
    pub exit_code: i32,

    /// Captured stdout lines
    pub stdout: Vec<String>,

    /// Captured stderr lines
    pub stderr: Vec<String>,
}
