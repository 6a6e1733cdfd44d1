//! Command execution: wrapper, runners, output capture
//!
//! Tasks never spawn the CloudQuery tool directly. They assemble a
//! `CommandsWrapper` (working directory, env, input/output files, commands)
//! which delegates to a `CommandExecutor` selected from the task-runner
//! descriptor: a container-based runner or the local process runner.
//!
//! # Overview
//!
//! The exec module provides:
//! - `TaskRunner` / `ContainerRunner` - runner descriptors
//! - `CommandsWrapper` - builder bracketing one execution
//! - `CommandExecutor` - the execution seam
//! - `ProcessExecutor` / `DockerExecutor` - the two built-in runners
//! - stdout marker capture for named outputs

mod outputs;
mod process;
mod types;
mod wrapper;

pub use outputs::capture_outputs;
pub use process::{DockerExecutor, ProcessExecutor};
pub use types::{ContainerRunner, ExecResult, ExecutionRequest, TaskRunner, DEFAULT_IMAGE};
pub use wrapper::CommandsWrapper;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Executes an assembled script inside a working directory
///
/// Implementations report the wrapped command's exit code as data; only
/// failures to launch or observe the command are errors.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute the request and capture its output
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecResult>;
}

/// Build the executor described by a task-runner descriptor
///
/// `default_image` is used when a container runner does not pin its own image.
pub fn executor_for(runner: &TaskRunner, default_image: &str) -> Arc<dyn CommandExecutor> {
    match runner {
        TaskRunner::Process => Arc::new(ProcessExecutor::new()),
        TaskRunner::Docker(container) => {
            let image = container
                .image
                .clone()
                .unwrap_or_else(|| default_image.to_string());
            Arc::new(DockerExecutor::new(image, container.clone()))
        }
    }
}

#[cfg(test)]
mod tests;
