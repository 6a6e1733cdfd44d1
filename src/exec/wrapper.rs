//! Commands wrapper
//!
//! Assembles everything one execution needs - working directory, environment,
//! input files, the command list - and delegates the actual run to a
//! `CommandExecutor`. The wrapper owns a fresh temp directory unless the
//! caller pins an existing one.

use super::types::{ExecResult, ExecutionRequest};
use super::{capture_outputs, CommandExecutor};
use crate::error::{Error, Result};
use crate::types::{EnvMap, RunOutput};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::warn;

enum WorkingDir {
    /// Fresh temp directory owned by the wrapper, removed on drop
    Owned(TempDir),
    /// Caller-provided directory, left in place
    External(PathBuf),
}

impl WorkingDir {
    fn path(&self) -> &Path {
        match self {
            Self::Owned(dir) => dir.path(),
            Self::External(path) => path,
        }
    }
}

/// Builder bracketing one command execution
pub struct CommandsWrapper {
    working_dir: WorkingDir,
    env: EnvMap,
    interpreter: Vec<String>,
    before_commands: Vec<String>,
    commands: Vec<String>,
    input_files: HashMap<String, String>,
    namespace_files: Vec<PathBuf>,
    output_files: Vec<String>,
}

impl CommandsWrapper {
    /// Create a wrapper with a fresh working directory
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().map_err(|e| {
            Error::execution(format!("Failed to create working directory: {e}"))
        })?;
        Ok(Self::with_working_dir(WorkingDir::Owned(dir)))
    }

    /// Create a wrapper over an existing directory
    pub fn in_dir(path: impl AsRef<Path>) -> Self {
        Self::with_working_dir(WorkingDir::External(path.as_ref().to_path_buf()))
    }

    fn with_working_dir(working_dir: WorkingDir) -> Self {
        Self {
            working_dir,
            env: EnvMap::new(),
            interpreter: vec!["/bin/sh".to_string(), "-c".to_string()],
            before_commands: Vec::new(),
            commands: Vec::new(),
            input_files: HashMap::new(),
            namespace_files: Vec::new(),
            output_files: Vec::new(),
        }
    }

    /// Working directory the commands will run in
    pub fn working_directory(&self) -> &Path {
        self.working_dir.path()
    }

    /// Set environment variables
    #[must_use]
    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.env = env;
        self
    }

    /// Set the interpreter argv
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Commands run before the main commands, in the same script
    #[must_use]
    pub fn with_before_commands(mut self, before: Vec<String>) -> Self {
        self.before_commands = before;
        self
    }

    /// The commands to run
    #[must_use]
    pub fn with_commands(mut self, commands: Vec<String>) -> Self {
        self.commands = commands;
        self
    }

    /// Files materialized into the working directory before the run
    /// (relative name -> content)
    #[must_use]
    pub fn with_input_files(mut self, files: HashMap<String, String>) -> Self {
        self.input_files = files;
        self
    }

    /// Existing files copied into the working directory before the run
    #[must_use]
    pub fn with_namespace_files(mut self, files: Vec<PathBuf>) -> Self {
        self.namespace_files = files;
        self
    }

    /// Files collected from the working directory after the run
    #[must_use]
    pub fn with_output_files(mut self, files: Vec<String>) -> Self {
        self.output_files = files;
        self
    }

    /// Materialize inputs, execute, capture outputs
    pub async fn run(&self, executor: &dyn CommandExecutor) -> Result<RunOutput> {
        if self.commands.is_empty() {
            return Err(Error::execution("no commands to run"));
        }

        self.materialize_inputs().await?;

        let script = self
            .before_commands
            .iter()
            .chain(self.commands.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let request = ExecutionRequest {
            working_dir: self.working_dir.path().to_path_buf(),
            interpreter: self.interpreter.clone(),
            script,
            env: self.env.clone(),
        };

        let result = executor.execute(&request).await?;
        self.build_output(&result).await
    }

    async fn materialize_inputs(&self) -> Result<()> {
        let workdir = self.working_dir.path();

        for (name, content) in &self.input_files {
            let path = workdir.join(name);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, content).await.map_err(|e| {
                Error::execution(format!("Failed to write input file '{name}': {e}"))
            })?;
        }

        for source in &self.namespace_files {
            let name = source.file_name().ok_or_else(|| {
                Error::execution(format!(
                    "Namespace file '{}' has no file name",
                    source.display()
                ))
            })?;
            tokio::fs::copy(source, workdir.join(name))
                .await
                .map_err(|e| {
                    Error::execution(format!(
                        "Failed to copy namespace file '{}': {e}",
                        source.display()
                    ))
                })?;
        }

        Ok(())
    }

    async fn build_output(&self, result: &ExecResult) -> Result<RunOutput> {
        let workdir = self.working_dir.path();
        let mut output_files = Vec::new();
        for name in &self.output_files {
            let path = workdir.join(name);
            if path.exists() {
                output_files.push(path);
            } else {
                warn!("declared output file '{name}' was not produced");
            }
        }

        Ok(RunOutput {
            exit_code: result.exit_code,
            vars: capture_outputs(&result.stdout),
            output_files,
        })
    }
}
