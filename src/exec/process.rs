//! Built-in executors
//!
//! `ProcessExecutor` runs the script as a local child process.
//! `DockerExecutor` assembles a `docker run` invocation with the working
//! directory bind-mounted, then captures output the same way. Neither treats
//! a non-zero exit code as an error: the exit code is part of the result, so
//! callers that bracket the run (the incremental state cache) always get to
//! finish.

use super::types::{ContainerRunner, ExecResult, ExecutionRequest};
use super::CommandExecutor;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

/// Runs the script directly as a local process
#[derive(Debug, Default, Clone)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Create a new process executor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecResult> {
        let (program, args) = request
            .interpreter
            .split_first()
            .ok_or_else(|| Error::execution("interpreter must not be empty"))?;

        let mut command = Command::new(program);
        command
            .args(args)
            .arg(&request.script)
            .current_dir(&request.working_dir)
            .envs(&request.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        spawn_and_capture(command).await
    }
}

/// Runs the script inside a container via `docker run`
///
/// The working directory is bind-mounted at the same path inside the
/// container so file references in commands and configs resolve identically
/// on both sides.
#[derive(Debug, Clone)]
pub struct DockerExecutor {
    image: String,
    runner: ContainerRunner,
}

impl DockerExecutor {
    /// Create an executor for the given image and container descriptor
    pub fn new(image: impl Into<String>, runner: ContainerRunner) -> Self {
        Self {
            image: image.into(),
            runner,
        }
    }

    /// Image the container will run
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Assemble the `docker run` argv for a request
    pub fn docker_args(&self, request: &ExecutionRequest) -> Vec<String> {
        let workdir = request.working_dir.display().to_string();
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "-v".to_string(),
            format!("{workdir}:{workdir}"),
            "-w".to_string(),
            workdir,
        ];

        if let Some(user) = &self.runner.user {
            args.push("-u".to_string());
            args.push(user.clone());
        }

        for (key, value) in &request.env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }

        // `--entrypoint` takes a single binary; an empty value clears the
        // image's own entrypoint so the interpreter below takes over.
        args.push("--entrypoint".to_string());
        args.push(self.runner.entry_point.first().cloned().unwrap_or_default());

        args.push(self.image.clone());
        // Remaining entrypoint elements lead the container command
        args.extend(self.runner.entry_point.iter().skip(1).cloned());
        args.extend(request.interpreter.iter().cloned());
        args.push(request.script.clone());
        args
    }
}

#[async_trait]
impl CommandExecutor for DockerExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecResult> {
        let mut command = Command::new("docker");
        command
            .args(self.docker_args(request))
            .current_dir(&request.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        spawn_and_capture(command).await
    }
}

/// Spawn a prepared command, stream both pipes line by line, wait for exit
async fn spawn_and_capture(mut command: Command) -> Result<ExecResult> {
    let mut child = command
        .spawn()
        .map_err(|e| Error::execution(format!("Failed to spawn command: {e}")))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::execution("child stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::execution("child stderr was not piped"))?;

    let stdout_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        let mut collected = Vec::new();
        while let Ok(Some(line)) = lines.next_line().await {
            info!(target: "cloudquery", "{line}");
            collected.push(line);
        }
        collected
    });
    let stderr_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        let mut collected = Vec::new();
        while let Ok(Some(line)) = lines.next_line().await {
            warn!(target: "cloudquery", "{line}");
            collected.push(line);
        }
        collected
    });

    let status = child
        .wait()
        .await
        .map_err(|e| Error::execution(format!("Failed to wait for command: {e}")))?;
    let stdout = stdout_task
        .await
        .map_err(|e| Error::execution(format!("stdout reader failed: {e}")))?;
    let stderr = stderr_task
        .await
        .map_err(|e| Error::execution(format!("stderr reader failed: {e}")))?;

    Ok(ExecResult {
        // Terminated by signal if there is no code
        exit_code: status.code().unwrap_or(-1),
        stdout,
        stderr,
    })
}
