//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ConfigElement;
use crate::error::Result;
use crate::exec::TaskRunner;
use crate::store::FileStateStore;
use crate::tasks::{CloudQueryCli, Sync, TaskCommon, TaskContext};
use crate::types::{EnvMap, RunOutput};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, returning the wrapped tool's exit code
    pub async fn run(&self) -> Result<i32> {
        let ctx = self.build_context();
        let common = self.build_common();

        let output = match &self.cli.command {
            Commands::Run {
                commands,
                output_file,
            } => {
                let task = CloudQueryCli {
                    commands: commands.clone(),
                    common: TaskCommon {
                        output_files: output_file.clone(),
                        ..common
                    },
                };
                task.run(&ctx).await?
            }
            Commands::Sync {
                configs,
                incremental,
                output_file,
            } => {
                let task = Sync {
                    configs: configs
                        .iter()
                        .map(|location| ConfigElement::Reference(location.clone()))
                        .collect(),
                    incremental: *incremental,
                    common: TaskCommon {
                        output_files: output_file.clone(),
                        ..common
                    },
                };
                task.run(&ctx).await?
            }
        };

        self.report(&output)?;
        Ok(output.exit_code)
    }

    fn build_context(&self) -> TaskContext {
        let mut builder =
            TaskContext::builder().state_store(FileStateStore::new(&self.cli.state_dir));
        if let Some(scope) = &self.cli.scope {
            builder = builder.task_run_id(scope.clone());
        }
        builder.build()
    }

    fn build_common(&self) -> TaskCommon {
        let mut common = TaskCommon {
            env: self.cli.env.iter().cloned().collect::<EnvMap>(),
            ..TaskCommon::default()
        };
        // Image override and runner selection are independent flags
        if let Some(image) = &self.cli.image {
            common.container_image = image.clone();
        }
        if self.cli.local {
            common.runner = TaskRunner::Process;
        }
        common
    }

    fn report(&self, output: &RunOutput) -> Result<()> {
        if !output.vars.is_empty() {
            println!("{}", serde_json::to_string_pretty(&output.vars)?);
        }
        for file in &output.output_files {
            info!("output file: {}", file.display());
        }
        if !output.success() {
            info!("command exited with code {}", output.exit_code);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn runner_for(args: &[&str]) -> Runner {
        Runner::new(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_image_override_applies_alone() {
        let runner = runner_for(&[
            "cloudquery-runner",
            "--image",
            "ghcr.io/cloudquery/cloudquery:v5",
            "run",
            "cloudquery tables",
        ]);
        let common = runner.build_common();
        assert_eq!(common.container_image, "ghcr.io/cloudquery/cloudquery:v5");
        assert!(matches!(common.runner, TaskRunner::Docker(_)));
    }

    #[test]
    fn test_local_selects_process_runner() {
        let runner = runner_for(&["cloudquery-runner", "--local", "run", "cloudquery tables"]);
        let common = runner.build_common();
        assert_eq!(common.runner, TaskRunner::Process);
    }

    #[test]
    fn test_image_override_survives_local_flag() {
        let runner = runner_for(&[
            "cloudquery-runner",
            "--local",
            "--image",
            "ghcr.io/cloudquery/cloudquery:v5",
            "run",
            "cloudquery tables",
        ]);
        let common = runner.build_common();
        assert_eq!(common.runner, TaskRunner::Process);
        assert_eq!(common.container_image, "ghcr.io/cloudquery/cloudquery:v5");
    }
}
