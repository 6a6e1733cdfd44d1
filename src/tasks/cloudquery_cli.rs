//! Ad-hoc CloudQuery command task

use super::context::TaskContext;
use super::types::{TaskCommon, CLOUDQUERY_ALIAS};
use crate::error::{Error, Result};
use crate::exec::CommandsWrapper;
use crate::types::RunOutput;
use serde::{Deserialize, Serialize};

/// Run a list of literal CloudQuery commands
///
/// ```yaml
/// env:
///   CLOUDQUERY_API_KEY: "{{ secret('CLOUDQUERY_API_KEY') }}"
/// input_files:
///   config.yml: |
///     kind: source
///     spec:
///       name: hackernews
/// commands:
///   - cloudquery sync config.yml --log-console
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudQueryCli {
    /// List of CloudQuery commands to run
    pub commands: Vec<String>,

    /// Shared task fields
    #[serde(flatten)]
    pub common: TaskCommon,
}

impl CloudQueryCli {
    /// Execute the commands and return the run output
    pub async fn run(&self, ctx: &TaskContext) -> Result<RunOutput> {
        if self.commands.is_empty() {
            return Err(Error::config("commands must not be empty"));
        }

        let wrapper = CommandsWrapper::new()?
            .with_env(self.common.env.clone())
            .with_before_commands(vec![CLOUDQUERY_ALIAS.to_string()])
            .with_commands(self.commands.clone())
            .with_input_files(self.common.input_files.clone())
            .with_namespace_files(self.common.namespace_files.clone())
            .with_output_files(self.common.output_files.clone());

        let executor = ctx.executor(&self.common.runner, &self.common.container_image);
        wrapper.run(executor.as_ref()).await
    }
}
