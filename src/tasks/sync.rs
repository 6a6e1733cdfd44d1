//! Structured sync task
//!
//! Resolves the configuration list, decorates it for incremental mode, and
//! brackets the CloudQuery invocation with the incremental state cache:
//! restore before the run, persist after it - success or failure of the
//! wrapped command does not suppress persistence.

use super::context::TaskContext;
use super::types::{TaskCommon, CLOUDQUERY_ALIAS};
use crate::config::{decorate_configs, resolve_configs, ConfigElement, ConfigMapping};
use crate::error::{Error, Result};
use crate::exec::CommandsWrapper;
use crate::state::IncrementalStateCache;
use crate::types::RunOutput;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Run a CloudQuery sync from a list of configurations
///
/// ```yaml
/// incremental: true
/// configs:
///   - kind: source
///     spec:
///       name: hackernews
///       path: cloudquery/hackernews
///       version: v3.0.13
///       tables: ["*"]
///       destinations: ["duckdb"]
///   - destination.yml
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sync {
    /// CloudQuery configurations, inline or file references
    pub configs: Vec<ConfigElement>,

    /// Whether to store the incremental index in the state store
    #[serde(default)]
    pub incremental: bool,

    /// Shared task fields
    #[serde(flatten)]
    pub common: TaskCommon,
}

impl Sync {
    /// Execute the sync and return the run output
    pub async fn run(&self, ctx: &TaskContext) -> Result<RunOutput> {
        if self.configs.is_empty() {
            return Err(Error::config("configs must not be empty"));
        }

        let wrapper = CommandsWrapper::new()?
            .with_env(self.common.env.clone())
            .with_input_files(self.common.input_files.clone())
            .with_namespace_files(self.common.namespace_files.clone())
            .with_output_files(self.common.output_files.clone());

        let mut cache = IncrementalStateCache::new(ctx.state_store());
        if let Some(scope) = ctx.task_run_id() {
            cache = cache.with_scope(scope);
        }

        // Restore must complete before configs are written: the decorated
        // destination points at the restored file path.
        cache.restore(wrapper.working_directory()).await?;

        let resolved = resolve_configs(&self.configs, ctx.config_fetcher()).await?;
        let decorated = decorate_configs(resolved, self.incremental);
        let config_files =
            write_config_files(wrapper.working_directory(), &decorated).await?;

        let wrapper = wrapper
            .with_before_commands(vec![CLOUDQUERY_ALIAS.to_string()])
            .with_commands(vec![format!("cloudquery sync {}", config_files.join(" "))]);

        let executor = ctx.executor(&self.common.runner, &self.common.container_image);
        let output = wrapper.run(executor.as_ref()).await?;

        // Persist whatever state the tool left on disk, even on failure, so a
        // partially advanced incremental cursor is kept.
        cache.persist(wrapper.working_directory()).await?;

        Ok(output)
    }
}

/// Write each configuration as its own YAML file, returning the file names
/// in config order
async fn write_config_files(
    working_dir: &Path,
    configs: &[ConfigMapping],
) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(configs.len());
    for config in configs {
        let name = format!("{}.yml", Uuid::new_v4().simple());
        let yaml = serde_yaml::to_string(config)?;
        tokio::fs::write(working_dir.join(&name), yaml)
            .await
            .map_err(|e| Error::execution(format!("Failed to write config file '{name}': {e}")))?;
        names.push(name);
    }
    Ok(names)
}
