//! Shared task definition fields

use crate::exec::{TaskRunner, DEFAULT_IMAGE};
use crate::types::EnvMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Before-command making the container's binary reachable as `cloudquery`
pub const CLOUDQUERY_ALIAS: &str = "alias cloudquery='/app/cloudquery'";

/// Fields common to both task kinds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaskCommon {
    /// Additional environment variables for the CloudQuery process
    pub env: EnvMap,

    /// Container image, only used when the runner is container-based
    pub container_image: String,

    /// The task runner to use
    pub runner: TaskRunner,

    /// Files materialized into the working directory (name -> content)
    pub input_files: HashMap<String, String>,

    /// Existing files copied into the working directory
    pub namespace_files: Vec<PathBuf>,

    /// Files collected from the working directory after the run
    pub output_files: Vec<String>,
}

impl Default for TaskCommon {
    fn default() -> Self {
        Self {
            env: EnvMap::new(),
            container_image: DEFAULT_IMAGE.to_string(),
            runner: TaskRunner::default(),
            input_files: HashMap::new(),
            namespace_files: Vec::new(),
            output_files: Vec::new(),
        }
    }
}
