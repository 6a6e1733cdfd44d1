//! Common types shared across the crate

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable mapping passed to the wrapped process
pub type EnvMap = HashMap<String, String>;

/// Result of one task execution
///
/// The exit code of the wrapped tool is data, not an error: callers that
/// bracket the execution (for example the incremental state cache) must run
/// their post-steps even when the tool failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOutput {
    /// Exit code of the wrapped command
    pub exit_code: i32,

    /// Named outputs captured from stdout markers emitted by the tool
    #[serde(default)]
    pub vars: HashMap<String, serde_json::Value>,

    /// Output files collected from the working directory after the run
    #[serde(default)]
    pub output_files: Vec<PathBuf>,
}

impl RunOutput {
    /// Whether the wrapped command exited successfully
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
