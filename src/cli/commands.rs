//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CloudQuery task runner CLI
#[derive(Parser, Debug)]
#[command(name = "cloudquery-runner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory backing the file state store
    #[arg(long, global = true, default_value = ".cloudquery-state")]
    pub state_dir: PathBuf,

    /// State scope (task-run identity); unscoped when omitted
    #[arg(long, global = true)]
    pub scope: Option<String>,

    /// Run commands as a local process instead of in a container
    #[arg(long, global = true)]
    pub local: bool,

    /// Container image override
    #[arg(long, global = true)]
    pub image: Option<String>,

    /// Environment variables for the CloudQuery process (KEY=VALUE)
    #[arg(short = 'e', long = "env", global = true, value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute ad-hoc CloudQuery commands
    Run {
        /// Commands to run, one shell line each
        #[arg(required = true)]
        commands: Vec<String>,

        /// Files to collect from the working directory after the run
        #[arg(long)]
        output_file: Vec<String>,
    },

    /// Execute a sync from configuration files
    Sync {
        /// Configuration files (YAML), in order
        #[arg(required = true)]
        configs: Vec<String>,

        /// Store the incremental index in the state store
        #[arg(long)]
        incremental: bool,

        /// Files to collect from the working directory after the run
        #[arg(long)]
        output_file: Vec<String>,
    },
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid KEY=VALUE pair: '{raw}'")),
    }
}
