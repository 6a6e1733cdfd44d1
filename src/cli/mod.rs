//! CLI module
//!
//! Command-line interface for running the two task kinds outside a host.
//!
//! # Commands
//!
//! - `run` - execute ad-hoc CloudQuery commands
//! - `sync` - execute a sync from configuration files

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
