// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # CloudQuery Runner
//!
//! Workflow tasks for running the CloudQuery CLI inside a pluggable task
//! runner, with incremental state caching between runs.
//!
//! ## Features
//!
//! - **Two task kinds**: ad-hoc CLI commands (`CloudQueryCli`) and structured
//!   sync configurations (`Sync`)
//! - **Incremental sync**: the embedded incremental-index database is shadowed
//!   in a keyed state store and survives between independent task runs
//! - **Pluggable runners**: container-based (Docker) or local process
//! - **Config resolution**: inline mappings or file references, resolved and
//!   validated before anything executes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloudquery_runner::store::FileStateStore;
//! use cloudquery_runner::tasks::{Sync, TaskContext};
//! use cloudquery_runner::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let task: Sync = serde_yaml::from_str(
//!         r#"
//!         incremental: true
//!         configs:
//!           - sources.yml
//!           - destination.yml
//!         "#,
//!     )?;
//!
//!     let ctx = TaskContext::builder()
//!         .state_store(FileStateStore::new("/var/lib/cloudquery-runner/state"))
//!         .task_run_id("run-42")
//!         .build();
//!
//!     let output = task.run(&ctx).await?;
//!     println!("exit code: {}", output.exit_code);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Task Surface                       │
//! │   CloudQueryCli { commands }      Sync { configs, incr } │
//! └──────────────────────────────────────────────────────────┘
//!                │                          │
//! ┌──────────────┴──────────┬───────────────┴────────────────┐
//! │     Command Execution   │     Incremental State Cache    │
//! ├─────────────────────────┼────────────────────────────────┤
//! │ CommandsWrapper         │ restore() before the run       │
//! │ ProcessExecutor         │ persist() after the run        │
//! │ DockerExecutor          │ backed by a keyed StateStore   │
//! └─────────────────────────┴────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Keyed blob store for task state
pub mod store;

/// Incremental state cache
pub mod state;

/// Sync configuration model, resolution and decoration
pub mod config;

/// Command execution: wrapper, runners, output capture
pub mod exec;

/// Task surface exposed to the orchestration host
pub mod tasks;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use state::IncrementalStateCache;
pub use tasks::{CloudQueryCli, Sync, TaskContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
