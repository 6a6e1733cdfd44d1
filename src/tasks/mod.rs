//! Task surface exposed to the orchestration host
//!
//! Two task kinds, both deserializable from a YAML task definition:
//! - `CloudQueryCli` - run an ad-hoc list of CloudQuery commands
//! - `Sync` - run a structured sync from a list of configurations, optionally
//!   with incremental state caching
//!
//! A `TaskContext` carries the host-supplied collaborators: the state store,
//! the config fetcher, the task-run identity used as the state scope, and an
//! optional executor override.

mod cloudquery_cli;
mod context;
mod sync;
mod types;

pub use cloudquery_cli::CloudQueryCli;
pub use context::{TaskContext, TaskContextBuilder};
pub use sync::Sync;
pub use types::{TaskCommon, CLOUDQUERY_ALIAS};
