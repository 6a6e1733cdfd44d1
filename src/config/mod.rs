//! Sync configuration model, resolution and decoration
//!
//! A sync task is defined by an ordered list of CloudQuery configurations.
//! Each element is either an inline mapping or a reference to an external
//! file; references are resolved and parsed before anything executes. When
//! incremental mode is on, the decoration pass wires every source at the
//! synthesized sqlite destination that holds the incremental index.
//!
//! # Overview
//!
//! The config module provides:
//! - `ConfigElement` - inline-or-reference sum type
//! - `ConfigFetcher` / `LocalFileFetcher` - reference resolution
//! - `resolve_configs` - element list -> mapping list, strictly validated
//! - `decorate_configs` - backend-options injection + incremental destination

mod decorate;
mod resolver;
mod types;

pub use decorate::{
    decorate_configs, default_backend_options, incremental_destination,
    INCREMENTAL_CONNECTION, INCREMENTAL_DESTINATION_NAME, INCREMENTAL_TABLE_NAME,
    SQLITE_PLUGIN_PATH, SQLITE_PLUGIN_VERSION,
};
pub use resolver::{resolve_configs, ConfigFetcher, LocalFileFetcher};
pub use types::{ConfigElement, ConfigMapping};
