//! Incremental decoration of sync configurations
//!
//! When incremental mode is on, every source that does not already declare
//! its own `backend_options` is pointed at a synthesized sqlite destination
//! holding the incremental index, and exactly one such destination entry is
//! appended to the list. Caller-supplied `backend_options` always win over
//! the injected default.

use super::types::ConfigMapping;
use crate::state::STATE_DB_FILENAME;
use serde_json::{json, Value};

/// Logical name of the synthesized incremental destination
pub const INCREMENTAL_DESTINATION_NAME: &str = "kestra_incremental_db";

/// Table the incremental cursors are written to
pub const INCREMENTAL_TABLE_NAME: &str = "kestra_incremental_table";

/// Connection reference injected into sources
pub const INCREMENTAL_CONNECTION: &str = "@@plugins.kestra_incremental_db.connection";

/// CloudQuery plugin backing the synthesized destination
pub const SQLITE_PLUGIN_PATH: &str = "cloudquery/sqlite";

/// Pinned version of the sqlite destination plugin
pub const SQLITE_PLUGIN_VERSION: &str = "v2.4.10";

/// The default `backend_options` mapping injected into sources
pub fn default_backend_options() -> Value {
    json!({
        "table_name": INCREMENTAL_TABLE_NAME,
        "connection": INCREMENTAL_CONNECTION,
    })
}

/// The synthesized destination entry binding the local state file to the
/// fixed logical plugin name
pub fn incremental_destination() -> ConfigMapping {
    let value = json!({
        "kind": "destination",
        "spec": {
            "name": INCREMENTAL_DESTINATION_NAME,
            "path": SQLITE_PLUGIN_PATH,
            "version": SQLITE_PLUGIN_VERSION,
            "spec": {
                "connection_string": STATE_DB_FILENAME,
            },
        },
    });
    match value {
        Value::Object(mapping) => mapping,
        _ => unreachable!("incremental destination literal is a mapping"),
    }
}

/// Decorate resolved configurations for incremental mode
///
/// With `incremental` off this is the identity. With it on, sources lacking
/// `backend_options` gain the default mapping, and one destination entry is
/// appended regardless of how many sources there are - all sources in a run
/// share the single synthesized destination.
pub fn decorate_configs(mut configs: Vec<ConfigMapping>, incremental: bool) -> Vec<ConfigMapping> {
    if !incremental {
        return configs;
    }

    for config in &mut configs {
        if config.get("kind").and_then(Value::as_str) != Some("source") {
            continue;
        }
        let Some(Value::Object(spec)) = config.get_mut("spec") else {
            continue;
        };
        if !spec.contains_key("backend_options") {
            spec.insert("backend_options".to_string(), default_backend_options());
        }
    }

    configs.push(incremental_destination());
    configs
}
