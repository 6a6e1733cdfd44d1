//! Named-output capture from stdout markers
//!
//! The wrapped tool can emit structured markers on stdout:
//!
//! ```text
//! ::{"outputs": {"rows_synced": 1234}}::
//! ```
//!
//! Every marker's `outputs` mapping is merged into the run's captured vars;
//! later markers override earlier ones key by key.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

// Non-greedy body so two markers on one line stay separate matches
static OUTPUT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"::(\{.*?\})::").expect("output marker pattern is valid"));

/// Capture named outputs from the wrapped command's stdout lines
pub fn capture_outputs(lines: &[String]) -> HashMap<String, Value> {
    let mut vars = HashMap::new();

    for line in lines {
        for captures in OUTPUT_MARKER.captures_iter(line) {
            let raw = &captures[1];
            let parsed: Value = match serde_json::from_str(raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!("ignoring malformed output marker: {e}");
                    continue;
                }
            };
            let Some(outputs) = parsed.get("outputs").and_then(Value::as_object) else {
                continue;
            };
            for (key, value) in outputs {
                vars.insert(key.clone(), value.clone());
            }
        }
    }

    vars
}
