//! Configuration element types

use serde::{Deserialize, Serialize};

/// A resolved CloudQuery configuration: a free-form string-keyed mapping
/// with at least a `kind` field (`source` | `destination`) and a `spec`
/// mapping.
pub type ConfigMapping = serde_json::Map<String, serde_json::Value>;

/// One element of a sync task's `configs` list
///
/// Task definitions mix inline mappings and file references freely:
///
/// ```yaml
/// configs:
///   - sources.yml
///   - kind: destination
///     spec:
///       name: duckdb
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ConfigElement {
    /// Location of an external configuration file
    Reference(String),
    /// Inline configuration mapping
    Inline(ConfigMapping),
}

impl ConfigElement {
    /// Inline mapping, if this element is one
    pub fn as_inline(&self) -> Option<&ConfigMapping> {
        match self {
            Self::Inline(mapping) => Some(mapping),
            Self::Reference(_) => None,
        }
    }

    /// Reference location, if this element is one
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference(location) => Some(location),
            Self::Inline(_) => None,
        }
    }
}
