//! Config reference resolution
//!
//! Resolves every element of a sync task's `configs` list to a structured
//! mapping, fetching and parsing file references. All failures here are fatal
//! and happen before any command executes.

use super::types::{ConfigElement, ConfigMapping};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Source of externally referenced configuration files
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// Fetch the raw contents of the file at the given location
    async fn fetch(&self, location: &str) -> Result<String>;
}

/// Fetcher reading references from the local filesystem
///
/// Relative locations are resolved against the base directory when one is
/// set, against the current directory otherwise.
#[derive(Debug, Default, Clone)]
pub struct LocalFileFetcher {
    base: Option<PathBuf>,
}

impl LocalFileFetcher {
    /// Create a fetcher resolving relative locations against the current directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher rooted at a base directory
    pub fn with_base(base: impl AsRef<Path>) -> Self {
        Self {
            base: Some(base.as_ref().to_path_buf()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match &self.base {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl ConfigFetcher for LocalFileFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        if location.trim().is_empty() {
            return Err(Error::config_resolution(location, "empty location"));
        }

        let path = self.resolve(location);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::config_resolution(location, e.to_string()))
    }
}

/// Resolve a list of config elements to structured mappings
///
/// References are fetched and parsed as YAML; the parsed document must be a
/// mapping. Inline elements pass through as-is. Order is preserved.
pub async fn resolve_configs(
    elements: &[ConfigElement],
    fetcher: &dyn ConfigFetcher,
) -> Result<Vec<ConfigMapping>> {
    let mut results = Vec::with_capacity(elements.len());

    for element in elements {
        match element {
            ConfigElement::Inline(mapping) => results.push(mapping.clone()),
            ConfigElement::Reference(location) => {
                let raw = fetcher.fetch(location).await?;
                let value: serde_json::Value = serde_yaml::from_str(&raw)
                    .map_err(|e| Error::config_resolution(location, e.to_string()))?;
                match value {
                    serde_json::Value::Object(mapping) => results.push(mapping),
                    other => {
                        return Err(Error::invalid_config_element(format!(
                            "config '{location}' must be a mapping, got {}",
                            type_name(&other)
                        )))
                    }
                }
            }
        }
    }

    Ok(results)
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "a mapping",
    }
}
