//! Error types for the CloudQuery runner
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the CloudQuery runner
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config element: {message}")]
    InvalidConfigElement { message: String },

    #[error("Failed to resolve config reference '{location}': {message}")]
    ConfigResolution { location: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("No state found for {namespace}/{key}")]
    StateNotFound { namespace: String, key: String },

    #[error("State error: {message}")]
    State { message: String },

    #[error("State store error: {message}")]
    Storage { message: String },

    // ============================================================================
    // Execution Errors
    // ============================================================================
    #[error("Execution error: {message}")]
    Execution { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config element error
    pub fn invalid_config_element(message: impl Into<String>) -> Self {
        Self::InvalidConfigElement {
            message: message.into(),
        }
    }

    /// Create a config resolution error
    pub fn config_resolution(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigResolution {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a state-not-found error
    pub fn state_not_found(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self::StateNotFound {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// Whether this error is the expected first-run cache miss
    pub fn is_state_not_found(&self) -> bool {
        matches!(self, Error::StateNotFound { .. })
    }
}

/// Result type alias for the CloudQuery runner
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
