//! Error types for citysync-core.

use thiserror::Error;

/// All errors that can arise while assembling runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {name}")]
    MissingVar { name: &'static str },

    /// A required environment variable is set but blank.
    #[error("environment variable {name} is empty")]
    EmptyVar { name: &'static str },
}
