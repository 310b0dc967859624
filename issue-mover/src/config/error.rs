//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source or target repository was never set.
    #[error("Source and destination repos must be set")]
    MissingRepositories,

    /// Repository reference is not in `owner/name` form.
    #[error("Invalid repository '{value}': {message}")]
    InvalidRepository { value: String, message: String },

    /// Unknown issue state filter.
    #[error("Invalid state '{value}', expected one of: open, closed, all")]
    InvalidState { value: String },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in a loaded config file.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },
}
