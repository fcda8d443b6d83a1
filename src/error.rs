//! Error types

use thiserror::Error;

/// Faults that prevent the plugin from starting
///
/// The router never runs with a partial command table.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Command not found: {0}")]
    CommandNotFound(&'static str),

    #[error("Failed to create command: {0}")]
    CreateCommand(&'static str),
}

/// Errors reading or writing the preference file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Preference file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preference file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}
