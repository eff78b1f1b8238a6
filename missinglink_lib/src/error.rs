//! Error types for the library layer.

use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_yml::Error),
    #[error("Settings profile '{0}' not found")]
    MissingProfile(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding configuration and input validation failures.
#[derive(Error, Debug)]
pub enum MissingLinkError {
    #[error("API error: {0}")]
    Api(#[from] missinglink_api::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
