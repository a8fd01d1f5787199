//! Valentine runtime: error types.

use thiserror::Error;
use valentine_core::error::DomainError;

/// Startup and runtime errors for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML for a story.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The story configuration failed validation.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
