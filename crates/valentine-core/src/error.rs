//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Static configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An external collaborator (audio, renderer) reported a failure.
    #[error("collaborator error: {0}")]
    Collaborator(String),
}
