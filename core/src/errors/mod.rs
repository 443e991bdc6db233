//! Domain-specific error types and error handling.

mod types;

pub use types::{NotificationError, StoreError};

use thiserror::Error;

/// Errors returned by the core services
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account is already active")]
    AccountAlreadyActive,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not activated")]
    AccountNotActive,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Collaborator failures, propagated as-is
    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
