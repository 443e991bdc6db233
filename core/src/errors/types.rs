//! Errors raised by the collaborators the core is wired to

use std::fmt::Display;

use thiserror::Error;

/// Failure of a code or account store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {message}")]
    Backend { message: String },

    /// An embedded record was written for an owner that does not exist
    #[error("No account exists for {identity}")]
    OwnerMissing { identity: String },

    /// The record kept being replaced while a verify tried to consume it
    #[error("Code record for {identity} changed during consumption")]
    Contention { identity: String },
}

impl StoreError {
    /// Wrap a backend-specific error
    pub fn backend(error: impl Display) -> Self {
        StoreError::Backend {
            message: error.to_string(),
        }
    }
}

/// Failure to deliver a code to its recipient
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Failed to deliver message: {message}")]
    DeliveryFailed { message: String },

    #[error("Invalid recipient address: {recipient}")]
    InvalidRecipient { recipient: String },

    #[error("Notifier misconfigured: {message}")]
    Misconfigured { message: String },
}

impl NotificationError {
    /// Wrap a transport-specific delivery error
    pub fn delivery(error: impl Display) -> Self {
        NotificationError::DeliveryFailed {
            message: error.to_string(),
        }
    }
}
