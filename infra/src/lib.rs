//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MailGate service.
//! It provides concrete implementations of the collaborator traits declared
//! in `mg_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL code store and account repository using SQLx
//! - **Cache**: Redis client and a Redis-backed code store
//! - **Memory**: Process-local stores for development and tests
//! - **Email**: SMTP and mock notifiers
//! - **Security**: bcrypt credential hasher

// Re-export core types for convenience
pub use mg_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and code store
pub mod cache;

/// Memory module - in-process stores
pub mod memory;

/// Email module - notifier implementations
pub mod email;

/// Security module - credential hashing
pub mod security;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Email transport error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        StoreError::backend(error)
    }
}

impl From<InfrastructureError> for NotificationError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => NotificationError::Misconfigured { message },
            other => NotificationError::delivery(other),
        }
    }
}
