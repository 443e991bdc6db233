//! Shared utilities and common types for the MailGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON envelope returned by the HTTP layer
//! - Utility functions (email validation, masking for logs)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CodePolicyConfig, CorsConfig, DatabaseConfig, EmailConfig,
    EmailProvider, Environment, LogFormat, LoggingConfig, SecurityConfig, ServerConfig,
    StoreBackend,
};
pub use types::{ErrorResponse, SuccessResponse};
pub use utils::validation;
