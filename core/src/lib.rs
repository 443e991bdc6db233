//! # MailGate Core
//!
//! Core business logic and domain layer for the MailGate backend.
//! This crate contains the verification-code lifecycle manager, the two
//! services built on it (standalone email verification and account
//! activation), the repository and collaborator traits they are wired
//! through, and the domain error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
