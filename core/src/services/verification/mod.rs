//! Standalone email verification
//!
//! Sends a one-time code to an email address and later checks it, with no
//! account involved.

mod service;
mod types;


pub use service::EmailVerificationService;
pub use types::SendCodeResult;
