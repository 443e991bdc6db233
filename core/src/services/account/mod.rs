//! Account registration, activation and login
//!
//! Activation codes live on the account itself and are driven by the same
//! lifecycle manager as standalone verification codes.

mod credentials;
mod service;

#[cfg(test)]
mod tests;

pub use credentials::CredentialHasher;
pub use service::{AccountService, RegistrationResult};
