//! Persistence contracts for codes and accounts.

pub mod account;
pub mod code_store;

pub use account::{AccountRepository, ActivationCodeStore};
pub use code_store::CodeStore;
