//! MySQL implementations of the core repository traits

pub mod account_repository_impl;
pub mod code_store_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use code_store_impl::MySqlCodeStore;
