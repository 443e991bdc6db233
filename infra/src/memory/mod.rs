//! Process-local stores
//!
//! Every operation holds the map's lock for its whole duration, which makes
//! upsert and compare-and-delete atomic per process. Data is lost on restart.

pub mod account_repository;
pub mod code_store;


pub use account_repository::InMemoryAccountRepository;
pub use code_store::InMemoryCodeStore;
