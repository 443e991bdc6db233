//! Cache module for Redis-based code storage
//!
//! This module provides the Redis client (multiplexed connection with retry
//! logic) and the code store built on it.

pub mod redis_client;
pub mod redis_code_store;


pub use redis_client::RedisClient;
pub use redis_code_store::{RedisCodeStore, CODE_KEY_PREFIX};

// Re-export commonly used types
pub use mg_shared::config::CacheConfig;
