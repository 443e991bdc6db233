//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection used by the Redis code store
//! - `code_policy` - Expiry window of verification and activation codes
//! - `database` - MySQL connection and pool configuration
//! - `email` - Email provider and sender identity
//! - `environment` - Environment detection and logging configuration
//! - `security` - Credential hashing parameters
//! - `server` - HTTP server and CORS configuration
//!
//! Every section can be built from environment variables with `from_env()`.

pub mod cache;
pub mod code_policy;
pub mod database;
pub mod email;
pub mod environment;
pub mod security;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use code_policy::CodePolicyConfig;
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider, SmtpConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use security::SecurityConfig;
pub use server::{CorsConfig, ServerConfig};

/// Backend used to persist standalone verification codes and accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// MySQL tables (`codes` and `users`)
    Mysql,
    /// Redis hashes for codes; accounts stay in MySQL
    Redis,
    /// Process-local maps, for development and tests
    Memory,
}

impl StoreBackend {
    /// Read the backend from `CODE_STORE`, defaulting to MySQL
    pub fn from_env() -> Self {
        std::env::var("CODE_STORE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(StoreBackend::Mysql)
    }

    /// Whether this backend needs a MySQL pool
    pub fn requires_database(&self) -> bool {
        matches!(self, StoreBackend::Mysql | StoreBackend::Redis)
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Mysql
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::Mysql),
            "redis" => Ok(StoreBackend::Redis),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid code store backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Mysql => write!(f, "mysql"),
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Which backend stores codes and accounts
    #[serde(default)]
    pub store: StoreBackend,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Code expiry policy
    #[serde(default)]
    pub code_policy: CodePolicyConfig,

    /// Credential hashing
    #[serde(default)]
    pub security: SecurityConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            store: StoreBackend::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            email: EmailConfig::default(),
            code_policy: CodePolicyConfig::default(),
            security: SecurityConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            store: StoreBackend::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            email: EmailConfig::from_env(),
            code_policy: CodePolicyConfig::from_env(),
            security: SecurityConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Configuration for local development: in-memory stores, mock email
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            store: StoreBackend::Memory,
            email: EmailConfig::mock(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }
}

/// Parse an environment variable, falling back to `default` when it is
/// missing or malformed
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("mysql".parse::<StoreBackend>(), Ok(StoreBackend::Mysql));
        assert_eq!("Redis".parse::<StoreBackend>(), Ok(StoreBackend::Redis));
        assert_eq!("in-memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_store_backend_requires_database() {
        assert!(StoreBackend::Mysql.requires_database());
        assert!(StoreBackend::Redis.requires_database());
        assert!(!StoreBackend::Memory.requires_database());
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.email.provider, EmailProvider::Mock);
        assert_eq!(config.code_policy.code_ttl_seconds, 600);
    }
}
