//! Code expiry policy

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetime of verification and activation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodePolicyConfig {
    /// Seconds a code stays valid after issue
    pub code_ttl_seconds: u64,
}

impl Default for CodePolicyConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: 600,
        }
    }
}

impl CodePolicyConfig {
    /// Create from `CODE_TTL_SECONDS`; zero is rejected in favour of the default
    pub fn from_env() -> Self {
        let ttl = env_or("CODE_TTL_SECONDS", Self::default().code_ttl_seconds);
        Self {
            code_ttl_seconds: if ttl == 0 { Self::default().code_ttl_seconds } else { ttl },
        }
    }

    /// Expiry window in milliseconds
    pub fn code_ttl_millis(&self) -> i64 {
        i64::try_from(self.code_ttl_seconds)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000)
    }
}
