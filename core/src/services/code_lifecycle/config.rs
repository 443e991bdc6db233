//! Configuration for the code lifecycle manager

use mg_shared::config::CodePolicyConfig;

use crate::domain::entities::DEFAULT_CODE_TTL_MS;

/// Settings for [`CodeLifecycleManager`](super::CodeLifecycleManager)
#[derive(Debug, Clone)]
pub struct CodeLifecycleConfig {
    /// How long a code stays valid, in milliseconds
    pub code_ttl_ms: i64,
    /// How many times verify re-reads a record that was replaced while it
    /// was being consumed
    pub max_consume_attempts: u32,
}

impl Default for CodeLifecycleConfig {
    fn default() -> Self {
        Self {
            code_ttl_ms: DEFAULT_CODE_TTL_MS,
            max_consume_attempts: 3,
        }
    }
}

impl CodeLifecycleConfig {
    pub fn with_ttl_ms(mut self, code_ttl_ms: i64) -> Self {
        self.code_ttl_ms = code_ttl_ms;
        self
    }
}

impl From<&CodePolicyConfig> for CodeLifecycleConfig {
    fn from(policy: &CodePolicyConfig) -> Self {
        Self::default().with_ttl_ms(policy.code_ttl_millis())
    }
}
