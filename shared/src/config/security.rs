//! Credential hashing configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Parameters for password hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

impl SecurityConfig {
    /// Create from `BCRYPT_COST`, clamped to the range bcrypt accepts
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: env_or("BCRYPT_COST", Self::default().bcrypt_cost).clamp(4, 31),
        }
    }
}
