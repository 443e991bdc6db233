//! bcrypt implementation of the CredentialHasher trait.

use async_trait::async_trait;

use mg_core::errors::{DomainError, DomainResult};
use mg_core::services::CredentialHasher;
use mg_shared::config::SecurityConfig;

/// Hashes credentials with bcrypt on the blocking thread pool
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn internal(message: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: message.to_string(),
    }
}

#[async_trait]
impl CredentialHasher for BcryptHasher {
    async fn hash(&self, secret: &str) -> DomainResult<String> {
        let secret = secret.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(secret, cost))
            .await
            .map_err(|e| internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| internal(format!("Failed to hash credential: {}", e)))
    }

    async fn verify(&self, secret: &str, hash: &str) -> DomainResult<bool> {
        let secret = secret.to_string();
        let hash = hash.to_string();

        let result = tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash))
            .await
            .map_err(|e| internal(format!("Verification task failed: {}", e)))?;

        match result {
            Ok(matches) => Ok(matches),
            // A stored value that is not a bcrypt hash can never match
            Err(e) => {
                tracing::warn!(error = %e, "Stored credential is not a valid bcrypt hash");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = BcryptHasher::new(4);

        let hash = hasher.hash("secret").await.unwrap();
        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$2"));

        assert!(hasher.verify("secret", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_never_matches() {
        let hasher = BcryptHasher::new(4);
        assert!(!hasher.verify("secret", "plaintext").await.unwrap());
    }

    #[test]
    fn test_from_config() {
        let hasher = BcryptHasher::from_config(&SecurityConfig { bcrypt_cost: 6 });
        assert_eq!(hasher.cost, 6);
    }
}
