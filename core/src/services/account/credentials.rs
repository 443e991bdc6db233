//! Credential hashing seam

use async_trait::async_trait;

use crate::errors::DomainResult;

/// One-way hashing of account credentials
///
/// The core treats the hash as opaque; only the implementation can check it.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext secret for storage
    async fn hash(&self, secret: &str) -> DomainResult<String>;

    /// Check a plaintext secret against a stored hash
    async fn verify(&self, secret: &str, hash: &str) -> DomainResult<bool>;
}
