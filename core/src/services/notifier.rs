//! Outbound delivery of issued codes.

use async_trait::async_trait;

use crate::domain::value_objects::CodePurpose;
use crate::errors::NotificationError;

/// Delivers a code to the identity it was issued for
///
/// Implementations own message formatting; `purpose` selects the wording.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `code` to `identity`
    ///
    /// # Returns
    /// * `Ok(())` - Message accepted by the transport
    /// * `Err(NotificationError)` - Delivery failed; the caller's record is left as-is
    async fn send(
        &self,
        identity: &str,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<(), NotificationError>;
}
