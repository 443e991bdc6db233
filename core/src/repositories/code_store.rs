//! Keyed persistence for time-boxed code records.

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::Consumption;
use crate::errors::StoreError;

/// Store holding at most one live code record per identity.
///
/// Each operation is atomic with respect to the identity's key. Records for
/// different identities are independent, so implementations need no
/// cross-key locking.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use mg_core::domain::{Consumption, VerificationRecord};
/// use mg_core::errors::StoreError;
/// use mg_core::repositories::CodeStore;
///
/// struct NullStore;
///
/// #[async_trait]
/// impl CodeStore for NullStore {
///     async fn upsert(&self, _record: &VerificationRecord) -> Result<(), StoreError> {
///         Ok(())
///     }
///
///     async fn get(&self, _identity: &str) -> Result<Option<VerificationRecord>, StoreError> {
///         Ok(None)
///     }
///
///     async fn delete(&self, _identity: &str) -> Result<bool, StoreError> {
///         Ok(false)
///     }
///
///     async fn consume(
///         &self,
///         _record: &VerificationRecord,
///         _consumption: Consumption,
///     ) -> Result<bool, StoreError> {
///         Ok(false)
///     }
/// }
/// ```
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Insert or replace the record for `record.identity` (last-issued-wins)
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), StoreError>;

    /// Fetch the record for an identity
    async fn get(&self, identity: &str) -> Result<Option<VerificationRecord>, StoreError>;

    /// Remove whatever record the identity holds
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - There was nothing to remove
    async fn delete(&self, identity: &str) -> Result<bool, StoreError>;

    /// Compare-and-delete: remove the identity's record only if it is still
    /// exactly `record` (same code and issue time).
    ///
    /// `consumption` tells stores with side effects why the record goes
    /// away; plain code stores can ignore it.
    ///
    /// # Returns
    /// * `Ok(true)` - `record` was the live record and has been removed
    /// * `Ok(false)` - The live record differs or is gone; nothing changed
    async fn consume(
        &self,
        record: &VerificationRecord,
        consumption: Consumption,
    ) -> Result<bool, StoreError>;
}
