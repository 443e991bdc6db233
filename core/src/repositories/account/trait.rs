//! Account repository trait.
//!
//! Accounts carry their activation code inline. Besides plain lookups the
//! repository exposes the conditional writes the activation flow needs, so
//! each of them can be a single statement in a relational backend.

use async_trait::async_trait;

use crate::domain::entities::{Account, VerificationRecord};
use crate::errors::StoreError;

/// Repository trait for Account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account registered for the email
    /// * `Err(StoreError)` - Backend failure
    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>, StoreError>;

    /// Create the account, or overwrite an existing *inactive* one.
    ///
    /// An overwrite replaces the credential and creation time, keeps the
    /// account inactive and drops any pending activation code. Active
    /// accounts are left untouched.
    ///
    /// # Returns
    /// * `Ok(true)` - The registration was written
    /// * `Ok(false)` - The account is active; nothing changed
    async fn save_registration(&self, account: &Account) -> Result<bool, StoreError>;

    /// Store `record` as the pending activation code of an inactive account
    ///
    /// # Returns
    /// * `Ok(true)` - The account exists, is inactive and now holds the code
    /// * `Ok(false)` - No inactive account for `record.identity`; nothing changed
    async fn set_activation_code(&self, record: &VerificationRecord) -> Result<bool, StoreError>;

    /// Drop the pending activation code, if any
    async fn clear_activation_code(&self, identity: &str) -> Result<bool, StoreError>;

    /// Drop the pending activation code only if it is still exactly
    /// `record`, and mark the account active in the same write when
    /// `activate` is set.
    ///
    /// # Returns
    /// * `Ok(true)` - The code matched and was consumed
    /// * `Ok(false)` - The pending code differs or is gone; nothing changed
    async fn consume_activation_code(
        &self,
        record: &VerificationRecord,
        activate: bool,
    ) -> Result<bool, StoreError>;
}
