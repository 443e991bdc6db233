//! Code store view over the activation code embedded in accounts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::Consumption;
use crate::errors::StoreError;
use crate::repositories::code_store::CodeStore;

use super::trait_::AccountRepository;

/// Adapts an [`AccountRepository`] to the [`CodeStore`] contract so the
/// generic lifecycle manager can drive account activation.
///
/// Consuming an accepted code also activates the account. Upserting onto
/// a missing or already active account fails with `OwnerMissing`.
pub struct ActivationCodeStore<R: AccountRepository + ?Sized> {
    accounts: Arc<R>,
}

impl<R: AccountRepository + ?Sized> ActivationCodeStore<R> {
    pub fn new(accounts: Arc<R>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl<R: AccountRepository + ?Sized> CodeStore for ActivationCodeStore<R> {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        if self.accounts.set_activation_code(record).await? {
            Ok(())
        } else {
            Err(StoreError::OwnerMissing {
                identity: record.identity.clone(),
            })
        }
    }

    async fn get(&self, identity: &str) -> Result<Option<VerificationRecord>, StoreError> {
        Ok(self
            .accounts
            .find_by_identity(identity)
            .await?
            .and_then(|account| account.pending_activation()))
    }

    async fn delete(&self, identity: &str) -> Result<bool, StoreError> {
        self.accounts.clear_activation_code(identity).await
    }

    async fn consume(
        &self,
        record: &VerificationRecord,
        consumption: Consumption,
    ) -> Result<bool, StoreError> {
        self.accounts
            .consume_activation_code(record, consumption == Consumption::Accepted)
            .await
    }
}
