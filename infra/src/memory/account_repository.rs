//! In-memory account repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mg_core::domain::{Account, VerificationRecord};
use mg_core::errors::StoreError;
use mg_core::repositories::AccountRepository;

/// Account repository over a mutex-guarded map
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.lock().await.get(identity).cloned())
    }

    async fn save_registration(&self, account: &Account) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.get(&account.identity).is_some_and(|existing| existing.is_active) {
            return Ok(false);
        }

        let mut fresh = account.clone();
        fresh.is_active = false;
        fresh.clear_pending_activation();
        accounts.insert(fresh.identity.clone(), fresh);
        Ok(true)
    }

    async fn set_activation_code(&self, record: &VerificationRecord) -> Result<bool, StoreError> {
        match self.accounts.lock().await.get_mut(&record.identity) {
            Some(account) if !account.is_active => {
                account.set_pending_activation(record);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear_activation_code(&self, identity: &str) -> Result<bool, StoreError> {
        match self.accounts.lock().await.get_mut(identity) {
            Some(account) if account.pending_activation_code.is_some() => {
                account.clear_pending_activation();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn consume_activation_code(
        &self,
        record: &VerificationRecord,
        activate: bool,
    ) -> Result<bool, StoreError> {
        match self.accounts.lock().await.get_mut(&record.identity) {
            Some(account) if account.holds_activation(record) => {
                if activate {
                    account.activate();
                } else {
                    account.clear_pending_activation();
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
