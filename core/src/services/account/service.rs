//! Account service implementation

use std::sync::Arc;

use serde::Serialize;

use mg_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::{Account, VerificationRecord};
use crate::domain::value_objects::{CodePurpose, VerifyOutcome};
use crate::errors::{DomainError, DomainResult, StoreError};
use crate::repositories::{AccountRepository, ActivationCodeStore};
use crate::services::code_lifecycle::{Clock, CodeLifecycleConfig, CodeLifecycleManager};
use crate::services::notifier::Notifier;

use super::credentials::CredentialHasher;

/// Result of a registration
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResult {
    /// The inactive account as stored
    pub account: Account,
    /// When the activation code stops being valid (ms since epoch)
    pub activation_expires_at: i64,
}

/// Account service gating login behind an emailed activation code
pub struct AccountService<R, N, H>
where
    R: AccountRepository + ?Sized,
    N: Notifier + ?Sized,
    H: CredentialHasher + ?Sized,
{
    accounts: Arc<R>,
    /// Lifecycle over the activation code embedded in accounts
    lifecycle: CodeLifecycleManager<ActivationCodeStore<R>>,
    notifier: Arc<N>,
    hasher: Arc<H>,
}

impl<R, N, H> AccountService<R, N, H>
where
    R: AccountRepository + ?Sized,
    N: Notifier + ?Sized,
    H: CredentialHasher + ?Sized,
{
    pub fn new(accounts: Arc<R>, notifier: Arc<N>, hasher: Arc<H>, config: CodeLifecycleConfig) -> Self {
        let store = Arc::new(ActivationCodeStore::new(accounts.clone()));
        Self {
            accounts,
            lifecycle: CodeLifecycleManager::new(store, config),
            notifier,
            hasher,
        }
    }

    pub fn with_clock(
        accounts: Arc<R>,
        notifier: Arc<N>,
        hasher: Arc<H>,
        clock: Arc<dyn Clock>,
        config: CodeLifecycleConfig,
    ) -> Self {
        let store = Arc::new(ActivationCodeStore::new(accounts.clone()));
        Self {
            accounts,
            lifecycle: CodeLifecycleManager::with_clock(store, clock, config),
            notifier,
            hasher,
        }
    }

    /// Register (or re-register) an inactive account and email it an
    /// activation code
    ///
    /// Re-registering an inactive account replaces its credential and
    /// invalidates the previous activation code. Active accounts cannot be
    /// registered again.
    ///
    /// # Returns
    ///
    /// * `Ok(RegistrationResult)` - Account stored and code handed to the transport
    /// * `Err(DomainError::Validation)` - Malformed email or empty password
    /// * `Err(DomainError::AccountAlreadyActive)` - The email already belongs to an active account
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<RegistrationResult> {
        let email = Self::validated_email(email)?;
        if password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        if let Some(existing) = self.accounts.find_by_identity(&email).await? {
            if existing.is_active {
                tracing::warn!(
                    identity = %mask_email(&email),
                    event = "register_active_account",
                    "Registration attempted for an active account"
                );
                return Err(DomainError::AccountAlreadyActive);
            }
        }

        let credential_hash = self.hasher.hash(password).await?;
        let account = Account::new(email.as_str(), credential_hash, self.lifecycle.now_millis());
        if !self.accounts.save_registration(&account).await? {
            // Activated after the lookup above
            return Err(DomainError::AccountAlreadyActive);
        }

        tracing::info!(
            identity = %mask_email(&email),
            event = "account_registered",
            "Account registered, awaiting activation"
        );

        let record = self.issue_and_send(&email).await?;

        let mut account = account;
        account.set_pending_activation(&record);
        Ok(RegistrationResult {
            account,
            activation_expires_at: record.expires_at(self.lifecycle.ttl_ms()),
        })
    }

    /// Issue a new activation code for an existing, inactive account
    ///
    /// The previous code stops working (last-issued-wins).
    pub async fn resend_activation_code(&self, email: &str) -> DomainResult<i64> {
        let email = Self::validated_email(email)?;

        let account = self
            .accounts
            .find_by_identity(&email)
            .await?
            .ok_or(DomainError::AccountNotFound)?;
        if account.is_active {
            return Err(DomainError::AccountAlreadyActive);
        }

        let record = self.issue_and_send(&email).await?;
        Ok(record.expires_at(self.lifecycle.ttl_ms()))
    }

    /// Check an activation code; on acceptance the account becomes active
    /// and the code is cleared in the same write
    pub async fn verify_activation_code(&self, email: &str, code: &str) -> DomainResult<VerifyOutcome> {
        let email = normalize_email(email);

        if self.accounts.find_by_identity(&email).await?.is_none() {
            return Err(DomainError::AccountNotFound);
        }

        let outcome = self.lifecycle.verify(&email, code.trim()).await?;
        if outcome.is_accepted() {
            tracing::info!(
                identity = %mask_email(&email),
                event = "account_activated",
                "Account activated"
            );
        }
        Ok(outcome)
    }

    /// Check credentials of an active account
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Account> {
        let email = normalize_email(email);

        let Some(account) = self.accounts.find_by_identity(&email).await? else {
            tracing::warn!(
                identity = %mask_email(&email),
                event = "login_failed",
                "Login for unknown account"
            );
            return Err(DomainError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &account.credential_hash).await? {
            tracing::warn!(
                identity = %mask_email(&email),
                event = "login_failed",
                "Login with wrong password"
            );
            return Err(DomainError::InvalidCredentials);
        }

        if !account.is_active {
            return Err(DomainError::AccountNotActive);
        }

        tracing::info!(identity = %mask_email(&email), event = "login_succeeded", "Login succeeded");
        Ok(account)
    }

    async fn issue_and_send(&self, email: &str) -> DomainResult<VerificationRecord> {
        let record = match self.lifecycle.issue(email).await {
            Ok(record) => record,
            Err(StoreError::OwnerMissing { .. }) => return Err(self.refused_issue(email).await),
            Err(error) => return Err(error.into()),
        };

        if let Err(error) = self
            .notifier
            .send(email, CodePurpose::Activation, &record.code)
            .await
        {
            tracing::error!(
                identity = %mask_email(email),
                error = %error,
                event = "code_delivery_failed",
                "Failed to send activation code"
            );
            return Err(error.into());
        }

        Ok(record)
    }

    /// Explain why the repository refused to store an activation code
    async fn refused_issue(&self, email: &str) -> DomainError {
        match self.accounts.find_by_identity(email).await {
            Ok(Some(account)) if account.is_active => DomainError::AccountAlreadyActive,
            Ok(_) => DomainError::AccountNotFound,
            Err(error) => error.into(),
        }
    }

    fn validated_email(email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if is_valid_email(&email) {
            Ok(email)
        } else {
            Err(DomainError::validation(format!("Invalid email address: {}", email)))
        }
    }
}
