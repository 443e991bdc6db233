//! Email verification service implementation

use std::sync::Arc;

use mg_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::value_objects::{CodePurpose, VerifyOutcome};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CodeStore;
use crate::services::code_lifecycle::{Clock, CodeLifecycleConfig, CodeLifecycleManager};
use crate::services::notifier::Notifier;

use super::types::SendCodeResult;

/// Verification service for standalone email codes
pub struct EmailVerificationService<S: CodeStore + ?Sized, N: Notifier + ?Sized> {
    /// Lifecycle over the standalone code store
    lifecycle: CodeLifecycleManager<S>,
    /// Delivers codes by email
    notifier: Arc<N>,
}

impl<S: CodeStore + ?Sized, N: Notifier + ?Sized> EmailVerificationService<S, N> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Code store implementation
    /// * `notifier` - Notifier implementation
    /// * `config` - Lifecycle configuration
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: CodeLifecycleConfig) -> Self {
        Self {
            lifecycle: CodeLifecycleManager::new(store, config),
            notifier,
        }
    }

    /// Create a service reading time from `clock`
    pub fn with_clock(
        store: Arc<S>,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
        config: CodeLifecycleConfig,
    ) -> Self {
        Self {
            lifecycle: CodeLifecycleManager::with_clock(store, clock, config),
            notifier,
        }
    }

    /// Issue a verification code for `email` and send it
    ///
    /// This method:
    /// 1. Normalizes and validates the email address
    /// 2. Issues a code, replacing any live one
    /// 3. Sends the code by email
    ///
    /// A delivery failure is reported but the issued code stays valid.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code stored and handed to the transport
    /// * `Err(DomainError)` - Invalid email, storage or delivery failure
    pub async fn send_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::validation(format!(
                "Invalid email address: {}",
                email
            )));
        }

        let record = self.lifecycle.issue(&email).await?;

        if let Err(error) = self
            .notifier
            .send(&email, CodePurpose::Verification, &record.code)
            .await
        {
            tracing::error!(
                identity = %mask_email(&email),
                error = %error,
                event = "code_delivery_failed",
                "Failed to send verification code"
            );
            return Err(error.into());
        }

        let expires_at = record.expires_at(self.lifecycle.ttl_ms());
        Ok(SendCodeResult { record, expires_at })
    }

    /// Check a submitted code for `email`
    ///
    /// Rejections are outcomes, not errors; only storage failures are `Err`.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<VerifyOutcome> {
        let email = normalize_email(email);
        Ok(self.lifecycle.verify(&email, code.trim()).await?)
    }

    /// Drop any live code for `email`
    pub async fn invalidate(&self, email: &str) -> DomainResult<bool> {
        Ok(self.lifecycle.purge(&normalize_email(email)).await?)
    }
}
