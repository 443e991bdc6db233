//! Code lifecycle manager implementation

use std::sync::Arc;

use mg_shared::utils::validation::mask_email;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{RejectReason, VerifyOutcome};
use crate::errors::StoreError;
use crate::repositories::CodeStore;

use super::clock::{Clock, SystemClock};
use super::config::CodeLifecycleConfig;

/// Issues, checks and consumes time-boxed codes held in a [`CodeStore`]
pub struct CodeLifecycleManager<S: CodeStore + ?Sized> {
    /// Backing store, one record per identity
    store: Arc<S>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Manager configuration
    config: CodeLifecycleConfig,
}

impl<S: CodeStore + ?Sized> CodeLifecycleManager<S> {
    /// Create a manager reading the system clock
    pub fn new(store: Arc<S>, config: CodeLifecycleConfig) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), config)
    }

    /// Create a manager with an explicit time source
    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>, config: CodeLifecycleConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Validity window in milliseconds
    pub fn ttl_ms(&self) -> i64 {
        self.config.code_ttl_ms
    }

    /// Current time according to the manager's clock
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Issue a fresh code for `identity`, replacing any live one
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationRecord)` - The stored record, including the plaintext code
    /// * `Err(StoreError)` - The record could not be stored
    pub async fn issue(&self, identity: &str) -> Result<VerificationRecord, StoreError> {
        let record = VerificationRecord::issue(identity, self.clock.now_millis());
        self.store.upsert(&record).await?;

        tracing::info!(
            identity = %mask_email(identity),
            expires_at = record.expires_at(self.config.code_ttl_ms),
            event = "code_issued",
            "Verification code issued"
        );

        Ok(record)
    }

    /// Check `submitted` against the live code for `identity`
    ///
    /// Outcomes in priority order:
    /// 1. `NotFound` - no live record
    /// 2. `Expired` - record too old; it is deleted
    /// 3. `Mismatch` - wrong code; the record is kept
    /// 4. `Accepted` - the record is deleted, so a replay yields `NotFound`
    ///
    /// Deletion is a compare-and-delete of the evaluated record. When a
    /// concurrent issue replaced it first, the newer record is evaluated
    /// instead, up to `max_consume_attempts` times.
    pub async fn verify(&self, identity: &str, submitted: &str) -> Result<VerifyOutcome, StoreError> {
        let attempts = self.config.max_consume_attempts.max(1);

        for _ in 0..attempts {
            let Some(record) = self.store.get(identity).await? else {
                tracing::info!(
                    identity = %mask_email(identity),
                    event = "code_not_found",
                    "No live code for identity"
                );
                return Ok(VerifyOutcome::Rejected(RejectReason::NotFound));
            };

            let outcome = record.check(submitted, self.clock.now_millis(), self.config.code_ttl_ms);

            let Some(consumption) = outcome.consumption() else {
                tracing::warn!(
                    identity = %mask_email(identity),
                    event = "code_mismatch",
                    "Submitted code does not match"
                );
                return Ok(outcome);
            };

            if self.store.consume(&record, consumption).await? {
                tracing::info!(
                    identity = %mask_email(identity),
                    outcome = ?outcome,
                    event = "code_consumed",
                    "Verification code consumed"
                );
                return Ok(outcome);
            }

            tracing::debug!(
                identity = %mask_email(identity),
                event = "code_replaced_during_verify",
                "Record changed before consumption, re-evaluating"
            );
        }

        tracing::error!(
            identity = %mask_email(identity),
            attempts = attempts,
            event = "code_consume_contention",
            "Gave up consuming a code that kept changing"
        );
        Err(StoreError::Contention {
            identity: identity.to_string(),
        })
    }

    /// Discard whatever code `identity` holds
    pub async fn purge(&self, identity: &str) -> Result<bool, StoreError> {
        let removed = self.store.delete(identity).await?;
        if removed {
            tracing::info!(
                identity = %mask_email(identity),
                event = "code_purged",
                "Verification code purged"
            );
        }
        Ok(removed)
    }
}
