//! Mock email notifier
//!
//! Logs messages instead of sending them. Used in development and tests;
//! the last code per recipient can be read back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use mg_core::domain::CodePurpose;
use mg_core::errors::NotificationError;
use mg_core::services::Notifier;
use mg_shared::utils::validation::{is_valid_email, mask_email};

use super::templates::CodeEmailContent;

/// Mock notifier for development and testing
#[derive(Clone, Default)]
pub struct MockEmailNotifier {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
    /// Last code sent to each recipient
    last_codes: Arc<RwLock<HashMap<String, (CodePurpose, String)>>>,
    /// Validity window quoted in the rendered message
    ttl_minutes: i64,
}

impl MockEmailNotifier {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl_minutes,
            ..Default::default()
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Last code sent to `recipient` for `purpose`
    pub async fn last_code(&self, recipient: &str, purpose: CodePurpose) -> Option<String> {
        match self.last_codes.read().await.get(recipient) {
            Some((sent_purpose, code)) if *sent_purpose == purpose => Some(code.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl Notifier for MockEmailNotifier {
    async fn send(
        &self,
        identity: &str,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<(), NotificationError> {
        if !is_valid_email(identity) {
            return Err(NotificationError::InvalidRecipient {
                recipient: mask_email(identity),
            });
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(identity = %mask_email(identity), "Mock email: simulated failure");
            return Err(NotificationError::delivery("Simulated email failure"));
        }

        let content = CodeEmailContent::new(purpose, code, self.ttl_minutes);
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.last_codes
            .write()
            .await
            .insert(identity.to_string(), (purpose, code.to_string()));

        info!(
            identity = %mask_email(identity),
            subject = %content.subject,
            message_number = count,
            event = "mock_email_sent",
            "Mock email delivered"
        );
        tracing::debug!(body = %content.text, "Mock email body");

        Ok(())
    }
}
