//! Account entity gated by an activation code.

use serde::Serialize;

use super::verification_record::VerificationRecord;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Email address, unique key
    pub identity: String,

    /// Opaque credential produced by the configured hasher
    #[serde(skip_serializing)]
    pub credential_hash: String,

    /// Whether the activation code has been confirmed
    pub is_active: bool,

    /// Outstanding activation code, if any
    #[serde(skip_serializing)]
    pub pending_activation_code: Option<String>,

    /// Issue time of `pending_activation_code` (ms since epoch)
    #[serde(skip_serializing)]
    pub activation_issued_at: Option<i64>,

    /// Registration time (ms since epoch)
    pub created_at: i64,
}

impl Account {
    /// New, inactive account without a pending code
    pub fn new(identity: impl Into<String>, credential_hash: impl Into<String>, created_at: i64) -> Self {
        Self {
            identity: identity.into(),
            credential_hash: credential_hash.into(),
            is_active: false,
            pending_activation_code: None,
            activation_issued_at: None,
            created_at,
        }
    }

    /// The pending activation code viewed as a code record
    pub fn pending_activation(&self) -> Option<VerificationRecord> {
        match (&self.pending_activation_code, self.activation_issued_at) {
            (Some(code), Some(issued_at)) => {
                Some(VerificationRecord::new(self.identity.clone(), code.clone(), issued_at))
            }
            _ => None,
        }
    }

    /// Whether `record` is exactly the pending activation code
    pub fn holds_activation(&self, record: &VerificationRecord) -> bool {
        self.pending_activation().as_ref() == Some(record)
    }

    /// Replace the pending activation code
    pub fn set_pending_activation(&mut self, record: &VerificationRecord) {
        self.pending_activation_code = Some(record.code.clone());
        self.activation_issued_at = Some(record.issued_at);
    }

    /// Drop the pending activation code
    pub fn clear_pending_activation(&mut self) {
        self.pending_activation_code = None;
        self.activation_issued_at = None;
    }

    /// Mark the account active and drop the pending code
    pub fn activate(&mut self) {
        self.is_active = true;
        self.clear_pending_activation();
    }
}
