//! Types returned by the verification services

use serde::Serialize;

use crate::domain::entities::VerificationRecord;

/// Result of issuing and sending a code
#[derive(Debug, Clone, Serialize)]
pub struct SendCodeResult {
    /// The stored record
    #[serde(skip_serializing)]
    pub record: VerificationRecord,
    /// When the code stops being valid (ms since epoch)
    pub expires_at: i64,
}
