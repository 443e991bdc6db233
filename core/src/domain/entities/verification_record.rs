//! Time-boxed verification code record.
//!
//! A record binds one live code to an identity (an email address). The same
//! shape backs both standalone verification codes and the activation code
//! embedded in an account, so expiry and matching are decided here once.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{RejectReason, VerifyOutcome};

/// Length of a code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default validity window: 10 minutes
pub const DEFAULT_CODE_TTL_MS: i64 = 10 * 60 * 1000;

/// A code issued to an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Email address the code was issued to
    pub identity: String,

    /// The 6-digit code
    pub code: String,

    /// Issue time in milliseconds since the Unix epoch
    pub issued_at: i64,
}

impl VerificationRecord {
    /// Wrap an existing code, e.g. one loaded from storage
    pub fn new(identity: impl Into<String>, code: impl Into<String>, issued_at: i64) -> Self {
        Self {
            identity: identity.into(),
            code: code.into(),
            issued_at,
        }
    }

    /// Issue a fresh random code for `identity` at `issued_at`
    pub fn issue(identity: impl Into<String>, issued_at: i64) -> Self {
        Self::new(identity, Self::generate_code(), issued_at)
    }

    /// Uniform random code in `[CODE_MIN, CODE_MAX]`, drawn from the OS RNG.
    ///
    /// The range has no leading zeros, so the decimal form is always
    /// `CODE_LENGTH` digits.
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Moment the record stops being valid
    pub fn expires_at(&self, ttl_ms: i64) -> i64 {
        self.issued_at.saturating_add(ttl_ms)
    }

    /// A record is expired once strictly more than `ttl_ms` has elapsed
    pub fn is_expired_at(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms.saturating_sub(self.issued_at) > ttl_ms
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Decide the outcome of presenting `submitted` at `now_ms`.
    ///
    /// Expiry is checked before the code itself, so a correct but stale code
    /// reports `Expired`.
    pub fn check(&self, submitted: &str, now_ms: i64, ttl_ms: i64) -> VerifyOutcome {
        if self.is_expired_at(now_ms, ttl_ms) {
            VerifyOutcome::Rejected(RejectReason::Expired)
        } else if self.matches(submitted) {
            VerifyOutcome::Accepted
        } else {
            VerifyOutcome::Rejected(RejectReason::Mismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn test_generated_codes_stay_in_range() {
        for _ in 0..10_000 {
            let code = VerificationRecord::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = code.parse().expect("generated code should be numeric");
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| VerificationRecord::generate_code()).collect();
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_issue_sets_fields() {
        let record = VerificationRecord::issue("a@x.com", T0);
        assert_eq!(record.identity, "a@x.com");
        assert_eq!(record.issued_at, T0);
        assert_eq!(record.code.len(), CODE_LENGTH);
        assert_eq!(record.expires_at(DEFAULT_CODE_TTL_MS), T0 + 600_000);
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let record = VerificationRecord::new("a@x.com", "482913", T0);
        assert!(!record.is_expired_at(T0 + DEFAULT_CODE_TTL_MS, DEFAULT_CODE_TTL_MS));
        assert!(record.is_expired_at(T0 + DEFAULT_CODE_TTL_MS + 1, DEFAULT_CODE_TTL_MS));
    }

    #[test]
    fn test_check_outcomes() {
        let record = VerificationRecord::new("a@x.com", "482913", T0);

        assert_eq!(record.check("482913", T0 + 1_000, DEFAULT_CODE_TTL_MS), VerifyOutcome::Accepted);
        assert_eq!(
            record.check("000000", T0 + 1_000, DEFAULT_CODE_TTL_MS),
            VerifyOutcome::Rejected(RejectReason::Mismatch)
        );
        assert_eq!(
            record.check("482913", T0 + 601_000, DEFAULT_CODE_TTL_MS),
            VerifyOutcome::Rejected(RejectReason::Expired)
        );
    }

    #[test]
    fn test_matches_rejects_prefixes() {
        let record = VerificationRecord::new("a@x.com", "482913", T0);
        assert!(!record.matches("48291"));
        assert!(!record.matches("4829130"));
        assert!(!record.matches(""));
    }

    #[test]
    fn test_serialization() {
        let record = VerificationRecord::new("a@x.com", "482913", T0);
        let json = serde_json::to_string(&record).unwrap();
        let restored: VerificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }
}
