//! Outcome of presenting a code.

use serde::{Deserialize, Serialize};

/// Why a submitted code was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No live record exists for the identity
    NotFound,
    /// The record outlived its window; it has been discarded
    Expired,
    /// The record is live but the code differs; it is kept
    Mismatch,
}

impl RejectReason {
    /// Stable identifier used in logs and API error codes
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NotFound => "not_found",
            RejectReason::Expired => "expired",
            RejectReason::Mismatch => "mismatch",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a verify call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Code matched; the record has been consumed
    Accepted,
    /// Code refused
    Rejected(RejectReason),
}

impl VerifyOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerifyOutcome::Accepted)
    }

    /// The rejection reason, if any
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            VerifyOutcome::Accepted => None,
            VerifyOutcome::Rejected(reason) => Some(*reason),
        }
    }

    /// How the record must be consumed for this outcome, if at all
    pub fn consumption(&self) -> Option<Consumption> {
        match self {
            VerifyOutcome::Accepted => Some(Consumption::Accepted),
            VerifyOutcome::Rejected(RejectReason::Expired) => Some(Consumption::Expired),
            VerifyOutcome::Rejected(_) => None,
        }
    }
}

/// Why a store is asked to remove a record.
///
/// Stores that embed the record in a larger entity use this to apply the
/// side effect of a successful verification (e.g. activating the account)
/// in the same write that removes the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Consumption {
    /// The code was accepted
    Accepted,
    /// The code was found expired
    Expired,
}
