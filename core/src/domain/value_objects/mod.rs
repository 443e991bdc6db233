//! Value objects shared by the code lifecycle and its call sites.

pub mod code_purpose;
pub mod verify_outcome;

pub use code_purpose::CodePurpose;
pub use verify_outcome::{Consumption, RejectReason, VerifyOutcome};
