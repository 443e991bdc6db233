//! Domain entities representing core business objects.

pub mod account;
pub mod verification_record;

// Re-export commonly used types
pub use account::Account;
pub use verification_record::{
    VerificationRecord, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_CODE_TTL_MS,
};
