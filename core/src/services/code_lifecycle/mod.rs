//! Verification code lifecycle
//!
//! One primitive for time-boxed, single-use codes:
//! - Issuing a random 6-digit code (last-issued-wins per identity)
//! - Expiry-checked verification with constant-time comparison
//! - Single-use consumption through compare-and-delete
//!
//! It is generic over the [`CodeStore`](crate::repositories::CodeStore), so the
//! same logic backs standalone email verification and account activation.

mod clock;
mod config;
mod manager;


pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CodeLifecycleConfig;
pub use manager::CodeLifecycleManager;
