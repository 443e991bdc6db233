//! Business services built on the code lifecycle manager.

pub mod account;
pub mod code_lifecycle;
pub mod notifier;
pub mod verification;

pub use account::{AccountService, CredentialHasher, RegistrationResult};
pub use code_lifecycle::{
    Clock, CodeLifecycleConfig, CodeLifecycleManager, ManualClock, SystemClock,
};
pub use notifier::Notifier;
pub use verification::{EmailVerificationService, SendCodeResult};
