//! Request and response bodies

pub mod account;
pub mod verification;

pub use account::{CredentialsRequest, EmailRequest, UserResponse};
pub use verification::VerifyCodeRequest;
