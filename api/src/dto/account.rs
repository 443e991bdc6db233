//! Account bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

use mg_core::domain::Account;

/// Body carrying only an email (`/send-code`, `/send-activation-code`)
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct EmailRequest {
    #[validate(length(min = 3, max = 255, message = "Email is required"))]
    pub email: String,
}

/// Body of `/register` and `/login`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 3, max = 255, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 1024, message = "Password is required"))]
    pub password: String,
}

/// Public view of an account returned by `/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub email: String,
    pub is_active: bool,
    /// Registration time (ms since epoch)
    pub created_at: i64,
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        Self {
            email: account.identity,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}
