use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `/verify-code` and `/verify-activation-code`
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 3, max = 255, message = "Email is required"))]
    pub email: String,

    /// Any non-empty value; a wrong code of any length is `invalid_code`
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}
