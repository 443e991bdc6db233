//! JSON envelopes returned by the HTTP endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of every successful call: `{"success": true, ...}`
///
/// Endpoints that return data (login) put it under `user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T = ()> {
    /// Always `true`
    pub success: bool,

    /// Optional payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<T>,
}

impl SuccessResponse<()> {
    /// Plain acknowledgement without payload
    pub fn ok() -> Self {
        Self {
            success: true,
            user: None,
        }
    }
}

impl<T> SuccessResponse<T> {
    /// Acknowledgement carrying a user payload
    pub fn with_user(user: T) -> Self {
        Self {
            success: true,
            user: Some(user),
        }
    }
}

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_success_omits_user() {
        let json = serde_json::to_value(SuccessResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }

    #[test]
    fn test_success_with_user() {
        let json = serde_json::to_value(SuccessResponse::with_user("a@x.com")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"], "a@x.com");
    }

    #[test]
    fn test_error_details() {
        let error = ErrorResponse::new("validation_error", "Email required")
            .add_detail("field", "email");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["details"]["field"], "email");
        assert!(json.get("timestamp").is_some());
    }
}
