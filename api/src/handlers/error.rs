use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use mg_core::domain::RejectReason;
use mg_core::errors::{DomainError, NotificationError, StoreError};
use mg_shared::ErrorResponse;

/// Convert a rejected verify outcome into a 400 response
pub fn handle_rejection(reason: RejectReason) -> HttpResponse {
    let (code, message) = match reason {
        RejectReason::NotFound => ("code_not_found", "No code found for this email"),
        RejectReason::Expired => ("code_expired", "Code expired"),
        RejectReason::Mismatch => ("invalid_code", "Invalid code"),
    };
    HttpResponse::BadRequest().json(ErrorResponse::new(code, message))
}

/// Convert a domain error into an HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::AccountNotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("user_not_found", "User not found"))
        }
        DomainError::AccountAlreadyActive => HttpResponse::Conflict().json(ErrorResponse::new(
            "account_already_active",
            "Account is already activated",
        )),
        DomainError::InvalidCredentials => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid credentials or account not activated",
        )),
        DomainError::AccountNotActive => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "account_not_active",
            "Invalid credentials or account not activated",
        )),
        // The account vanished between lookup and write
        DomainError::Storage(StoreError::OwnerMissing { .. }) => {
            HttpResponse::NotFound().json(ErrorResponse::new("user_not_found", "User not found"))
        }
        DomainError::Storage(error) => {
            tracing::error!(error = %error, "Code store failure");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("storage_error", "Server error"))
        }
        DomainError::Notification(error) => {
            tracing::error!(error = %error, "Code delivery failure");
            let message = match error {
                NotificationError::InvalidRecipient { .. } => "Email address was rejected",
                _ => "Email sending failed",
            };
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("notification_failed", message))
        }
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("internal_error", "An internal error occurred"))
        }
    }
}

/// Convert field validation failures into a 400 response listing each field
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new("validation_error", "Request validation failed");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }
    HttpResponse::BadRequest().json(response)
}

/// JSON extractor config that answers malformed bodies in the common envelope
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new("validation_error", err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_rejections_are_bad_requests() {
        for reason in [RejectReason::NotFound, RejectReason::Expired, RejectReason::Mismatch] {
            assert_eq!(handle_rejection(reason).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_domain_error_statuses() {
        let cases = vec![
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::AccountNotFound, StatusCode::NOT_FOUND),
            (DomainError::AccountAlreadyActive, StatusCode::CONFLICT),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::AccountNotActive, StatusCode::UNAUTHORIZED),
            (
                DomainError::Storage(StoreError::backend("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::Storage(StoreError::OwnerMissing { identity: "a@x.com".into() }),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::Notification(NotificationError::delivery("smtp")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(handle_domain_error(error).status(), status);
        }
    }
}
