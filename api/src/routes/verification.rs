//! Standalone email verification endpoints

use actix_web::{web, HttpResponse};
use validator::Validate;

use mg_core::domain::VerifyOutcome;
use mg_shared::SuccessResponse;

use crate::app::AppState;
use crate::dto::{EmailRequest, VerifyCodeRequest};
use crate::handlers::{handle_domain_error, handle_rejection, handle_validation_errors};

/// Handler for POST /send-code
///
/// Issues a fresh code for the email and sends it. Any earlier code for the
/// same address stops working.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// `200 {"success": true}`; `400 validation_error` for a malformed email;
/// `500 notification_failed` when the email could not be sent.
pub async fn send_code(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.verification.send_code(&request.email).await {
        Ok(_) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /verify-code
///
/// A successful check consumes the code; submitting it again yields
/// `code_not_found`.
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .verification
        .verify_code(&request.email, &request.code)
        .await
    {
        Ok(VerifyOutcome::Accepted) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Ok(VerifyOutcome::Rejected(reason)) => handle_rejection(reason),
        Err(error) => handle_domain_error(error),
    }
}
