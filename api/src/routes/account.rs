//! Registration, activation and login endpoints

use actix_web::{web, HttpResponse};
use validator::Validate;

use mg_core::domain::VerifyOutcome;
use mg_shared::SuccessResponse;

use crate::app::AppState;
use crate::dto::{CredentialsRequest, EmailRequest, UserResponse, VerifyCodeRequest};
use crate::handlers::{handle_domain_error, handle_rejection, handle_validation_errors};

/// Handler for POST /register
///
/// Creates (or replaces) an inactive account and emails its activation code.
/// Registering an already active address answers `409 account_already_active`.
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .accounts
        .register(&request.email, &request.password)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /send-activation-code
pub async fn send_activation_code(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.accounts.resend_activation_code(&request.email).await {
        Ok(_) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /verify-activation-code
///
/// On success the account becomes active and its code is consumed.
pub async fn verify_activation_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .accounts
        .verify_activation_code(&request.email, &request.code)
        .await
    {
        Ok(VerifyOutcome::Accepted) => HttpResponse::Ok().json(SuccessResponse::ok()),
        Ok(VerifyOutcome::Rejected(reason)) => handle_rejection(reason),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /login
///
/// # Response
///
/// ```json
/// { "success": true, "user": { "email": "user@example.com", "is_active": true, "created_at": 1700000000000 } }
/// ```
///
/// No session or token is issued.
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.accounts.login(&request.email, &request.password).await {
        Ok(account) => {
            HttpResponse::Ok().json(SuccessResponse::with_user(UserResponse::from(account)))
        }
        Err(error) => handle_domain_error(error),
    }
}
