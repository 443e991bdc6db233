//! Route table

pub mod account;
pub mod verification;

use actix_web::web;

/// Register every JSON endpoint on the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-code", web::post().to(verification::send_code))
        .route("/verify-code", web::post().to(verification::verify_code))
        .route("/register", web::post().to(account::register))
        .route(
            "/send-activation-code",
            web::post().to(account::send_activation_code),
        )
        .route(
            "/verify-activation-code",
            web::post().to(account::verify_activation_code),
        )
        .route("/login", web::post().to(account::login));
}
