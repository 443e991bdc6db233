//! Application state and factory
//!
//! This module holds the shared service handles and builds the Actix-web
//! application used by both the binary and the HTTP tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use mg_core::repositories::{AccountRepository, CodeStore};
use mg_core::services::{
    AccountService, Clock, CodeLifecycleConfig, CredentialHasher, EmailVerificationService,
    Notifier,
};
use mg_shared::config::CorsConfig;
use mg_shared::ErrorResponse;

use crate::handlers::error::json_config;
use crate::middleware::cors::create_cors;
use crate::routes;

/// Standalone email verification over type-erased collaborators
pub type VerificationService = EmailVerificationService<dyn CodeStore, dyn Notifier>;

/// Account activation and login over type-erased collaborators
pub type Accounts = AccountService<dyn AccountRepository, dyn Notifier, dyn CredentialHasher>;

/// Application state that holds shared services
pub struct AppState {
    pub verification: Arc<VerificationService>,
    pub accounts: Arc<Accounts>,
    /// Upper bound for JSON request bodies
    pub max_payload_size: usize,
}

impl AppState {
    /// Build both services on the system clock
    pub fn new(
        codes: Arc<dyn CodeStore>,
        accounts: Arc<dyn AccountRepository>,
        notifier: Arc<dyn Notifier>,
        hasher: Arc<dyn CredentialHasher>,
        config: CodeLifecycleConfig,
    ) -> Self {
        Self {
            verification: Arc::new(EmailVerificationService::new(
                codes,
                notifier.clone(),
                config.clone(),
            )),
            accounts: Arc::new(AccountService::new(accounts, notifier, hasher, config)),
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }

    /// Build both services sharing an injected clock
    pub fn with_clock(
        codes: Arc<dyn CodeStore>,
        accounts: Arc<dyn AccountRepository>,
        notifier: Arc<dyn Notifier>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
        config: CodeLifecycleConfig,
    ) -> Self {
        Self {
            verification: Arc::new(EmailVerificationService::with_clock(
                codes,
                notifier.clone(),
                clock.clone(),
                config.clone(),
            )),
            accounts: Arc::new(AccountService::with_clock(
                accounts, notifier, hasher, clock, config,
            )),
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }

    pub fn with_max_payload_size(mut self, limit: usize) -> Self {
        self.max_payload_size = limit;
        self
    }
}

const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024;

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let json = json_config(app_state.max_payload_size);

    App::new()
        .app_data(app_state)
        .app_data(json)
        // Outermost first: request span, then CORS
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "mailgate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
