//! CORS middleware configuration for cross-origin requests.
//!
//! Browser clients call the JSON endpoints directly, so the allowed origins
//! come from `CORS_ALLOWED_ORIGINS`. A `*` entry accepts any origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use mg_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::debug!("CORS accepts any origin");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
