//! # MailGate API
//!
//! actix-web surface over the verification and account services. The
//! binary in `main.rs` wires real backends; tests build [`app::AppState`]
//! over in-memory stores and drive [`app::create_app`] directly.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
