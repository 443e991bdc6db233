use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use mg_api::config::build_state;
use mg_api::create_app;
use mg_api::telemetry::init_tracing;
use mg_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    info!(
        environment = ?config.environment,
        store = ?config.store,
        "Starting MailGate API server"
    );

    let state = web::Data::new(
        build_state(&config)
            .await
            .context("failed to initialise backends")?,
    );

    let bind_address = config.server.bind_address();
    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    info!(address = %bind_address, "Listening");
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
