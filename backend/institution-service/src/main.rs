/// Folio Institution Service - Main entry point
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use chrono::Duration;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use institution_service::config::Config;
use institution_service::db::MemoryInstitutionStore;
use institution_service::routes;
use institution_service::security::TokenIssuer;
use institution_service::validators::PasswordPolicy;
use institution_service::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Refuse to start without a signing secret.
    let config = Config::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to load configuration from environment");
        std::process::exit(1);
    });

    tracing::info!(
        "Starting institution service on {}:{}",
        config.server_host,
        config.server_port
    );

    let tokens = TokenIssuer::new(&config.jwt_secret, Duration::days(config.token_ttl_days));
    let store = Arc::new(MemoryInstitutionStore::new());
    let state = AppState::new(store, tokens, PasswordPolicy::default());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
