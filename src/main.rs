mod config;
mod routes;
mod services;
mod state;
mod views;

use std::sync::Arc;

use crate::services::credentials::{AcceptAny, CredentialCheck};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let port = config.port;

    let credentials: Arc<dyn CredentialCheck> = Arc::new(AcceptAny);
    tracing::warn!(
        checker = credentials.name(),
        "login accepts any input; not an authentication mechanism"
    );

    tracing::info!(
        login = config.guard.login_path(),
        landing = config.guard.landing_path(),
        "route guard configured"
    );
    let state = state::AppState::new(config, credentials);

    // Spawn background eviction of idle client contexts.
    let _eviction = services::contexts::spawn_eviction_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "fleetdash listening");
    axum::serve(listener, app).await.expect("server failed");
}
