//! Main entry point for the Convoca backend.
//!
//! This file initializes the Axum web server, wires the tiered store and
//! the collaborator client into the session engine, and registers all API
//! routes and middleware. It orchestrates the application's startup and
//! defines its overall structure.

use std::sync::Arc;

use adapters::{ApiClient, EphemeralBackend, HttpApiClient, PersistentBackend, TieredStore};
use axum::routing::get;
use axum::Router;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::api::position::routes::position_router;
use backend::api::registration::routes::registration_router;
use backend::config::Config;
use backend::middleware::log_requests;
use backend::session::routes::session_router;
use backend::session::SessionService;
use backend::AppState;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let config = Config::from_env();
    let store = build_store(&config);
    let api: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(config.api_base_url.clone()));

    let session = SessionService::new(store, Arc::clone(&api));
    session.rehydrate();

    let state = Arc::new(AppState::new(session, api));
    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api/session", session_router())
        .nest("/api/position", position_router())
        .nest("/api/registration", registration_router(Arc::clone(&state)))
        .layer(axum::middleware::from_fn(log_requests))
        .with_state(state);

    tracing::debug!("listening on {}", config.bind_addr);

    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

fn build_store(config: &Config) -> TieredStore {
    match &config.storage_dir {
        Some(dir) => TieredStore::new(
            Box::new(PersistentBackend::open(dir.join("session-store.json"))),
            Box::new(EphemeralBackend::new()),
            config.namespace.clone(),
        ),
        None => {
            tracing::warn!("no storage directory configured, sessions will not persist");
            TieredStore::disconnected()
        }
    }
}

async fn root_handler() -> &'static str {
    "Welcome to Convoca!"
}
