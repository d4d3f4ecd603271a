pub mod client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod storage;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

// Shared state for the whole application
pub struct AppState {
    pub store: storage::ReservationStore,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> Arc<Self> {
        let store = storage::ReservationStore::new(&config.storage.data_file);
        let existing = store.load().await.len();
        info!(
            "Reservation store at {} ({} existing reservations)",
            store.path().display(),
            existing
        );
        Arc::new(Self { store, config })
    }
}

/// Build the full application router. Unmatched paths (including unknown
/// /api/* routes) fall through to the client entry document.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::pages::routes())
        .nest("/api", controllers::routes())
        .fallback(controllers::pages::spa_fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
