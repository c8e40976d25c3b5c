//! Axum router — maps the legacy /cellradar/ paths to handlers.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{cells::get_cells, datasets::get_datasets, radar::make_radar};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
///
/// CORS is permissive: the legacy frontend is served from a different
/// origin and the API carries no credentials. The CORS layer also answers
/// the OPTIONS preflights the original handled by hand.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/cellradar/getdatasets", get(get_datasets))
        .route("/cellradar/getcells", post(get_cells))
        .route("/cellradar/makeradar", post(make_radar))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
