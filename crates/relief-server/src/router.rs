//! Axum router construction for the operations API.
//!
//! Assembles all REST routes into a single [`Router`] with CORS
//! middleware enabled for cross-origin dashboard access.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the operations server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/dashboard` -- aggregate overview
/// - `GET /api/disasters` -- list disasters with city info
/// - `GET /api/disasters/{id}` -- single disaster
/// - `GET /api/hubs` -- list resource hubs
/// - `GET /api/hubs/{id}` -- single hub
/// - `GET /api/cities` -- city reference data
/// - `GET /api/predictions/{cityId}` -- risk assessment
/// - `POST /api/optimize/{disasterId}` -- best-hub plan
/// - `POST /api/allocate` -- apply an allocation
/// - `GET /api/allocations` -- allocation ledger
/// - `POST /api/chatbot` -- canned chatbot
/// - `GET /health` -- liveness probe
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/disasters", get(handlers::list_disasters))
        .route("/api/disasters/{id}", get(handlers::get_disaster))
        .route("/api/hubs", get(handlers::list_hubs))
        .route("/api/hubs/{id}", get(handlers::get_hub))
        .route("/api/cities", get(handlers::list_cities))
        .route("/api/predictions/{city_id}", get(handlers::get_prediction))
        .route("/api/optimize/{disaster_id}", post(handlers::optimize))
        .route("/api/allocate", post(handlers::allocate))
        .route("/api/allocations", get(handlers::list_allocations))
        .route("/api/chatbot", post(handlers::chatbot))
        // Probes
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
