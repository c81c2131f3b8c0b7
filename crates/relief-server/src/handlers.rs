//! REST API endpoint handlers for the operations server.
//!
//! All handlers operate on the in-memory [`ReliefStore`] via the shared
//! [`AppState`]. Reads take the store's read lock; the allocation
//! handler holds the write lock across its whole read-modify-write.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/dashboard` | Aggregate overview + recent allocations |
//! | `GET` | `/api/disasters` | List disasters joined with city info |
//! | `GET` | `/api/disasters/{id}` | Single disaster + city info |
//! | `GET` | `/api/hubs` | List resource hubs |
//! | `GET` | `/api/hubs/{id}` | Single hub |
//! | `GET` | `/api/cities` | City reference data |
//! | `GET` | `/api/predictions/{cityId}` | Live risk assessment |
//! | `POST` | `/api/optimize/{disasterId}` | Best-hub allocation plan |
//! | `POST` | `/api/allocate` | Apply an allocation |
//! | `GET` | `/api/allocations` | Ledger joined with related entities |
//! | `POST` | `/api/chatbot` | Canned chatbot responses |
//! | `GET` | `/health` | Liveness probe |

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use serde::Deserialize;

use relief_engine::{allocation, risk, scoring, summary};
use relief_types::{CityId, Disaster, DisasterId, HubId, ResourceKind};

use crate::chat;
use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/allocate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateRequest {
    /// The disaster to supply.
    pub disaster_id: DisasterId,
    /// The hub to ship from.
    pub hub_id: HubId,
    /// Quantity to ship per resource kind.
    pub resources: BTreeMap<ResourceKind, u32>,
}

/// Body of `POST /api/chatbot`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text user message.
    pub message: String,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing service status and API links.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    let disasters = store.disasters.len();
    let hubs = store.hubs.len();
    let allocations = store.allocations().len();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Relief Operations API</title>
</head>
<body>
    <h1>Relief Operations API</h1>
    <p>Status: RUNNING -- {disasters} disasters, {hubs} hubs, {allocations} ledger records</p>
    <ul>
        <li><a href="/api/dashboard">/api/dashboard</a> -- Overview aggregates</li>
        <li><a href="/api/disasters">/api/disasters</a> -- Active disasters</li>
        <li><a href="/api/hubs">/api/hubs</a> -- Resource hubs</li>
        <li><a href="/api/cities">/api/cities</a> -- City reference data</li>
        <li><a href="/api/allocations">/api/allocations</a> -- Allocation ledger</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/dashboard
// ---------------------------------------------------------------------------

/// Aggregate dashboard figures plus the five most recent allocations.
pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(summary::dashboard(&store))
}

// ---------------------------------------------------------------------------
// GET /api/disasters [/{id}]
// ---------------------------------------------------------------------------

/// List all disasters, each joined with its city's info.
///
/// A missing city never fails the listing; the join falls back to a
/// placeholder "Unknown City" record.
pub async fn list_disasters(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.read().await;
    let disasters: Vec<serde_json::Value> = store
        .disasters
        .values()
        .map(|disaster| disaster_with_city(&store, disaster))
        .collect::<Result<_, _>>()?;
    Ok(Json(disasters))
}

/// Single disaster joined with its city's info.
pub async fn get_disaster(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.read().await;
    let disaster = store.disaster(&DisasterId::from(id))?;
    Ok(Json(disaster_with_city(&store, disaster)?))
}

/// Serialize a disaster with an embedded `cityInfo` join.
fn disaster_with_city(
    store: &relief_engine::ReliefStore,
    disaster: &Disaster,
) -> Result<serde_json::Value, ApiError> {
    let mut value = serde_json::to_value(disaster)?;
    let city = store.city_or_placeholder(&disaster.city_id);
    if let Some(object) = value.as_object_mut() {
        object.insert(String::from("cityInfo"), serde_json::to_value(city)?);
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// GET /api/hubs [/{id}]
// ---------------------------------------------------------------------------

/// List all resource hubs with current stock levels.
pub async fn list_hubs(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    let hubs: Vec<_> = store.hubs.values().cloned().collect();
    Json(hubs)
}

/// Single hub with current stock levels.
pub async fn get_hub(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.read().await;
    let hub = store.hub(&HubId::from(id))?;
    Ok(Json(hub.clone()))
}

// ---------------------------------------------------------------------------
// GET /api/cities
// ---------------------------------------------------------------------------

/// City reference data.
pub async fn list_cities(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    let cities: Vec<_> = store.cities.values().cloned().collect();
    Json(cities)
}

// ---------------------------------------------------------------------------
// GET /api/predictions/{cityId}
// ---------------------------------------------------------------------------

/// Live disaster-risk assessment for a city.
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.read().await;
    let assessment = risk::assess(&store, &CityId::from(city_id))?;
    Ok(Json(assessment))
}

// ---------------------------------------------------------------------------
// POST /api/optimize/{disasterId}
// ---------------------------------------------------------------------------

/// Compute the best-hub allocation plan for a disaster.
///
/// Unknown disasters and cities map to 404; a disaster no hub can supply
/// is also reported as a not-found result with a distinct message so
/// clients can tell the two apart.
pub async fn optimize(
    State(state): State<AppState>,
    Path(disaster_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.read().await;
    let disaster_id = DisasterId::from(disaster_id);
    let plan = scoring::optimize(&store, &disaster_id)?
        .ok_or_else(|| ApiError::NotFound(String::from("No suitable allocation found")))?;
    Ok(Json(plan))
}

// ---------------------------------------------------------------------------
// POST /api/allocate
// ---------------------------------------------------------------------------

/// Apply an allocation from a hub to a disaster.
///
/// Holds the store's write lock for the whole read-modify-write so
/// concurrent allocations cannot interleave against the same hub or
/// disaster.
pub async fn allocate(
    State(state): State<AppState>,
    Json(request): Json<AllocateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = state.store.write().await;
    let record = allocation::apply(
        &mut store,
        &request.disaster_id,
        &request.hub_id,
        &request.resources,
    )?;

    Ok(Json(serde_json::json!({
        "success": true,
        "allocation": record,
        "message": "Resources allocated successfully",
    })))
}

// ---------------------------------------------------------------------------
// GET /api/allocations
// ---------------------------------------------------------------------------

/// The full ledger, each record joined with its disaster, hub, and
/// (through the disaster) city. Missing join targets serialize as null.
pub async fn list_allocations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.read().await;
    let records: Vec<serde_json::Value> = store
        .allocations()
        .iter()
        .map(|record| {
            let disaster = store.disasters.get(&record.disaster_id);
            let hub = store.hubs.get(&record.hub_id);
            let city = disaster.and_then(|d| store.cities.get(&d.city_id));
            let mut value = serde_json::to_value(record)?;
            if let Some(object) = value.as_object_mut() {
                object.insert(String::from("disaster"), serde_json::to_value(disaster)?);
                object.insert(String::from("hub"), serde_json::to_value(hub)?);
                object.insert(String::from("city"), serde_json::to_value(city)?);
            }
            Ok(value)
        })
        .collect::<Result<_, ApiError>>()?;
    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// POST /api/chatbot
// ---------------------------------------------------------------------------

/// Answer a free-text question with a canned response.
pub async fn chatbot(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let store = state.store.read().await;
    let response = chat::respond(&store, &request.message);
    Json(serde_json::json!({
        "response": response,
        "timestamp": Utc::now(),
    }))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
