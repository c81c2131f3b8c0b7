//! Integration tests for the operations API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use relief_engine::ReliefStore;
use relief_server::{build_router, AppState};
use relief_types::{
    City, CityId, CityKind, Coordinates, Disaster, DisasterId, DisasterStatus, HubId, ResourceHub,
    ResourceKind, ResourceStock, RiskCategory,
};
use serde_json::Value;
use tower::ServiceExt;

/// One coastal city at the origin, two hubs one and two degrees east,
/// one critical disaster needing 100 medical kits.
fn make_test_state() -> AppState {
    let mut store = ReliefStore::new();

    let city = City {
        id: CityId::from("C1"),
        name: String::from("Port City"),
        coordinates: Coordinates { lat: 0.0, lng: 0.0 },
        population: 1_000_000,
        kind: CityKind::Coastal,
        primary_risks: vec![RiskCategory::Cyclone, RiskCategory::Flood],
        accessibility: Some(0.8),
    };
    store.cities.insert(city.id.clone(), city);

    let near = hub("H1", "Hub One", 1.0, &[(ResourceKind::MedicalKits, 100)]);
    store.hubs.insert(near.id.clone(), near);
    let far = hub(
        "H2",
        "Hub Two",
        2.0,
        &[(ResourceKind::MedicalKits, 100), (ResourceKind::FoodKits, 50)],
    );
    store.hubs.insert(far.id.clone(), far);

    let mut resource_needs = BTreeMap::new();
    resource_needs.insert(ResourceKind::MedicalKits, 100);
    let disaster = Disaster {
        id: DisasterId::from("D1"),
        name: String::from("Cyclone Test"),
        kind: String::from("cyclone"),
        city_id: CityId::from("C1"),
        severity: 4,
        status: DisasterStatus::Active,
        priority: String::from("critical"),
        affected_population: 120_000,
        resource_needs,
        current_allocation: BTreeMap::new(),
    };
    store.disasters.insert(disaster.id.clone(), disaster);

    AppState::new(store)
}

fn hub(id: &str, name: &str, lng: f64, stocks: &[(ResourceKind, u32)]) -> ResourceHub {
    let resources = stocks
        .iter()
        .map(|&(kind, available)| {
            (
                kind,
                ResourceStock {
                    available,
                    allocated: 0,
                    total_capacity: available,
                },
            )
        })
        .collect();
    ResourceHub {
        id: HubId::from(id),
        name: String::from(name),
        location: String::from("Port City"),
        coordinates: Coordinates { lat: 0.0, lng },
        resources,
        capacity_status: Some(String::from("high")),
    }
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(state: &AppState, path: &str) -> (StatusCode, Value) {
    let response = build_router(state.clone())
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post_json(state: &AppState, path: &str, body: Value) -> (StatusCode, Value) {
    let response = build_router(state.clone())
        .oneshot(
            Request::post(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state();
    let response = build_router(state)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_health() {
    let state = make_test_state();
    let (status, json) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_dashboard_aggregates() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["overview"]["totalDisasters"], 1);
    assert_eq!(json["overview"]["criticalDisasters"], 1);
    assert_eq!(json["overview"]["totalAffected"], 120_000);
    assert_eq!(json["overview"]["totalResources"]["medical_kits"], 200);
    assert_eq!(json["overview"]["totalResources"]["food_kits"], 50);
    assert_eq!(json["overview"]["totalResources"]["tents"], 0);
    assert_eq!(json["recentAllocations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_disasters_joins_city_info() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/disasters").await;

    assert_eq!(status, StatusCode::OK);
    let disasters = json.as_array().unwrap();
    assert_eq!(disasters.len(), 1);
    assert_eq!(disasters[0]["id"], "D1");
    assert_eq!(disasters[0]["type"], "cyclone");
    assert_eq!(disasters[0]["cityInfo"]["name"], "Port City");
}

#[tokio::test]
async fn test_get_disaster_by_id() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/disasters/D1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Cyclone Test");
    assert_eq!(json["severity"], 4);
    assert_eq!(json["cityInfo"]["id"], "C1");
}

#[tokio::test]
async fn test_get_disaster_not_found() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/disasters/D404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert!(json["error"].as_str().unwrap().contains("D404"));
}

#[tokio::test]
async fn test_list_hubs_and_get_hub() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/hubs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (status, json) = get(&state, "/api/hubs/H1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Hub One");
    assert_eq!(json["resources"]["medical_kits"]["available"], 100);
    assert_eq!(json["resources"]["medical_kits"]["total_capacity"], 100);

    let (status, _) = get(&state, "/api/hubs/H404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_cities() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/cities").await;

    assert_eq!(status, StatusCode::OK);
    let cities = json.as_array().unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0]["name"], "Port City");
    assert_eq!(cities[0]["type"], "coastal");
}

#[tokio::test]
async fn test_prediction_for_coastal_city() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/predictions/C1").await;

    assert_eq!(status, StatusCode::OK);
    // base 0.75 * coastal 1.2 * population boost 1.2 clamps to 1.0.
    assert!((json["riskScore"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(json["riskLevel"], "high");
    assert!((json["confidence"].as_f64().unwrap() - 0.85).abs() < 1e-9);
    assert_eq!(json["factors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_prediction_unknown_city() {
    let state = make_test_state();
    let (status, _) = get(&state, "/api/predictions/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_optimize_picks_nearest_covering_hub() {
    let state = make_test_state();
    let (status, json) = post_json(&state, "/api/optimize/D1", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hubId"], "H1");
    assert_eq!(json["hubName"], "Hub One");
    assert_eq!(json["city"], "Port City");
    // One degree of longitude at the equator, road factor 1.2.
    assert_eq!(json["distance"], 133);
    assert_eq!(json["deliveryHours"], 2);
    assert_eq!(json["allocation"]["medical_kits"], 100);
    // 1.0*0.4 + (1/2.33)*0.3 + 0.8*0.2 + 0.5*0.1
    assert!((json["score"].as_f64().unwrap() - 0.7388).abs() < 1e-3);
}

#[tokio::test]
async fn test_optimize_unknown_disaster() {
    let state = make_test_state();
    let (status, _) = post_json(&state, "/api/optimize/D404", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_optimize_with_no_eligible_hub() {
    let state = make_test_state();
    {
        let mut store = state.store.write().await;
        let disaster = store.disasters.get_mut(&DisasterId::from("D1")).unwrap();
        disaster.resource_needs.insert(ResourceKind::Tents, 10);
    }

    // No hub stocks tents, so no hub can cover every outstanding need.
    let (status, json) = post_json(&state, "/api/optimize/D1", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No suitable allocation found");
}

#[tokio::test]
async fn test_allocate_updates_stock_and_ledger() {
    let state = make_test_state();
    let (status, json) = post_json(
        &state,
        "/api/allocate",
        serde_json::json!({
            "disasterId": "D1",
            "hubId": "H1",
            "resources": { "medical_kits": 40 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["allocation"]["resources"]["medical_kits"], 40);
    assert_eq!(json["allocation"]["status"], "dispatched");

    // Mutation is visible to subsequent reads.
    let (_, hub) = get(&state, "/api/hubs/H1").await;
    assert_eq!(hub["resources"]["medical_kits"]["available"], 60);
    assert_eq!(hub["resources"]["medical_kits"]["allocated"], 40);

    let (_, disaster) = get(&state, "/api/disasters/D1").await;
    assert_eq!(disaster["currentAllocation"]["medical_kits"], 40);

    let (status, ledger) = get(&state, "/api/allocations").await;
    assert_eq!(status, StatusCode::OK);
    let records = ledger.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["hub"]["name"], "Hub One");
    assert_eq!(records[0]["disaster"]["id"], "D1");
    assert_eq!(records[0]["city"]["name"], "Port City");

    let (_, board) = get(&state, "/api/dashboard").await;
    assert_eq!(board["recentAllocations"].as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_allocations_keep_stock_accounting_consistent() {
    let state = make_test_state();

    // Five writers race for the same hub, together draining its stock
    // exactly. The store's write lock must serialize them; any lost or
    // doubled update shows up in the final figures.
    let mut handles = Vec::new();
    for _ in 0..5 {
        let task_state = state.clone();
        handles.push(tokio::spawn(async move {
            let response = build_router(task_state)
                .oneshot(
                    Request::post("/api/allocate")
                        .header("content-type", "application/json")
                        .body(Body::from(
                            serde_json::json!({
                                "disasterId": "D1",
                                "hubId": "H1",
                                "resources": { "medical_kits": 20 }
                            })
                            .to_string(),
                        ))
                        .unwrap(),
                )
                .await
                .unwrap();
            response.status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let (_, hub) = get(&state, "/api/hubs/H1").await;
    assert_eq!(hub["resources"]["medical_kits"]["available"], 0);
    assert_eq!(hub["resources"]["medical_kits"]["allocated"], 100);

    let (_, disaster) = get(&state, "/api/disasters/D1").await;
    assert_eq!(disaster["currentAllocation"]["medical_kits"], 100);

    let (_, ledger) = get(&state, "/api/allocations").await;
    assert_eq!(ledger.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_allocate_overdraw_is_rejected_without_mutation() {
    let state = make_test_state();
    let (status, json) = post_json(
        &state,
        "/api/allocate",
        serde_json::json!({
            "disasterId": "D1",
            "hubId": "H1",
            "resources": { "medical_kits": 150 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["status"], 409);

    // The failed request left no trace.
    let (_, hub) = get(&state, "/api/hubs/H1").await;
    assert_eq!(hub["resources"]["medical_kits"]["available"], 100);
    let (_, ledger) = get(&state, "/api/allocations").await;
    assert_eq!(ledger.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_allocate_unknown_disaster() {
    let state = make_test_state();
    let (status, _) = post_json(
        &state,
        "/api/allocate",
        serde_json::json!({
            "disasterId": "D404",
            "hubId": "H1",
            "resources": { "medical_kits": 10 }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_allocate_empty_request_is_bad_request() {
    let state = make_test_state();
    let (status, _) = post_json(
        &state,
        "/api/allocate",
        serde_json::json!({
            "disasterId": "D1",
            "hubId": "H1",
            "resources": {}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chatbot_answers_from_live_state() {
    let state = make_test_state();
    let (status, json) = post_json(
        &state,
        "/api/chatbot",
        serde_json::json!({ "message": "list disasters" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reply = json["response"].as_str().unwrap();
    assert!(reply.contains("Cyclone Test in Port City"));
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_chatbot_fallback() {
    let state = make_test_state();
    let (status, json) = post_json(
        &state,
        "/api/chatbot",
        serde_json::json!({ "message": "xyzzy" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["response"].as_str().unwrap().starts_with("Sorry"));
}
