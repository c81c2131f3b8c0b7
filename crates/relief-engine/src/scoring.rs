//! Hub ranking and allocation optimization for a disaster.
//!
//! For every hub the engine computes a composite suitability score:
//!
//! ```text
//! score = capacity * 0.4 + (1 / (distance/100 + 1)) * 0.3
//!       + accessibility * 0.2 + reliability * 0.1
//! ```
//!
//! - **capacity**: per-kind coverage of the disaster's remaining needs,
//!   weighted by the fixed resource priority table and normalized by the
//!   summed weights of the kinds actually needed. A hub with nothing
//!   available for a needed kind is excluded from ranking entirely.
//!   When no kind has remaining need the normalization denominator is
//!   zero and the capacity term is defined as 0; every hub stays
//!   eligible and distance, accessibility, and reliability decide.
//! - **distance**: road distance from the disaster's city (see
//!   [`geo`](crate::geo)), decaying hyperbolically with a 100 km scale.
//! - **accessibility**: the city's accessibility attribute (0.5 default).
//! - **reliability**: the delivered fraction of the hub's ledger history;
//!   hubs with no history get a neutral 0.5 prior rather than zero so new
//!   hubs are not unfairly penalized.
//!
//! Ranking sorts by composite score descending with hub ID ascending as
//! the deterministic tie-break. An empty ranking is a valid negative
//! result ("no suitable allocation"), distinct from a not-found error.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use relief_types::{
    AllocationStatus, City, Disaster, DisasterId, HubId, ResourceHub, ResourceKind,
};

use crate::error::EngineError;
use crate::geo;
use crate::store::ReliefStore;

/// Weight of the capacity term in the composite score.
const CAPACITY_WEIGHT: f64 = 0.4;
/// Weight of the distance term in the composite score.
const DISTANCE_WEIGHT: f64 = 0.3;
/// Weight of the accessibility term in the composite score.
const ACCESSIBILITY_WEIGHT: f64 = 0.2;
/// Weight of the reliability term in the composite score.
const RELIABILITY_WEIGHT: f64 = 0.1;

/// Distance scale (km) for the hyperbolic distance decay.
const DISTANCE_SCALE_KM: f64 = 100.0;

/// Neutral reliability prior for hubs with no ledger history.
const NEUTRAL_RELIABILITY: f64 = 0.5;

// ---------------------------------------------------------------------------
// Score types
// ---------------------------------------------------------------------------

/// Scoring breakdown for one eligible hub.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HubScore {
    /// The scored hub.
    pub hub_id: HubId,
    /// Road distance from the disaster's city, in km.
    pub distance: u32,
    /// Normalized weighted capacity coverage in `[0, 1]`.
    pub capacity_score: f64,
    /// The disaster city's accessibility score.
    pub accessibility_score: f64,
    /// Delivered fraction of the hub's history (0.5 with no history).
    pub reliability_score: f64,
    /// Final weighted composite score.
    pub score: f64,
}

/// A concrete allocation proposal for the best-ranked hub.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AllocationPlan {
    /// The disaster being supplied.
    pub disaster_id: DisasterId,
    /// The chosen hub.
    pub hub_id: HubId,
    /// Chosen hub's name, for display.
    pub hub_name: String,
    /// Disaster city's name, for display.
    pub city: String,
    /// Road distance from hub to disaster city, in km.
    pub distance: u32,
    /// Estimated delivery time in whole hours.
    pub delivery_hours: u32,
    /// Shippable quantity per kind: `min(remaining need, hub available)`.
    pub allocation: BTreeMap<ResourceKind, u32>,
    /// Outstanding (unweighted) need per kind.
    pub remaining_needs: BTreeMap<ResourceKind, u32>,
    /// The chosen hub's composite score.
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Rank every eligible hub for a disaster, best first.
///
/// Hubs that stock nothing of a needed kind are excluded. An empty vector
/// means no hub can contribute to every outstanding need.
///
/// # Errors
///
/// Returns [`EngineError::DisasterNotFound`] for an unknown disaster and
/// [`EngineError::CityNotFound`] if its city is missing from the data set.
pub fn rank_hubs(store: &ReliefStore, disaster_id: &DisasterId) -> Result<Vec<HubScore>, EngineError> {
    let disaster = store.disaster(disaster_id)?;
    let city = store.disaster_city(disaster)?;

    let mut scores: Vec<HubScore> = store
        .hubs
        .values()
        .filter_map(|hub| score_hub(store, disaster, city, hub))
        .collect();

    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.hub_id.cmp(&b.hub_id))
    });

    Ok(scores)
}

/// The best-ranked hub for a disaster, or `None` when no hub qualifies.
///
/// # Errors
///
/// Same as [`rank_hubs`].
pub fn best_hub(store: &ReliefStore, disaster_id: &DisasterId) -> Result<Option<HubScore>, EngineError> {
    Ok(rank_hubs(store, disaster_id)?.into_iter().next())
}

/// Build a concrete allocation proposal from the best-ranked hub.
///
/// Per kind the shippable quantity is `min(remaining need, available)`;
/// the delivery estimate assumes 80 km/h average transport speed.
/// Returns `None` when no hub qualifies.
///
/// # Errors
///
/// Same as [`rank_hubs`].
pub fn optimize(
    store: &ReliefStore,
    disaster_id: &DisasterId,
) -> Result<Option<AllocationPlan>, EngineError> {
    let Some(best) = best_hub(store, disaster_id)? else {
        return Ok(None);
    };

    let disaster = store.disaster(disaster_id)?;
    let city = store.disaster_city(disaster)?;
    let hub = store.hub(&best.hub_id)?;

    let mut allocation = BTreeMap::new();
    let mut remaining_needs = BTreeMap::new();
    for kind in disaster.resource_needs.keys().copied() {
        let remaining = disaster.remaining_need(kind);
        remaining_needs.insert(kind, remaining);
        allocation.insert(kind, remaining.min(hub.available(kind)));
    }

    Ok(Some(AllocationPlan {
        disaster_id: disaster_id.clone(),
        hub_id: best.hub_id.clone(),
        hub_name: hub.name.clone(),
        city: city.name.clone(),
        distance: best.distance,
        delivery_hours: geo::delivery_hours(best.distance),
        allocation,
        remaining_needs,
        score: best.score,
    }))
}

// ---------------------------------------------------------------------------
// Per-hub scoring
// ---------------------------------------------------------------------------

/// Score one hub against a disaster; `None` when the hub is ineligible.
fn score_hub(
    store: &ReliefStore,
    disaster: &Disaster,
    city: &City,
    hub: &ResourceHub,
) -> Option<HubScore> {
    let capacity = capacity_score(disaster, hub)?;

    let distance = geo::road_distance_km(city.coordinates, hub.coordinates);
    let distance_score = 1.0 / (f64::from(distance) / DISTANCE_SCALE_KM + 1.0);
    let accessibility = city.accessibility_score();
    let reliability = reliability_score(store, &hub.id);

    let score = capacity * CAPACITY_WEIGHT
        + distance_score * DISTANCE_WEIGHT
        + accessibility * ACCESSIBILITY_WEIGHT
        + reliability * RELIABILITY_WEIGHT;

    Some(HubScore {
        hub_id: hub.id.clone(),
        distance,
        capacity_score: capacity,
        accessibility_score: accessibility,
        reliability_score: reliability,
        score,
    })
}

/// Weighted, normalized coverage of the disaster's remaining needs.
///
/// Returns `None` when the hub cannot contribute to a needed kind at all,
/// which drops it from ranking. With zero remaining need across all
/// kinds the score is 0 by convention and the hub stays eligible.
fn capacity_score(disaster: &Disaster, hub: &ResourceHub) -> Option<f64> {
    let mut accumulated = 0.0;
    let mut total_weight = 0.0;

    for kind in ResourceKind::ALL {
        let remaining = disaster.remaining_need(kind);
        if remaining == 0 {
            continue;
        }
        let weight = kind.priority_weight();
        total_weight += weight;

        let available = hub.available(kind);
        if available >= remaining {
            accumulated += weight;
        } else if available > 0 {
            accumulated += f64::from(available) / f64::from(remaining) * weight;
        } else {
            return None;
        }
    }

    if total_weight > 0.0 {
        Some(accumulated / total_weight)
    } else {
        Some(0.0)
    }
}

/// Delivered fraction of a hub's ledger history, or the neutral prior.
fn reliability_score(store: &ReliefStore, hub_id: &HubId) -> f64 {
    let mut total: u32 = 0;
    let mut delivered: u32 = 0;
    for record in store.hub_history(hub_id) {
        total = total.saturating_add(1);
        if record.status == AllocationStatus::Delivered {
            delivered = delivered.saturating_add(1);
        }
    }

    if total == 0 {
        NEUTRAL_RELIABILITY
    } else {
        f64::from(delivered) / f64::from(total)
    }
}
