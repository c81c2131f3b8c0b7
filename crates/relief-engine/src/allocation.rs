//! Applying an allocation: hub/disaster mutation plus ledger append.
//!
//! [`apply`] is the only write path in the engine. It validates the whole
//! request against current hub availability before touching any state, so
//! a rejected request is a no-op ("all or nothing"). Overdraws are
//! refused outright rather than clamped, which keeps the stock invariant
//! `available + allocated == total_capacity` intact.
//!
//! The caller is expected to hold exclusive access to the store for the
//! duration of the call (the serving layer holds its write lock), which
//! makes the read-modify-write atomic per entity.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;

use relief_types::{
    AllocationId, AllocationRecord, AllocationStatus, DisasterId, HubId, ResourceKind,
};

use crate::error::EngineError;
use crate::geo;
use crate::store::ReliefStore;

/// Apply an allocation of `resources` from `hub_id` to `disaster_id`.
///
/// Only kinds present in the request with a positive quantity take
/// effect; zero entries are ignored. On success the hub's stock moves
/// from `available` to `allocated`, the disaster's `current_allocation`
/// grows, and a `dispatched` record is appended to the ledger. The same
/// request applied twice doubles the effect; apply is deliberately not
/// idempotent.
///
/// # Errors
///
/// - [`EngineError::DisasterNotFound`] / [`EngineError::HubNotFound`] /
///   [`EngineError::CityNotFound`] for unknown identifiers.
/// - [`EngineError::EmptyRequest`] when no entry has a positive quantity.
/// - [`EngineError::InsufficientStock`] when any requested quantity
///   exceeds the hub's current availability; nothing is mutated.
pub fn apply(
    store: &mut ReliefStore,
    disaster_id: &DisasterId,
    hub_id: &HubId,
    resources: &BTreeMap<ResourceKind, u32>,
) -> Result<AllocationRecord, EngineError> {
    let shipment: BTreeMap<ResourceKind, u32> = resources
        .iter()
        .filter(|&(_, &quantity)| quantity > 0)
        .map(|(&kind, &quantity)| (kind, quantity))
        .collect();
    if shipment.is_empty() {
        return Err(EngineError::EmptyRequest(disaster_id.clone()));
    }

    // Resolve everything and validate stock before the first mutation.
    let disaster = store.disaster(disaster_id)?;
    let city = store.disaster_city(disaster)?;
    let hub = store.hub(hub_id)?;

    for (&kind, &quantity) in &shipment {
        let available = hub.available(kind);
        if quantity > available {
            return Err(EngineError::InsufficientStock {
                hub: hub_id.clone(),
                kind,
                requested: quantity,
                available,
            });
        }
    }

    let distance = geo::road_distance_km(city.coordinates, hub.coordinates);
    let priority = disaster.priority.clone();

    // Mutate the hub: available -> allocated.
    let hub = store
        .hubs
        .get_mut(hub_id)
        .ok_or_else(|| EngineError::HubNotFound(hub_id.clone()))?;
    for (&kind, &quantity) in &shipment {
        let stock = hub
            .resources
            .get_mut(&kind)
            .ok_or(EngineError::InsufficientStock {
                hub: hub_id.clone(),
                kind,
                requested: quantity,
                available: 0,
            })?;
        stock.available = stock
            .available
            .checked_sub(quantity)
            .ok_or(EngineError::ArithmeticOverflow)?;
        stock.allocated = stock
            .allocated
            .checked_add(quantity)
            .ok_or(EngineError::ArithmeticOverflow)?;
    }

    // Mutate the disaster: grow current_allocation, zero-initializing.
    let disaster = store
        .disasters
        .get_mut(disaster_id)
        .ok_or_else(|| EngineError::DisasterNotFound(disaster_id.clone()))?;
    for (&kind, &quantity) in &shipment {
        let supplied = disaster.current_allocation.entry(kind).or_insert(0);
        *supplied = supplied
            .checked_add(quantity)
            .ok_or(EngineError::ArithmeticOverflow)?;
    }

    let record = AllocationRecord {
        id: AllocationId::generate(),
        disaster_id: disaster_id.clone(),
        hub_id: hub_id.clone(),
        resources: shipment,
        distance,
        estimated_delivery_hours: geo::delivery_hours(distance),
        status: AllocationStatus::Dispatched,
        timestamp: Utc::now(),
        priority,
    };

    info!(
        disaster = %disaster_id,
        hub = %hub_id,
        record = %record.id,
        distance_km = distance,
        "allocation applied"
    );

    Ok(store.append_allocation(record)?.clone())
}
