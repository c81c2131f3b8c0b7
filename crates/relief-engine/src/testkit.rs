//! Shared fixtures for engine unit tests.

use std::collections::BTreeMap;

use chrono::Utc;
use relief_types::{
    AllocationId, AllocationRecord, AllocationStatus, City, CityId, CityKind, Coordinates,
    Disaster, DisasterId, DisasterStatus, HubId, ResourceHub, ResourceKind, ResourceStock,
    RiskCategory,
};

use crate::store::ReliefStore;

/// Build a city fixture.
pub fn city(id: &str, lat: f64, lng: f64, accessibility: Option<f64>) -> City {
    City {
        id: CityId::from(id),
        name: format!("City {id}"),
        coordinates: Coordinates { lat, lng },
        population: 1_000_000,
        kind: CityKind::Coastal,
        primary_risks: vec![RiskCategory::Cyclone, RiskCategory::Flood],
        accessibility,
    }
}

/// Build a hub fixture with fully-available stocks.
pub fn hub(id: &str, lat: f64, lng: f64, stocks: &[(ResourceKind, u32)]) -> ResourceHub {
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
        name: format!("Hub {id}"),
        location: format!("City {id}"),
        coordinates: Coordinates { lat, lng },
        resources,
        capacity_status: Some(String::from("high")),
    }
}

/// Build a disaster fixture with the given needs and nothing allocated.
pub fn disaster(id: &str, city_id: &str, needs: &[(ResourceKind, u32)]) -> Disaster {
    Disaster {
        id: DisasterId::from(id),
        name: format!("Disaster {id}"),
        kind: String::from("cyclone"),
        city_id: CityId::from(city_id),
        severity: 4,
        status: DisasterStatus::Active,
        priority: String::from("critical"),
        affected_population: 120_000,
        resource_needs: needs.iter().copied().collect(),
        current_allocation: BTreeMap::new(),
    }
}

/// The reference scenario used across engine tests:
///
/// - City `C1` at (0, 0) with accessibility 0.8.
/// - Hub `H1` at (0, 1): 100 medical kits, no history (133 km by road).
/// - Hub `H2` at (0, 2): 100 medical kits plus 50 food kits (267 km).
/// - Disaster `D1` in `C1` needing 100 medical kits, nothing allocated.
pub fn store_with_scenario() -> ReliefStore {
    let mut store = ReliefStore::new();

    let c1 = city("C1", 0.0, 0.0, Some(0.8));
    store.cities.insert(c1.id.clone(), c1);

    let h1 = hub("H1", 0.0, 1.0, &[(ResourceKind::MedicalKits, 100)]);
    store.hubs.insert(h1.id.clone(), h1);
    let h2 = hub(
        "H2",
        0.0,
        2.0,
        &[(ResourceKind::MedicalKits, 100), (ResourceKind::FoodKits, 50)],
    );
    store.hubs.insert(h2.id.clone(), h2);

    let d1 = disaster("D1", "C1", &[(ResourceKind::MedicalKits, 100)]);
    store.disasters.insert(d1.id.clone(), d1);

    store
}

/// A ledger record with the given status, shipped from the given hub.
pub fn record(hub_id: &str, status: AllocationStatus) -> AllocationRecord {
    let mut resources = BTreeMap::new();
    resources.insert(ResourceKind::FoodKits, 10);
    AllocationRecord {
        id: AllocationId::generate(),
        disaster_id: DisasterId::from("D1"),
        hub_id: HubId::from(hub_id),
        resources,
        distance: 133,
        estimated_delivery_hours: 2,
        status,
        timestamp: Utc::now(),
        priority: String::from("critical"),
    }
}

/// A delivered ledger record shipped from the given hub.
pub fn delivered_record(hub_id: &str) -> AllocationRecord {
    record(hub_id, AllocationStatus::Delivered)
}
