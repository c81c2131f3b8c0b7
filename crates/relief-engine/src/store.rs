//! The in-memory relief data store.
//!
//! [`ReliefStore`] owns every collection the engine operates on: immutable
//! city reference data, mutable hub and disaster state, and the
//! append-only allocation ledger. It is created once at startup from the
//! static datasets and lives for the process lifetime; nothing is ever
//! deleted.
//!
//! The store itself is single-threaded. The serving layer wraps it in one
//! `tokio::sync::RwLock` and holds the write guard across each full
//! read-modify-write, which serializes mutations per entity and keeps the
//! stock invariant (`available + allocated == total_capacity`) intact
//! under concurrent requests.

use std::collections::BTreeMap;

use relief_types::{
    AllocationRecord, City, CityId, CityKind, Coordinates, Disaster, DisasterId, HubId,
    ResourceHub,
};

use crate::error::EngineError;

/// All relief data held in process memory.
#[derive(Debug, Default, Clone)]
pub struct ReliefStore {
    /// City reference data keyed by city ID. Never mutated.
    pub cities: BTreeMap<CityId, City>,
    /// Resource hubs keyed by hub ID. Stocks mutate on allocation.
    pub hubs: BTreeMap<HubId, ResourceHub>,
    /// Active disasters keyed by disaster ID. Allocations mutate
    /// `current_allocation`.
    pub disasters: BTreeMap<DisasterId, Disaster>,
    /// The allocation ledger, in insertion order. Append-only.
    allocations: Vec<AllocationRecord>,
}

impl ReliefStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            cities: BTreeMap::new(),
            hubs: BTreeMap::new(),
            disasters: BTreeMap::new(),
            allocations: Vec::new(),
        }
    }

    // -- Lookups ------------------------------------------------------------

    /// Look up a city by ID.
    pub fn city(&self, id: &CityId) -> Result<&City, EngineError> {
        self.cities
            .get(id)
            .ok_or_else(|| EngineError::CityNotFound(id.clone()))
    }

    /// Look up a hub by ID.
    pub fn hub(&self, id: &HubId) -> Result<&ResourceHub, EngineError> {
        self.hubs
            .get(id)
            .ok_or_else(|| EngineError::HubNotFound(id.clone()))
    }

    /// Look up a disaster by ID.
    pub fn disaster(&self, id: &DisasterId) -> Result<&Disaster, EngineError> {
        self.disasters
            .get(id)
            .ok_or_else(|| EngineError::DisasterNotFound(id.clone()))
    }

    /// The city a disaster is located in.
    pub fn disaster_city(&self, disaster: &Disaster) -> Result<&City, EngineError> {
        self.city(&disaster.city_id)
    }

    /// City info for read-path joins: falls back to a placeholder record
    /// when the join target is missing so listings never fail outright.
    pub fn city_or_placeholder(&self, id: &CityId) -> City {
        self.cities
            .get(id)
            .cloned()
            .unwrap_or_else(|| placeholder_city(id))
    }

    // -- Ledger -------------------------------------------------------------

    /// All ledger records, in insertion order.
    pub fn allocations(&self) -> &[AllocationRecord] {
        &self.allocations
    }

    /// Append a record to the ledger. Records are never mutated afterward.
    ///
    /// Returns a reference to the appended record.
    pub fn append_allocation(
        &mut self,
        record: AllocationRecord,
    ) -> Result<&AllocationRecord, EngineError> {
        self.allocations.push(record);
        self.allocations
            .last()
            .ok_or(EngineError::Internal("failed to retrieve record after append"))
    }

    /// Ledger records shipped from one hub, for reliability scoring.
    pub fn hub_history(&self, hub: &HubId) -> impl Iterator<Item = &AllocationRecord> {
        self.allocations.iter().filter(move |r| &r.hub_id == hub)
    }

    // -- Integrity ----------------------------------------------------------

    /// Verify the stock invariant across every hub and kind.
    ///
    /// Returns the IDs of hubs with at least one unbalanced stock entry.
    /// Healthy data returns an empty vector.
    pub fn unbalanced_hubs(&self) -> Vec<HubId> {
        self.hubs
            .values()
            .filter(|hub| hub.resources.values().any(|stock| !stock.is_balanced()))
            .map(|hub| hub.id.clone())
            .collect()
    }
}

/// Placeholder for a missing city join target.
fn placeholder_city(id: &CityId) -> City {
    City {
        id: id.clone(),
        name: String::from("Unknown City"),
        coordinates: Coordinates { lat: 0.0, lng: 0.0 },
        population: 0,
        kind: CityKind::Inland,
        primary_risks: Vec::new(),
        accessibility: None,
    }
}
