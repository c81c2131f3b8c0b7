//! Core entity structs for the Relief allocation service.
//!
//! Covers the reference data (`City`), the mutable state (`ResourceHub`,
//! `Disaster`), the append-only ledger record (`AllocationRecord`), and
//! the computed risk projection (`RiskAssessment`).
//!
//! Wire format is camelCase to match the datasets and the React dashboard
//! consumer; resource-kind map keys stay snake_case (see
//! [`ResourceKind`]).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AllocationStatus, CityKind, DisasterStatus, ResourceKind, RiskCategory, RiskLevel,
};
use crate::ids::{AllocationId, CityId, DisasterId, HubId};

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A geographic coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coordinates {
    /// Latitude in degrees (positive north).
    pub lat: f64,
    /// Longitude in degrees (positive east).
    pub lng: f64,
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

/// Immutable city reference data, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct City {
    /// Unique city identifier.
    pub id: CityId,
    /// City name.
    pub name: String,
    /// Geographic position.
    pub coordinates: Coordinates,
    /// Resident population.
    pub population: u64,
    /// Geographic classification (coastal / river / inland).
    #[serde(rename = "type")]
    pub kind: CityKind,
    /// Hazards this city is primarily exposed to, in priority order.
    pub primary_risks: Vec<RiskCategory>,
    /// Road/rail accessibility score in `[0, 1]`. Higher is easier to reach.
    #[serde(default)]
    pub accessibility: Option<f64>,
}

impl City {
    /// Accessibility score with the neutral 0.5 default for cities whose
    /// dataset record omits the attribute.
    pub fn accessibility_score(&self) -> f64 {
        self.accessibility.unwrap_or(0.5)
    }
}

// ---------------------------------------------------------------------------
// Resource hub
// ---------------------------------------------------------------------------

/// Stock levels for one resource kind at a hub.
///
/// Invariant: `available + allocated == total_capacity` at all times
/// (absent external replenishment). The allocation engine rejects any
/// request that would break it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceStock {
    /// Units on hand and unreserved.
    pub available: u32,
    /// Units committed to dispatched allocations.
    pub allocated: u32,
    /// Total storage capacity for this kind.
    pub total_capacity: u32,
}

impl ResourceStock {
    /// Whether the stock invariant holds for this entry.
    pub fn is_balanced(&self) -> bool {
        // Sum in u64 so pathological dataset values cannot overflow.
        u64::from(self.available) + u64::from(self.allocated) == u64::from(self.total_capacity)
    }
}

/// A warehouse stocking relief resources. Mutable: stocks move from
/// `available` to `allocated` on every applied allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ResourceHub {
    /// Unique hub identifier.
    pub id: HubId,
    /// Hub name.
    pub name: String,
    /// Human-readable location label (usually the host city's name).
    pub location: String,
    /// Geographic position.
    pub coordinates: Coordinates,
    /// Per-kind stock levels.
    pub resources: BTreeMap<ResourceKind, ResourceStock>,
    /// Coarse capacity label carried from the dataset (e.g. `"high"`).
    #[serde(default)]
    pub capacity_status: Option<String>,
}

impl ResourceHub {
    /// Available units of a kind, zero when the hub does not stock it.
    pub fn available(&self, kind: ResourceKind) -> u32 {
        self.resources.get(&kind).map_or(0, |stock| stock.available)
    }
}

// ---------------------------------------------------------------------------
// Disaster
// ---------------------------------------------------------------------------

/// An active disaster. Mutable: `current_allocation` grows on every
/// applied allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Disaster {
    /// Unique disaster identifier.
    pub id: DisasterId,
    /// Disaster name (e.g. "Cyclone Vayu").
    pub name: String,
    /// Disaster type label (e.g. "cyclone", "flood").
    #[serde(rename = "type")]
    pub kind: String,
    /// The affected city.
    pub city_id: CityId,
    /// Severity on a 1 (minor) to 5 (catastrophic) scale.
    pub severity: u8,
    /// Lifecycle status.
    pub status: DisasterStatus,
    /// Operational priority label (e.g. "critical").
    pub priority: String,
    /// Estimated number of people affected.
    pub affected_population: u64,
    /// Required quantity per resource kind.
    pub resource_needs: BTreeMap<ResourceKind, u32>,
    /// Quantity already supplied per resource kind.
    #[serde(default)]
    pub current_allocation: BTreeMap<ResourceKind, u32>,
}

impl Disaster {
    /// Remaining unweighted need for one kind: `max(0, need - allocated)`.
    pub fn remaining_need(&self, kind: ResourceKind) -> u32 {
        let needed = self.resource_needs.get(&kind).copied().unwrap_or(0);
        let supplied = self.current_allocation.get(&kind).copied().unwrap_or(0);
        needed.saturating_sub(supplied)
    }

    /// Whether this disaster counts as critical (severity 4 or 5).
    pub const fn is_critical(&self) -> bool {
        self.severity >= 4
    }
}

// ---------------------------------------------------------------------------
// Allocation record
// ---------------------------------------------------------------------------

/// One entry in the append-only allocation ledger.
///
/// Records are never mutated after creation; hub reliability scoring reads
/// the delivered fraction of each hub's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AllocationRecord {
    /// Generated, time-ordered record identifier.
    pub id: AllocationId,
    /// The disaster that received the shipment.
    pub disaster_id: DisasterId,
    /// The hub that shipped it.
    pub hub_id: HubId,
    /// Quantities actually shipped, per kind.
    pub resources: BTreeMap<ResourceKind, u32>,
    /// Road distance from hub to disaster city, in km.
    pub distance: u32,
    /// Estimated delivery time in whole hours.
    pub estimated_delivery_hours: u32,
    /// Current shipment status.
    pub status: AllocationStatus,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// The disaster's priority label at creation time.
    pub priority: String,
}

// ---------------------------------------------------------------------------
// Risk assessment
// ---------------------------------------------------------------------------

/// Computed disaster-risk projection for a city.
///
/// `confidence` and `factors` are fixed placeholder outputs, not derived
/// quantities; the product has no real confidence model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RiskAssessment {
    /// The assessed city.
    pub city_id: CityId,
    /// Risk score in `[0, 1]`.
    pub risk_score: f64,
    /// Categorical level derived from the score.
    pub risk_level: RiskLevel,
    /// Fixed confidence placeholder (always 0.85).
    pub confidence: f64,
    /// Fixed contributing-factor labels.
    pub factors: Vec<String>,
    /// When this assessment was computed.
    pub last_updated: DateTime<Utc>,
}
