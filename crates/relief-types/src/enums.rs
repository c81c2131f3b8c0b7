//! Enumeration types for the Relief allocation service.
//!
//! Resource kinds, city classifications, risk categories, and record
//! status values are all closed sets. Encoding them as enums keeps the
//! scoring weight tables, mutation paths, and serialized response shapes
//! in sync: adding or removing a kind is a compile-time-checked change.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resource kinds
// ---------------------------------------------------------------------------

/// A kind of relief resource stocked at hubs and needed by disasters.
///
/// The set is fixed; dynamic resource types are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Dry-ration food kits.
    FoodKits,
    /// First-aid and medicine kits.
    MedicalKits,
    /// Family shelter tents.
    Tents,
    /// Sealed drinking-water packets.
    WaterPackets,
}

impl ResourceKind {
    /// All resource kinds, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::FoodKits,
        Self::MedicalKits,
        Self::Tents,
        Self::WaterPackets,
    ];

    /// Fixed priority weight used by the allocation scoring engine.
    ///
    /// Policy choice: medical supplies and water outrank shelter and food.
    pub const fn priority_weight(self) -> f64 {
        match self {
            Self::FoodKits => 1.0,
            Self::MedicalKits => 1.5,
            Self::Tents => 1.2,
            Self::WaterPackets => 1.3,
        }
    }

    /// The snake_case wire label for this kind.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FoodKits => "food_kits",
            Self::MedicalKits => "medical_kits",
            Self::Tents => "tents",
            Self::WaterPackets => "water_packets",
        }
    }

    /// A human-readable display name for chat and report output.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FoodKits => "Food kits",
            Self::MedicalKits => "Medical kits",
            Self::Tents => "Tents",
            Self::WaterPackets => "Water packets",
        }
    }
}

// ---------------------------------------------------------------------------
// City classification
// ---------------------------------------------------------------------------

/// Geographic classification of a city, used by the risk engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CityKind {
    /// On the coastline; exposed to cyclones and storm surge.
    Coastal,
    /// On a major river; exposed to seasonal flooding.
    River,
    /// Away from coast and major rivers.
    Inland,
}

impl CityKind {
    /// Multiplicative factor applied to a city's base risk score.
    pub const fn risk_factor(self) -> f64 {
        match self {
            Self::Coastal => 1.2,
            Self::River => 1.1,
            Self::Inland => 0.9,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk categories
// ---------------------------------------------------------------------------

/// A category of natural hazard a city is exposed to.
///
/// Datasets may carry categories outside the weighted set; those
/// deserialize to [`Other`](Self::Other) and score a flat 0.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RiskCategory {
    /// Tropical cyclone / severe storm.
    Cyclone,
    /// River or flash flooding.
    Flood,
    /// Seismic activity.
    Earthquake,
    /// Prolonged water scarcity.
    Drought,
    /// Any hazard outside the weighted set.
    #[serde(other)]
    Other,
}

impl RiskCategory {
    /// Fixed per-category weight used by the risk prediction engine.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Cyclone => 0.8,
            Self::Flood => 0.7,
            Self::Earthquake => 0.6,
            Self::Drought => 0.5,
            Self::Other => 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

/// Categorical risk level derived from a numeric risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RiskLevel {
    /// Score above 0.7.
    High,
    /// Score above 0.4, up to 0.7.
    Moderate,
    /// Score of 0.4 or below.
    Low,
}

impl RiskLevel {
    /// Classify a risk score against the fixed 0.7 / 0.4 thresholds.
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Self::High
        } else if score > 0.4 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

// ---------------------------------------------------------------------------
// Record statuses
// ---------------------------------------------------------------------------

/// Lifecycle status of an allocation record in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AllocationStatus {
    /// Shipment has left the hub.
    Dispatched,
    /// Shipment is en route.
    InTransit,
    /// Shipment reached the disaster site.
    Delivered,
    /// Shipment was lost or turned back.
    Failed,
}

/// Lifecycle status of a disaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DisasterStatus {
    /// Ongoing; accepting allocations.
    Active,
    /// Under control but still staffed.
    Contained,
    /// Closed out.
    Resolved,
}
