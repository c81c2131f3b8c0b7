//! Shared type definitions for the Relief allocation service.
//!
//! This crate is the single source of truth for all types used across the
//! Relief workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the operations dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe dataset-key wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (resource kinds, classifications, statuses)
//! - [`structs`] -- Core entity structs (cities, hubs, disasters, ledger records)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AllocationStatus, CityKind, DisasterStatus, ResourceKind, RiskCategory, RiskLevel,
};
pub use ids::{AllocationId, CityId, DisasterId, HubId};
pub use structs::{
    AllocationRecord, City, Coordinates, Disaster, ResourceHub, ResourceStock, RiskAssessment,
};
