//! Allocation scoring, risk prediction, and ledger mutation for the
//! Relief service.
//!
//! This crate is the decision core of the system: pure, synchronous
//! functions over an in-memory [`ReliefStore`] loaded once at startup.
//! The HTTP layer calls in through five entry points and owns all
//! locking; nothing here blocks or performs I/O.
//!
//! # Modules
//!
//! - [`geo`] -- Haversine road-distance estimation and delivery-time
//!   approximation (80 km/h, flat 1.2 road factor).
//! - [`risk`] -- Closed-form disaster-risk scoring from static city
//!   attributes.
//! - [`scoring`] -- Hub ranking by weighted composite score and the
//!   allocation optimizer.
//! - [`allocation`] -- The single write path: validated hub/disaster
//!   mutation plus append-only ledger record.
//! - [`summary`] -- Dashboard aggregation projections.
//! - [`store`] -- The [`ReliefStore`] holding every collection.
//! - [`error`] -- [`EngineError`] for all fallible operations.

pub mod allocation;
pub mod error;
pub mod geo;
pub mod risk;
pub mod scoring;
pub mod store;
pub mod summary;

#[cfg(test)]
pub mod testkit;

// Re-export primary types at crate root.
pub use error::EngineError;
pub use scoring::{AllocationPlan, HubScore};
pub use store::ReliefStore;
pub use summary::{Dashboard, Overview};
