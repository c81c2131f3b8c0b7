//! Error types for the `relief-engine` crate.
//!
//! All fallible engine operations return [`EngineError`]. Not-found and
//! insufficient-stock conditions are ordinary client-visible failures;
//! none of them is retried.

use relief_types::{CityId, DisasterId, HubId, ResourceKind};

/// Errors that can occur during engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A city was not found in the loaded data set.
    #[error("city not found: {0}")]
    CityNotFound(CityId),

    /// A disaster was not found in the loaded data set.
    #[error("disaster not found: {0}")]
    DisasterNotFound(DisasterId),

    /// A resource hub was not found in the loaded data set.
    #[error("resource hub not found: {0}")]
    HubNotFound(HubId),

    /// An allocation request asked a hub for more units than it has.
    ///
    /// The whole request is rejected before any state is mutated, so a
    /// failed apply is a no-op.
    #[error(
        "hub {hub} has {available} {kind:?} available, {requested} requested"
    )]
    InsufficientStock {
        /// The hub that cannot cover the request.
        hub: HubId,
        /// The resource kind that fell short.
        kind: ResourceKind,
        /// Units requested.
        requested: u32,
        /// Units actually available.
        available: u32,
    },

    /// An allocation request contained no positive quantity.
    #[error("allocation request for disaster {0} carries no resources")]
    EmptyRequest(DisasterId),

    /// Arithmetic overflow during a checked stock update.
    #[error("arithmetic overflow in stock accounting")]
    ArithmeticOverflow,

    /// An internal error that should not occur in normal operation.
    #[error("internal engine error: {0}")]
    Internal(&'static str),
}
