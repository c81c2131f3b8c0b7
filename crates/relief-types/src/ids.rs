//! Type-safe identifier wrappers around dataset keys.
//!
//! Every entity in the relief data set has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. Cities, hubs, and
//! disasters are keyed by short human-assigned codes from the source
//! datasets (`"C1"`, `"hub-delhi"`, ...); allocation records receive a
//! generated, time-ordered identifier at creation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around a dataset key [`String`] with
/// standard derives.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
        )]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the raw key.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

define_key! {
    /// Unique identifier for a city (immutable reference data).
    CityId
}

define_key! {
    /// Unique identifier for a resource hub.
    HubId
}

define_key! {
    /// Unique identifier for an active disaster.
    DisasterId
}

define_key! {
    /// Unique identifier for an allocation record in the ledger.
    AllocationId
}

impl AllocationId {
    /// Generate a fresh allocation identifier.
    ///
    /// Uses UUID v7 (time-ordered) so ledger identifiers sort in creation
    /// order, prefixed `alloc-` to match the ledger's historical key scheme.
    pub fn generate() -> Self {
        Self(format!("alloc-{}", Uuid::now_v7()))
    }
}
