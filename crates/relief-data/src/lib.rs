//! Startup dataset loading and service configuration for the Relief
//! service.
//!
//! # Modules
//!
//! - [`dataset`] -- Reads the four static JSON datasets into a
//!   [`ReliefStore`](relief_engine::ReliefStore); any failure is fatal.
//! - [`config`] -- `relief-config.yaml` loading with env overrides.

pub mod config;
pub mod dataset;

// Re-export primary types at crate root.
pub use config::{ConfigError, ServiceConfig};
pub use dataset::{DataError, load_store};
