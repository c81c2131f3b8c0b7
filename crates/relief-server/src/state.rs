//! Shared application state for the operations API server.
//!
//! [`AppState`] holds the in-memory [`ReliefStore`] behind a single
//! read-write lock. Read handlers take the read guard; the allocation
//! handler holds the write guard across its whole read-modify-write,
//! which serializes mutations per entity and keeps the stock invariant
//! intact under concurrent requests.

use std::sync::Arc;

use relief_engine::ReliefStore;
use tokio::sync::RwLock;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// All relief data, loaded once at startup.
    pub store: Arc<RwLock<ReliefStore>>,
}

impl AppState {
    /// Create application state around a loaded store.
    pub fn new(store: ReliefStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
