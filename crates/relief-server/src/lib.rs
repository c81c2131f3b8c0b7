//! HTTP API server for the Relief operations dashboard.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for the dashboard overview, disasters, resource
//!   hubs, cities, the allocation ledger, and live risk predictions
//! - **Mutation endpoints** for computing and applying resource
//!   allocations (`POST /api/optimize/{id}`, `POST /api/allocate`)
//! - **A canned chatbot** (`POST /api/chatbot`) answering operational
//!   questions from live store state
//! - **Minimal HTML status page** (`GET /`) with links to the API
//!
//! # Architecture
//!
//! All handlers operate on one in-memory [`ReliefStore`] loaded from
//! the static datasets at startup and shared behind a
//! [`tokio::sync::RwLock`]. Reads take the read guard; the single
//! write path (`/api/allocate`) holds the write guard across its whole
//! read-modify-write so stock accounting stays consistent under
//! concurrent requests.
//!
//! [`ReliefStore`]: relief_engine::ReliefStore

pub mod chat;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
