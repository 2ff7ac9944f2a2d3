//! REST adapter.
//!
//! A thin layer over [`crate::market::Market`]: handlers validate and
//! translate JSON, call exactly one façade operation, and publish update
//! events for the WebSocket feed. No book state lives here.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
