//! Observer API server for Waypoint.
//!
//! This crate is the network boundary around the journey engine:
//!
//! - **Event submission** (`POST /event`) reconciles one named event and
//!   answers with the full resulting document
//! - **`WebSocket` endpoint** (`/ws`) pushes the current document on
//!   connect and again after every accepted event
//! - **REST reads** for the current document and engine diagnostics
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! [`AppState`] serializes all event submissions through one mutex around
//! the [`JourneyEngine`](waypoint_core::JourneyEngine) and hands each
//! resulting snapshot to a [`Broadcaster`](waypoint_core::Broadcaster).
//! Each `WebSocket` connection drains its own channel, so a slow or dead
//! client never holds up event processing.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve, start_server};
pub use state::{AppState, DiagnosticsView, SharedSnapshot};
