//! Route table for the journey API.
//!
//! Event submission, snapshot reads, and the live stream share one
//! [`Router`]. CORS is open so a dashboard on any origin can subscribe.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the journey API router around shared state.
///
/// Routes:
/// - `GET /` -- minimal HTML status page
/// - `POST /event` -- submit a journey event
/// - `GET /ws` -- `WebSocket` snapshot stream
/// - `GET /api/state` -- current journey document
/// - `GET /api/diagnostics` -- engine diagnostics
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/event", post(handlers::submit_event))
        .route("/ws", get(ws::ws_journey))
        .route("/api/state", get(handlers::get_state))
        .route("/api/diagnostics", get(handlers::get_diagnostics))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
