//! REST endpoint handlers for the Observer server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/event` | Submit one journey event |
//! | `GET` | `/api/state` | Current journey document |
//! | `GET` | `/api/diagnostics` | Engine counters, boarding window, subscribers |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{Html, IntoResponse};
use serde::Serialize;
use tracing::warn;
use waypoint_types::{EventRequest, EventResponse, JourneyEvent};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /event
// ---------------------------------------------------------------------------

/// Reconcile one event and return the full resulting document.
///
/// Any event name is accepted. Names outside the vocabulary and events
/// whose guard fails leave the document unchanged but are still
/// acknowledged and broadcast. Only a body that is not
/// `{"event": "<string>"}` is refused.
pub async fn submit_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Json<EventResponse>, ObserverError> {
    let Json(request) = payload.inspect_err(|rejection| {
        warn!(error = %rejection, "Rejected malformed event submission");
    })?;

    let event = JourneyEvent::parse(&request.event);
    let applied = state.submit(&event).await;

    Ok(Json(EventResponse::ok(applied.snapshot)))
}

// ---------------------------------------------------------------------------
// GET /api/state
// ---------------------------------------------------------------------------

/// Return the current journey document.
pub async fn get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.snapshot().await)
}

// ---------------------------------------------------------------------------
// GET /api/diagnostics
// ---------------------------------------------------------------------------

/// Return internal counters that are not part of the journey document.
pub async fn get_diagnostics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.diagnostics().await)
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with the current journey and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot().await;
    let subscribers = state.subscriber_count();

    let airport = escape_html(snapshot.current_airport().unwrap_or("-"));
    let itinerary = snapshot
        .itinerary
        .iter()
        .map(|code| escape_html(code))
        .collect::<Vec<_>>()
        .join(" &rarr; ");
    let leg = snapshot.current_leg_index.saturating_add(1);
    let legs = snapshot.itinerary.len();
    let location = wire_name(&snapshot.current_location);
    let overall = wire_name(&snapshot.overall_state);
    let risk = snapshot.connection_risk_score;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Waypoint</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>Waypoint</h1>
    <p class="subtitle">{itinerary}</p>

    <div>
        <div class="metric">
            <div class="label">Airport</div>
            <div class="value">{airport}</div>
        </div>
        <div class="metric">
            <div class="label">Leg</div>
            <div class="value">{leg}/{legs}</div>
        </div>
        <div class="metric">
            <div class="label">Location</div>
            <div class="value">{location}</div>
        </div>
        <div class="metric">
            <div class="label">Overall</div>
            <div class="value">{overall}</div>
        </div>
        <div class="metric">
            <div class="label">Risk</div>
            <div class="value">{risk}%</div>
        </div>
        <div class="metric">
            <div class="label">Watchers</div>
            <div class="value">{subscribers}</div>
        </div>
    </div>

    <ul>
        <li>POST /event</li>
        <li>WS <a href="/ws">/ws</a></li>
        <li>GET <a href="/api/state">/api/state</a></li>
        <li>GET <a href="/api/diagnostics">/api/diagnostics</a></li>
    </ul>
</body>
</html>"#
    ))
}

/// The serialized name of a state value, e.g. `MOVING_TO_GATE`.
fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => "-".to_owned(),
    }
}

/// Escape text for an HTML body.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
