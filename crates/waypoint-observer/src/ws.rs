//! `WebSocket` handler for live journey snapshots.
//!
//! Clients connect to `GET /ws` and immediately receive the current
//! [`JourneyState`](waypoint_types::JourneyState) as a JSON text frame,
//! followed by one frame per accepted event, in submission order. Nothing
//! needs to be sent by the client.
//!
//! A client that falls too far behind is dropped by the broadcaster; its
//! socket is then closed and it can reconnect to get a fresh snapshot.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming journey snapshots.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_journey(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the `WebSocket` lifecycle: subscribe, forward each snapshot as a
/// text frame, and unsubscribe when either side goes away.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut subscription = state.subscribe().await;
    let id = subscription.id();
    debug!(subscriber = %id, "WebSocket client connected");

    loop {
        tokio::select! {
            // Next snapshot from the broadcaster.
            snapshot = subscription.recv() => {
                let Some(snapshot) = snapshot else {
                    debug!(subscriber = %id, "Subscriber dropped by broadcaster, closing socket");
                    break;
                };
                let json = match serde_json::to_string(snapshot.as_ref()) {
                    Ok(j) => j,
                    Err(e) => {
                        warn!("Failed to serialize journey snapshot: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    debug!(subscriber = %id, "WebSocket client disconnected (send failed)");
                    break;
                }
            }
            // Client frames only matter for liveness.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(subscriber = %id, "WebSocket client disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(subscriber = %id, "WebSocket client disconnected (pong failed)");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(subscriber = %id, "WebSocket error: {e}");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    state.unsubscribe(id);
}
