//! Shared application state for the Observer API server.
//!
//! [`AppState`] pairs the journey engine with the snapshot broadcaster. The
//! engine sits behind one mutex, which is the only write path to the
//! document. Both [`AppState::submit`] and [`AppState::subscribe`] take that
//! lock, which gives two guarantees:
//!
//! - broadcasts leave in the same order events were accepted, and
//! - a new subscriber's first snapshot is exactly the state the next
//!   broadcast builds on, so nothing is missed or repeated.
//!
//! Publishing only enqueues into per-subscriber channels; the socket writes
//! happen in each connection's own task, outside the lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;
use waypoint_core::config::WaypointConfig;
use waypoint_core::{
    Applied, Broadcaster, EngineDiagnostics, JourneyEngine, SubscriberId, Subscription,
};
use waypoint_types::{JourneyEvent, JourneyState};

/// Snapshot type carried to subscribers.
pub type SharedSnapshot = Arc<JourneyState>;

/// Read-only view served by `GET /api/diagnostics`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DiagnosticsView {
    /// Engine counters and boarding window.
    #[serde(flatten)]
    pub engine: EngineDiagnostics,
    /// Currently registered subscribers.
    pub subscribers: usize,
    /// When this server started.
    pub started_at: DateTime<Utc>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug)]
pub struct AppState {
    journey: Mutex<JourneyEngine>,
    broadcaster: Broadcaster<SharedSnapshot>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state around an engine, buffering up to `subscriber_buffer`
    /// snapshots per observer.
    pub fn new(engine: JourneyEngine, subscriber_buffer: usize) -> Self {
        Self {
            journey: Mutex::new(engine),
            broadcaster: Broadcaster::new(subscriber_buffer),
            started_at: Utc::now(),
        }
    }

    /// Create state from loaded configuration.
    pub fn from_config(config: &WaypointConfig) -> Self {
        Self::new(
            config.journey.build_engine(),
            config.broadcast.subscriber_buffer,
        )
    }

    /// Reconcile one event and broadcast the resulting snapshot.
    ///
    /// Every submission is broadcast, including guard rejections and
    /// unrecognized names.
    pub async fn submit(&self, event: &JourneyEvent) -> Applied {
        let mut engine = self.journey.lock().await;
        let applied = engine.apply(event);

        let report = self.broadcaster.publish(&Arc::new(applied.snapshot.clone()));
        debug!(
            event = %event,
            delivered = report.delivered,
            dropped = report.dropped,
            "Snapshot broadcast"
        );

        applied
    }

    /// Register a new observer; its first message is the current snapshot.
    pub async fn subscribe(&self) -> Subscription<SharedSnapshot> {
        let engine = self.journey.lock().await;
        self.broadcaster
            .subscribe(Arc::new(engine.snapshot().clone()))
    }

    /// Remove an observer. Safe to call more than once.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    /// Copy of the current document.
    pub async fn snapshot(&self) -> JourneyState {
        self.journey.lock().await.snapshot().clone()
    }

    /// Engine diagnostics plus subscriber count.
    pub async fn diagnostics(&self) -> DiagnosticsView {
        let engine = self.journey.lock().await.diagnostics().clone();
        DiagnosticsView {
            engine,
            subscribers: self.broadcaster.subscriber_count(),
            started_at: self.started_at,
        }
    }

    /// Number of connected observers.
    pub fn subscriber_count(&self) -> usize {
        self.broadcaster.subscriber_count()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&WaypointConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use waypoint_core::{BoardingPolicy, RiskPolicy};
    use waypoint_types::{Location, LoungeState};

    #[tokio::test]
    async fn late_subscriber_starts_from_current_snapshot() {
        let state = AppState::default();
        let mut early = state.subscribe().await;

        state.submit(&JourneyEvent::VipEnteredTerminal).await;
        let mut late = state.subscribe().await;

        let first = late.recv().await.map(|s| s.lounge_state);
        assert_eq!(first, Some(LoungeState::Reserved));

        state.submit(&JourneyEvent::FaceVerified).await;

        let early_seen: Vec<Location> = [
            early.try_recv(),
            early.try_recv(),
            early.try_recv(),
        ]
        .into_iter()
        .flatten()
        .map(|s| s.current_location)
        .collect();
        assert_eq!(
            early_seen,
            vec![Location::Outside, Location::Checkin, Location::Lounge]
        );

        let late_next = late.try_recv();
        assert_eq!(late_next.map(|s| s.current_location), Some(Location::Lounge));
        assert!(late.try_recv().is_none());
    }

    #[tokio::test]
    async fn dropped_subscriber_does_not_block_others() {
        let state = AppState::default();
        let gone = state.subscribe().await;
        let mut kept = state.subscribe().await;
        drop(gone);

        state.submit(&JourneyEvent::VipNoShow).await;
        state.submit(&JourneyEvent::Reset).await;

        assert_eq!(state.subscriber_count(), 1);
        let received: Vec<_> = std::iter::from_fn(|| kept.try_recv()).collect();
        assert_eq!(received.len(), 3);
    }

    #[tokio::test]
    async fn rejected_and_unknown_events_are_still_broadcast() {
        let state = AppState::default();
        let mut sub = state.subscribe().await;
        let _ = sub.try_recv();

        state.submit(&JourneyEvent::FaceVerified).await;
        state.submit(&JourneyEvent::parse("NOT_AN_EVENT")).await;

        assert!(sub.try_recv().is_some());
        assert!(sub.try_recv().is_some());

        let diagnostics = state.diagnostics().await;
        assert_eq!(diagnostics.engine.guard_rejections, 1);
        assert_eq!(diagnostics.engine.unrecognized_events, 1);
        assert_eq!(diagnostics.subscribers, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_submissions_broadcast_in_acceptance_order() {
        const SUBMISSIONS: u8 = 80;

        let risk = RiskPolicy {
            delay_increment: 1,
            ..RiskPolicy::default()
        };
        let engine = JourneyEngine::new(
            vec!["HYD".to_owned(), "DEL".to_owned(), "LHR".to_owned()],
            risk,
            BoardingPolicy::default(),
        );
        let state = Arc::new(AppState::new(engine, 256));
        let mut sub = state.subscribe().await;

        let tasks: Vec<_> = (0..SUBMISSIONS)
            .map(|_| {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    state
                        .submit(&JourneyEvent::FlightDelayed)
                        .await
                        .snapshot
                        .connection_risk_score
                })
            })
            .collect();

        let mut acks = Vec::new();
        for task in tasks {
            acks.push(task.await.unwrap());
        }
        acks.sort_unstable();
        assert_eq!(acks, (1..=SUBMISSIONS).collect::<Vec<_>>());

        let broadcast: Vec<u8> = std::iter::from_fn(|| sub.try_recv())
            .map(|s| s.connection_risk_score)
            .collect();
        assert_eq!(broadcast, (0..=SUBMISSIONS).collect::<Vec<_>>());
        assert_eq!(state.snapshot().await.connection_risk_score, SUBMISSIONS);
    }
}
