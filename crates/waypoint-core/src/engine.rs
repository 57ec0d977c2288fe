//! The reconciliation engine.
//!
//! [`JourneyEngine`] owns the authoritative [`JourneyState`] and applies
//! events to it one at a time through [`reconcile`]. It is synchronous and
//! holds no lock; the owner serializes access (the observer keeps it behind
//! a single mutex).
//!
//! Besides the document, the engine keeps [`EngineDiagnostics`]: counters
//! and the boarding window, which grows with each delay. None of this is
//! part of the snapshot that subscribers see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use waypoint_types::{JourneyEvent, JourneyState};

use crate::reconcile::{Outcome, RiskPolicy, reconcile};

/// How the boarding window reacts to delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardingPolicy {
    /// Minutes between now and boarding at journey start.
    #[serde(default = "default_initial_window_minutes")]
    pub initial_window_minutes: u32,

    /// Minutes added to the window for every applied `FLIGHT_DELAYED`.
    #[serde(default = "default_delay_extension_minutes")]
    pub delay_extension_minutes: u32,
}

impl Default for BoardingPolicy {
    fn default() -> Self {
        Self {
            initial_window_minutes: default_initial_window_minutes(),
            delay_extension_minutes: default_delay_extension_minutes(),
        }
    }
}

const fn default_initial_window_minutes() -> u32 {
    60
}

const fn default_delay_extension_minutes() -> u32 {
    30
}

/// Internal instrumentation kept alongside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDiagnostics {
    /// Current boarding window in minutes, extended by delays.
    pub boarding_window_minutes: u32,
    /// Events whose effect was written.
    pub events_applied: u64,
    /// Known events refused by their guard.
    pub guard_rejections: u64,
    /// Events with names outside the vocabulary.
    pub unrecognized_events: u64,
    /// Name of the most recently submitted event.
    pub last_event: Option<String>,
    /// When the most recent event was submitted.
    pub last_event_at: Option<DateTime<Utc>>,
}

impl EngineDiagnostics {
    const fn new(boarding: BoardingPolicy) -> Self {
        Self {
            boarding_window_minutes: boarding.initial_window_minutes,
            events_applied: 0,
            guard_rejections: 0,
            unrecognized_events: 0,
            last_event: None,
            last_event_at: None,
        }
    }

    /// Total events submitted, whatever their outcome.
    pub const fn events_seen(&self) -> u64 {
        self.events_applied
            .saturating_add(self.guard_rejections)
            .saturating_add(self.unrecognized_events)
    }
}

/// The post-event snapshot and what the event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Full document after the event.
    pub snapshot: JourneyState,
    /// Whether the event changed the document.
    pub outcome: Outcome,
}

/// Owner of the single journey document.
#[derive(Debug, Clone)]
pub struct JourneyEngine {
    state: JourneyState,
    risk: RiskPolicy,
    boarding: BoardingPolicy,
    diagnostics: EngineDiagnostics,
}

impl JourneyEngine {
    /// Create an engine at the initial document for `itinerary`.
    pub fn new(itinerary: Vec<String>, risk: RiskPolicy, boarding: BoardingPolicy) -> Self {
        Self {
            state: JourneyState::initial(itinerary),
            risk,
            boarding,
            diagnostics: EngineDiagnostics::new(boarding),
        }
    }

    /// The current document.
    pub const fn snapshot(&self) -> &JourneyState {
        &self.state
    }

    /// The current diagnostics.
    pub const fn diagnostics(&self) -> &EngineDiagnostics {
        &self.diagnostics
    }

    /// Reconcile one event against the document.
    ///
    /// Always succeeds and always returns the full resulting snapshot, even
    /// when the event changed nothing.
    pub fn apply(&mut self, event: &JourneyEvent) -> Applied {
        let transition = reconcile(&self.state, event, self.risk);
        self.state = transition.state;
        self.record(event, transition.outcome);

        match transition.outcome {
            Outcome::Applied => info!(
                event = %event,
                location = ?self.state.current_location,
                overall = ?self.state.overall_state,
                risk = self.state.connection_risk_score,
                "Event applied"
            ),
            Outcome::GuardRejected => debug!(event = %event, "Event guard not met, no change"),
            Outcome::Unrecognized => debug!(event = %event, "Unrecognized event ignored"),
        }

        Applied {
            snapshot: self.state.clone(),
            outcome: transition.outcome,
        }
    }

    fn record(&mut self, event: &JourneyEvent, outcome: Outcome) {
        let diag = &mut self.diagnostics;
        diag.last_event = Some(event.name().to_owned());
        diag.last_event_at = Some(Utc::now());

        match outcome {
            Outcome::Applied => diag.events_applied = diag.events_applied.saturating_add(1),
            Outcome::GuardRejected => {
                diag.guard_rejections = diag.guard_rejections.saturating_add(1);
            }
            Outcome::Unrecognized => {
                diag.unrecognized_events = diag.unrecognized_events.saturating_add(1);
            }
        }

        if outcome != Outcome::Applied {
            return;
        }
        match event {
            JourneyEvent::Reset => {
                diag.boarding_window_minutes = self.boarding.initial_window_minutes;
            }
            JourneyEvent::FlightDelayed => {
                diag.boarding_window_minutes = diag
                    .boarding_window_minutes
                    .saturating_add(self.boarding.delay_extension_minutes);
                debug!(
                    boarding_window_minutes = diag.boarding_window_minutes,
                    "Boarding window extended"
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_types::{Location, LoungeState};

    fn engine() -> JourneyEngine {
        JourneyEngine::new(
            vec!["HYD".to_owned(), "DEL".to_owned(), "LHR".to_owned()],
            RiskPolicy::default(),
            BoardingPolicy::default(),
        )
    }

    #[test]
    fn apply_returns_post_event_snapshot() {
        let mut engine = engine();
        let applied = engine.apply(&JourneyEvent::VipEnteredTerminal);
        assert_eq!(applied.outcome, Outcome::Applied);
        assert_eq!(applied.snapshot.lounge_state, LoungeState::Reserved);
        assert_eq!(&applied.snapshot, engine.snapshot());
    }

    #[test]
    fn rejected_event_still_returns_snapshot() {
        let mut engine = engine();
        let before = engine.snapshot().clone();
        let applied = engine.apply(&JourneyEvent::FaceVerified);
        assert_eq!(applied.outcome, Outcome::GuardRejected);
        assert_eq!(applied.snapshot, before);
        assert_eq!(applied.snapshot.current_location, Location::Outside);
    }

    #[test]
    fn delays_extend_boarding_window_and_reset_restores_it() {
        let mut engine = engine();
        assert_eq!(engine.diagnostics().boarding_window_minutes, 60);

        engine.apply(&JourneyEvent::FlightDelayed);
        engine.apply(&JourneyEvent::FlightDelayed);
        assert_eq!(engine.diagnostics().boarding_window_minutes, 120);

        engine.apply(&JourneyEvent::Reset);
        assert_eq!(engine.diagnostics().boarding_window_minutes, 60);
    }

    #[test]
    fn diagnostics_count_every_outcome() {
        let mut engine = engine();
        engine.apply(&JourneyEvent::VipEnteredTerminal);
        engine.apply(&JourneyEvent::VipExitedTerminal);
        engine.apply(&JourneyEvent::parse("WARP_DRIVE"));

        let diag = engine.diagnostics();
        assert_eq!(diag.events_applied, 1);
        assert_eq!(diag.guard_rejections, 1);
        assert_eq!(diag.unrecognized_events, 1);
        assert_eq!(diag.events_seen(), 3);
        assert_eq!(diag.last_event.as_deref(), Some("WARP_DRIVE"));
        assert!(diag.last_event_at.is_some());
    }

    #[test]
    fn boarding_window_is_not_in_the_snapshot() {
        let mut engine = engine();
        let applied = engine.apply(&JourneyEvent::FlightDelayed);
        let value = serde_json::to_value(&applied.snapshot).unwrap_or_default();
        assert!(value.get("boarding_window_minutes").is_none());
    }
}
