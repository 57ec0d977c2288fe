//! The journey transition function.
//!
//! [`reconcile`] maps the current document and one event to the next
//! document. It is pure: no I/O, no clock, no shared state. Every event in
//! the vocabulary has exactly one guarded effect; an unmet guard and an
//! unrecognized name both leave the document untouched and are reported
//! through [`Outcome`] rather than as errors.
//!
//! | Event | Guard | Effect |
//! |-------|-------|--------|
//! | `RESET` | -- | initial defaults |
//! | `VIP_ENTERED_TERMINAL` | -- | `CHECKIN`, transport `COMPLETED`, lounge `RESERVED` |
//! | `FACE_VERIFIED` | lounge `RESERVED` | `LOUNGE`, lounge `ACTIVE` |
//! | `FLIGHT_DELAYED` | -- | risk += increment (clamped); escalate above threshold |
//! | `FLIGHT_CANCELLED` | location `LOUNGE` | `REBOOKING_PENDING`, transport `HOLD` |
//! | `BOARDING_STARTED` | -- | lounge `COMPLETED`, `MOVING_TO_GATE`, gate `BOARDING`, overall `ACTIVE` |
//! | `VIP_ARRIVED_AT_GATE` | -- | `GATE`, gate `WAITING_TO_BOARD` |
//! | `FLIGHT_LANDED` | not on final leg | next leg; `TRANSIT` or `ARRIVAL` |
//! | `VIP_LATE_TO_LOUNGE` | -- | lounge `DENIED_TIME_PRIORITY`, `DIRECT_TO_GATE` |
//! | `BAGGAGE_TRANSFERRED` | -- | baggage `TRANSFERRED_TO_NEXT_LEG` |
//! | `BAGGAGE_CLAIMED` | -- | baggage `CLAIMED` |
//! | `VIP_EXITED_TERMINAL` | `ARRIVAL` and baggage `CLAIMED` | transport `DRIVER_ASSIGNED` |
//! | `VIP_NO_SHOW` | -- | transport `CANCELLED`, overall `ESCALATED` |

use serde::{Deserialize, Serialize};
use waypoint_types::{
    BaggageState, GateState, JourneyEvent, JourneyState, JourneyType, Location, LoungeState,
    MAX_RISK_SCORE, OverallState, TransportState,
};

/// How `FLIGHT_DELAYED` accumulates connection risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Points added to the risk score per delay.
    #[serde(default = "default_delay_increment")]
    pub delay_increment: u8,

    /// Scores strictly above this escalate the journey to critical.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: u8,

    /// Ceiling of the risk score. Never above [`MAX_RISK_SCORE`].
    #[serde(default = "default_max_score")]
    pub max_score: u8,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            delay_increment: default_delay_increment(),
            critical_threshold: default_critical_threshold(),
            max_score: default_max_score(),
        }
    }
}

impl RiskPolicy {
    /// Raise `score` by one delay, clamped to the ceiling.
    pub fn raise(self, score: u8) -> u8 {
        score
            .saturating_add(self.delay_increment)
            .min(self.max_score.min(MAX_RISK_SCORE))
    }

    /// Whether `score` requires critical escalation.
    pub const fn is_critical(self, score: u8) -> bool {
        score > self.critical_threshold
    }
}

const fn default_delay_increment() -> u8 {
    35
}

const fn default_critical_threshold() -> u8 {
    70
}

const fn default_max_score() -> u8 {
    MAX_RISK_SCORE
}

/// What happened when an event was reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The event's effect was written to the document.
    Applied,
    /// The event is known but its guard did not hold; nothing changed.
    GuardRejected,
    /// The event name is outside the vocabulary; nothing changed.
    Unrecognized,
}

/// Result of one reconciliation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The document after the event.
    pub state: JourneyState,
    /// Whether the event changed anything.
    pub outcome: Outcome,
}

impl Transition {
    const fn new(state: JourneyState, outcome: Outcome) -> Self {
        Self { state, outcome }
    }
}

/// Apply `event` to `current` and return the next document.
///
/// Never fails. Guard failures and unknown names return an unchanged copy
/// with [`Outcome::GuardRejected`] or [`Outcome::Unrecognized`].
pub fn reconcile(current: &JourneyState, event: &JourneyEvent, risk: RiskPolicy) -> Transition {
    let mut next = current.clone();

    match event {
        JourneyEvent::Reset => {
            next = JourneyState::initial(current.itinerary.clone());
        }

        JourneyEvent::VipEnteredTerminal => {
            next.current_location = Location::Checkin;
            next.transport_state = TransportState::Completed;
            next.lounge_state = LoungeState::Reserved;
        }

        JourneyEvent::FaceVerified => {
            if current.lounge_state != LoungeState::Reserved {
                return Transition::new(next, Outcome::GuardRejected);
            }
            next.current_location = Location::Lounge;
            next.lounge_state = LoungeState::Active;
        }

        JourneyEvent::FlightDelayed => {
            next.connection_risk_score = risk.raise(current.connection_risk_score);
            if risk.is_critical(next.connection_risk_score) {
                next.overall_state = OverallState::CriticalRisk;
                next.transport_state = TransportState::EscortBuggyRequired;
            }
        }

        JourneyEvent::FlightCancelled => {
            if current.current_location != Location::Lounge {
                return Transition::new(next, Outcome::GuardRejected);
            }
            // Lounge access stays as it is while rebooking.
            next.overall_state = OverallState::RebookingPending;
            next.transport_state = TransportState::Hold;
        }

        JourneyEvent::BoardingStarted => {
            next.lounge_state = LoungeState::Completed;
            next.current_location = Location::MovingToGate;
            next.gate_state = GateState::Boarding;
            next.overall_state = OverallState::Active;
        }

        JourneyEvent::VipArrivedAtGate => {
            next.current_location = Location::Gate;
            next.gate_state = GateState::WaitingToBoard;
        }

        JourneyEvent::FlightLanded => {
            if current.on_final_leg() {
                return Transition::new(next, Outcome::GuardRejected);
            }
            next.current_leg_index = current.current_leg_index.saturating_add(1);
            // Position decides the phase: only the last airport is ARRIVAL, so a
            // two-leg itinerary arrives at index 1 rather than transiting there.
            if next.on_final_leg() {
                next.journey_type = JourneyType::Arrival;
                next.current_location = Location::BaggageClaim;
            } else {
                next.journey_type = JourneyType::Transit;
                next.current_location = Location::TransitArea;
            }
        }

        JourneyEvent::VipLateToLounge => {
            next.lounge_state = LoungeState::DeniedTimePriority;
            next.current_location = Location::DirectToGate;
        }

        JourneyEvent::BaggageTransferred => {
            next.baggage_state = BaggageState::TransferredToNextLeg;
        }

        JourneyEvent::BaggageClaimed => {
            next.baggage_state = BaggageState::Claimed;
        }

        JourneyEvent::VipExitedTerminal => {
            if current.journey_type != JourneyType::Arrival
                || current.baggage_state != BaggageState::Claimed
            {
                return Transition::new(next, Outcome::GuardRejected);
            }
            next.transport_state = TransportState::DriverAssigned;
        }

        JourneyEvent::VipNoShow => {
            next.transport_state = TransportState::Cancelled;
            next.overall_state = OverallState::Escalated;
        }

        JourneyEvent::Unrecognized(_) => {
            return Transition::new(next, Outcome::Unrecognized);
        }
    }

    Transition::new(next, Outcome::Applied)
}
