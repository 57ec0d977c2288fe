//! Event vocabulary and the submission boundary's request/response bodies.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::state::JourneyState;

/// A named event that drives the journey document.
///
/// Parsing never fails: names are matched case-sensitively and anything
/// outside the vocabulary becomes [`JourneyEvent::Unrecognized`], which the
/// engine treats as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JourneyEvent {
    /// Restore the document to its initial defaults.
    Reset,
    /// Traveler entered the departure terminal.
    VipEnteredTerminal,
    /// Biometric check matched the traveler.
    FaceVerified,
    /// Flight delay announced.
    FlightDelayed,
    /// Flight cancelled.
    FlightCancelled,
    /// Boarding call issued.
    BoardingStarted,
    /// Traveler reached the boarding gate.
    VipArrivedAtGate,
    /// Flight landed at the next airport of the itinerary.
    FlightLanded,
    /// Traveler too late for the lounge.
    VipLateToLounge,
    /// Baggage moved to the connecting flight.
    BaggageTransferred,
    /// Baggage picked up at the destination.
    BaggageClaimed,
    /// Traveler left the arrival terminal.
    VipExitedTerminal,
    /// Traveler did not show up.
    VipNoShow,
    /// A name outside the vocabulary, kept verbatim for logging.
    Unrecognized(String),
}

impl JourneyEvent {
    /// Every recognized event, in vocabulary order.
    pub const KNOWN: [Self; 13] = [
        Self::Reset,
        Self::VipEnteredTerminal,
        Self::FaceVerified,
        Self::FlightDelayed,
        Self::FlightCancelled,
        Self::BoardingStarted,
        Self::VipArrivedAtGate,
        Self::FlightLanded,
        Self::VipLateToLounge,
        Self::BaggageTransferred,
        Self::BaggageClaimed,
        Self::VipExitedTerminal,
        Self::VipNoShow,
    ];

    /// Match a wire name against the vocabulary.
    pub fn parse(name: &str) -> Self {
        match name {
            "RESET" => Self::Reset,
            "VIP_ENTERED_TERMINAL" => Self::VipEnteredTerminal,
            "FACE_VERIFIED" => Self::FaceVerified,
            "FLIGHT_DELAYED" => Self::FlightDelayed,
            "FLIGHT_CANCELLED" => Self::FlightCancelled,
            "BOARDING_STARTED" => Self::BoardingStarted,
            "VIP_ARRIVED_AT_GATE" => Self::VipArrivedAtGate,
            "FLIGHT_LANDED" => Self::FlightLanded,
            "VIP_LATE_TO_LOUNGE" => Self::VipLateToLounge,
            "BAGGAGE_TRANSFERRED" => Self::BaggageTransferred,
            "BAGGAGE_CLAIMED" => Self::BaggageClaimed,
            "VIP_EXITED_TERMINAL" => Self::VipExitedTerminal,
            "VIP_NO_SHOW" => Self::VipNoShow,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// The wire name of this event.
    pub fn name(&self) -> &str {
        match self {
            Self::Reset => "RESET",
            Self::VipEnteredTerminal => "VIP_ENTERED_TERMINAL",
            Self::FaceVerified => "FACE_VERIFIED",
            Self::FlightDelayed => "FLIGHT_DELAYED",
            Self::FlightCancelled => "FLIGHT_CANCELLED",
            Self::BoardingStarted => "BOARDING_STARTED",
            Self::VipArrivedAtGate => "VIP_ARRIVED_AT_GATE",
            Self::FlightLanded => "FLIGHT_LANDED",
            Self::VipLateToLounge => "VIP_LATE_TO_LOUNGE",
            Self::BaggageTransferred => "BAGGAGE_TRANSFERRED",
            Self::BaggageClaimed => "BAGGAGE_CLAIMED",
            Self::VipExitedTerminal => "VIP_EXITED_TERMINAL",
            Self::VipNoShow => "VIP_NO_SHOW",
            Self::Unrecognized(name) => name,
        }
    }

    /// Whether the name was outside the vocabulary.
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for JourneyEvent {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl core::fmt::Display for JourneyEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Request body for `POST /event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventRequest {
    /// Event name from the vocabulary. Unknown names are accepted.
    pub event: String,
}

/// Response body for `POST /event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventResponse {
    /// Acknowledgement, always `"ok"` for an accepted submission.
    pub status: String,
    /// The full document after the event was reconciled.
    pub context: JourneyState,
}

impl EventResponse {
    /// Acknowledge an accepted submission with the resulting snapshot.
    pub fn ok(context: JourneyState) -> Self {
        Self {
            status: "ok".to_owned(),
            context,
        }
    }
}
