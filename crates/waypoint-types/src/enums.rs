//! Enumeration types for the journey document.
//!
//! Every field of [`JourneyState`](crate::JourneyState) other than the
//! itinerary, leg index, and risk score is one of these closed enums.
//! On the wire each variant is its `SCREAMING_SNAKE_CASE` name.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Journey phase
// ---------------------------------------------------------------------------

/// Which phase of the itinerary the traveler is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum JourneyType {
    /// Departing from the origin airport.
    Departure,
    /// Connecting through an intermediate airport.
    Transit,
    /// Arrived at the final destination.
    Arrival,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Where the traveler currently is inside (or outside) the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Location {
    /// Not yet inside the terminal.
    Outside,
    /// At the check-in counter.
    Checkin,
    /// Inside the reserved lounge.
    Lounge,
    /// Lounge access denied; heading straight to the gate.
    DirectToGate,
    /// Boarding has started and the traveler is on the way to the gate.
    MovingToGate,
    /// At the boarding gate.
    Gate,
    /// In the transit area of a connecting airport.
    TransitArea,
    /// At baggage claim of the final destination.
    BaggageClaim,
}

// ---------------------------------------------------------------------------
// Flight
// ---------------------------------------------------------------------------

/// Status of the current flight.
///
/// Carried in the document for consumers; no event currently changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum FlightState {
    /// Flight is on schedule.
    Scheduled,
    /// Flight departure is delayed.
    Delayed,
    /// Flight is cancelled.
    Cancelled,
    /// Flight has landed.
    Landed,
}

// ---------------------------------------------------------------------------
// Baggage
// ---------------------------------------------------------------------------

/// Status of the traveler's checked baggage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum BaggageState {
    /// Baggage checked in at origin.
    Checked,
    /// Baggage moved onto the next leg's flight.
    TransferredToNextLeg,
    /// Baggage collected by the traveler.
    Claimed,
}

// ---------------------------------------------------------------------------
// Ground transport
// ---------------------------------------------------------------------------

/// Status of ground transport arranged for the traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TransportState {
    /// No transport action taken yet.
    Pending,
    /// Drop-off at the terminal completed.
    Completed,
    /// Transport held pending rebooking.
    Hold,
    /// Transport cancelled.
    Cancelled,
    /// A driver has been dispatched for pickup.
    DriverAssigned,
    /// Connection at risk; an escort buggy is required.
    EscortBuggyRequired,
}

// ---------------------------------------------------------------------------
// Lounge
// ---------------------------------------------------------------------------

/// Status of the traveler's lounge access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum LoungeState {
    /// No reservation yet.
    Pending,
    /// A lounge seat is reserved.
    Reserved,
    /// Traveler is inside the lounge.
    Active,
    /// Lounge visit finished.
    Completed,
    /// Access denied because there is not enough time before boarding.
    DeniedTimePriority,
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Status at the boarding gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum GateState {
    /// Gate not yet open.
    Waiting,
    /// Boarding is in progress.
    Boarding,
    /// Traveler is at the gate waiting to board.
    WaitingToBoard,
}

// ---------------------------------------------------------------------------
// Overall
// ---------------------------------------------------------------------------

/// Overall health of the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum OverallState {
    /// Journey proceeding normally.
    Active,
    /// Flight cancelled while in the lounge; rebooking in progress.
    RebookingPending,
    /// Connection risk crossed the critical threshold.
    CriticalRisk,
    /// Traveler did not show up; escalated to staff.
    Escalated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_serialize_as_screaming_snake_case() {
        let json = serde_json::to_string(&Location::MovingToGate).unwrap_or_default();
        assert_eq!(json, "\"MOVING_TO_GATE\"");

        let json = serde_json::to_string(&LoungeState::DeniedTimePriority).unwrap_or_default();
        assert_eq!(json, "\"DENIED_TIME_PRIORITY\"");

        let json =
            serde_json::to_string(&TransportState::EscortBuggyRequired).unwrap_or_default();
        assert_eq!(json, "\"ESCORT_BUGGY_REQUIRED\"");
    }

    #[test]
    fn wire_names_deserialize() {
        let parsed: Result<BaggageState, _> = serde_json::from_str("\"TRANSFERRED_TO_NEXT_LEG\"");
        assert!(matches!(parsed, Ok(BaggageState::TransferredToNextLeg)));

        let parsed: Result<GateState, _> = serde_json::from_str("\"waiting\"");
        assert!(parsed.is_err());
    }
}
