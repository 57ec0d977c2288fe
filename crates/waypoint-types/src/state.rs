//! The journey document.
//!
//! [`JourneyState`] is the single authoritative description of the
//! traveler's progress. The same value is returned from event submission
//! and pushed to every subscriber, always in full.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    BaggageState, FlightState, GateState, JourneyType, Location, LoungeState, OverallState,
    TransportState,
};

/// Upper bound of [`JourneyState::connection_risk_score`].
pub const MAX_RISK_SCORE: u8 = 100;

/// Full snapshot of a traveler's journey.
///
/// Every field always holds a value. Transitions overwrite fields and never
/// remove them, so the serialized shape is identical for every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct JourneyState {
    /// Ordered airport codes, one per leg. Fixed for the life of the process.
    pub itinerary: Vec<String>,
    /// Zero-based index into `itinerary`; never exceeds `itinerary.len() - 1`.
    #[ts(type = "number")]
    pub current_leg_index: usize,
    /// Phase of the journey.
    pub journey_type: JourneyType,
    /// Where the traveler is.
    pub current_location: Location,
    /// Status of the current flight.
    pub flight_state: FlightState,
    /// Status of checked baggage.
    pub baggage_state: BaggageState,
    /// Status of ground transport.
    pub transport_state: TransportState,
    /// Status of lounge access.
    pub lounge_state: LoungeState,
    /// Overall health of the journey.
    pub overall_state: OverallState,
    /// Status at the boarding gate.
    pub gate_state: GateState,
    /// Likelihood of missing the connection, clamped to `0..=100`.
    pub connection_risk_score: u8,
}

impl JourneyState {
    /// Build the initial document for an itinerary.
    ///
    /// This is also what a `RESET` event restores.
    pub const fn initial(itinerary: Vec<String>) -> Self {
        Self {
            itinerary,
            current_leg_index: 0,
            journey_type: JourneyType::Departure,
            current_location: Location::Outside,
            flight_state: FlightState::Scheduled,
            baggage_state: BaggageState::Checked,
            transport_state: TransportState::Pending,
            lounge_state: LoungeState::Pending,
            overall_state: OverallState::Active,
            gate_state: GateState::Waiting,
            connection_risk_score: 0,
        }
    }

    /// Index of the last leg, or `0` for an empty itinerary.
    pub fn final_leg_index(&self) -> usize {
        self.itinerary.len().saturating_sub(1)
    }

    /// Whether the traveler is already on the last leg.
    pub fn on_final_leg(&self) -> bool {
        self.current_leg_index >= self.final_leg_index()
    }

    /// Airport code of the current leg, if the itinerary is non-empty.
    pub fn current_airport(&self) -> Option<&str> {
        self.itinerary
            .get(self.current_leg_index)
            .map(String::as_str)
    }
}
