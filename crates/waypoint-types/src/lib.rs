//! Shared type definitions for the Waypoint concierge service.
//!
//! This crate holds the journey document, its enumerations, and the event
//! vocabulary. Types flow downstream to `TypeScript` via `ts-rs` for the
//! live dashboard.
//!
//! # Modules
//!
//! - [`enums`] -- Closed enumerations for every state field
//! - [`state`] -- The [`JourneyState`] snapshot document
//! - [`events`] -- The [`JourneyEvent`] vocabulary and submission bodies

pub mod enums;
pub mod events;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BaggageState, FlightState, GateState, JourneyType, Location, LoungeState, OverallState,
    TransportState,
};
pub use events::{EventRequest, EventResponse, JourneyEvent};
pub use state::{JourneyState, MAX_RISK_SCORE};
