//! External event producers for Waypoint.
//!
//! Neither producer touches journey state directly; both go through
//! `POST /event` like any other client.
//!
//! - [`script`] replays a fixed journey with a pause between steps.
//! - [`cooldown`] gates detection-triggered `FACE_VERIFIED` submissions.

pub mod client;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod script;

pub use client::JourneyClient;
pub use config::DriverConfig;
pub use cooldown::CooldownGate;
pub use error::DriverError;
pub use script::{CANONICAL_JOURNEY, ScriptReport, ScriptStep, run_script};
