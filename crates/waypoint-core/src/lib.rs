//! Journey reconciliation and live snapshot fan-out for Waypoint.
//!
//! This crate owns the one piece of real logic in the service: turning a
//! stream of named events into successive journey documents, and handing
//! each document to every connected observer.
//!
//! # Modules
//!
//! - [`reconcile`] -- The pure transition function and [`RiskPolicy`].
//! - [`engine`] -- [`JourneyEngine`], owner of the authoritative document
//!   and its internal diagnostics.
//! - [`broadcast`] -- [`Broadcaster`], the drop-and-continue subscriber
//!   registry.
//! - [`config`] -- Configuration loading from `waypoint-config.yaml`.
//!
//! [`RiskPolicy`]: reconcile::RiskPolicy
//! [`JourneyEngine`]: engine::JourneyEngine
//! [`Broadcaster`]: broadcast::Broadcaster

pub mod broadcast;
pub mod config;
pub mod engine;
pub mod reconcile;

pub use broadcast::{Broadcaster, PublishReport, SubscriberId, Subscription};
pub use config::{ConfigError, WaypointConfig};
pub use engine::{Applied, BoardingPolicy, EngineDiagnostics, JourneyEngine};
pub use reconcile::{Outcome, RiskPolicy, Transition, reconcile};
