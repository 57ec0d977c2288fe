//! Scripted journey playback.
//!
//! [`CANONICAL_JOURNEY`] walks a departing VIP through check-in, the
//! lounge, two delays, boarding, a transit stop, and arrival. The script
//! only produces events; all state changes happen on the server.

use std::time::Duration;

use tracing::info;
use waypoint_types::JourneyState;

use crate::client::JourneyClient;
use crate::error::DriverError;

/// One scripted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    /// Event name to submit.
    pub event: &'static str,
    /// What the step represents, for logs.
    pub description: &'static str,
}

impl ScriptStep {
    const fn new(event: &'static str, description: &'static str) -> Self {
        Self { event, description }
    }
}

/// The full demo journey for the default `HYD -> DEL -> LHR` itinerary.
pub const CANONICAL_JOURNEY: [ScriptStep; 12] = [
    ScriptStep::new("RESET", "Reset to the initial journey"),
    ScriptStep::new("VIP_ENTERED_TERMINAL", "VIP arrives at the terminal"),
    ScriptStep::new("FACE_VERIFIED", "Biometric verification complete"),
    ScriptStep::new("FLIGHT_DELAYED", "Flight delay announced"),
    ScriptStep::new("FLIGHT_DELAYED", "Second delay, risk escalating"),
    ScriptStep::new("BOARDING_STARTED", "Boarding call, VIP moving to gate"),
    ScriptStep::new("VIP_ARRIVED_AT_GATE", "VIP reaches the boarding gate"),
    ScriptStep::new("FLIGHT_LANDED", "Landed at the transit hub"),
    ScriptStep::new("BAGGAGE_TRANSFERRED", "Baggage transferred to the next leg"),
    ScriptStep::new("FLIGHT_LANDED", "Final destination reached"),
    ScriptStep::new("BAGGAGE_CLAIMED", "Baggage collected"),
    ScriptStep::new("VIP_EXITED_TERMINAL", "VIP exits, driver dispatched"),
];

/// Outcome of a completed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    /// Number of steps acknowledged by the server.
    pub steps_completed: usize,
    /// Document returned for the last step, if any step ran.
    pub final_state: Option<JourneyState>,
}

/// Submit `steps` in order, pausing `delay` between consecutive steps.
///
/// # Errors
///
/// Stops at the first failed submission and returns
/// [`DriverError::StepFailed`] carrying the one-based step number.
pub async fn run_script(
    client: &JourneyClient,
    steps: &[ScriptStep],
    delay: Duration,
) -> Result<ScriptReport, DriverError> {
    let total = steps.len();
    let mut report = ScriptReport {
        steps_completed: 0,
        final_state: None,
    };

    for (index, step) in steps.iter().enumerate() {
        let position = index.saturating_add(1);
        info!(
            step = position,
            total,
            event = step.event,
            "{}",
            step.description
        );

        let ack = client
            .submit(step.event)
            .await
            .map_err(|source| DriverError::StepFailed {
                step: position,
                event: step.event.to_owned(),
                source: Box::new(source),
            })?;

        info!(
            overall = ?ack.context.overall_state,
            risk = ack.context.connection_risk_score,
            "Journey updated"
        );

        report.steps_completed = position;
        report.final_state = Some(ack.context);

        if position < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(report)
}
