//! Scripted journey producer.
//!
//! Replays the canonical VIP journey against a running server, one event
//! every `SIM_DELAY_MS` milliseconds. An optional first argument overrides
//! the delay in seconds (fractions allowed). Exits non-zero if any step
//! fails.

use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use waypoint_driver::{CANONICAL_JOURNEY, DriverConfig, JourneyClient, run_script};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut config = DriverConfig::from_env()?;
    if let Some(arg) = std::env::args().nth(1) {
        match parse_delay(&arg) {
            Some(delay) => config.step_delay = delay,
            None => warn!(
                arg = %arg,
                default_ms = config.step_delay.as_millis(),
                "Invalid delay argument, keeping configured delay"
            ),
        }
    }

    let client = JourneyClient::new(&config.api_url, config.request_timeout)?;
    info!(
        url = client.event_url(),
        steps = CANONICAL_JOURNEY.len(),
        delay_ms = config.step_delay.as_millis(),
        "Starting journey simulation"
    );

    match run_script(&client, &CANONICAL_JOURNEY, config.step_delay).await {
        Ok(report) => {
            info!(steps = report.steps_completed, "Simulation complete");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Simulation aborted");
            Err(e.into())
        }
    }
}

/// Parse a non-negative delay in seconds.
fn parse_delay(raw: &str) -> Option<Duration> {
    let secs: f64 = raw.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
