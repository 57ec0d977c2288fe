//! Detection-triggered `FACE_VERIFIED` producer.
//!
//! Reads detection signals from stdin, one per line. Any non-empty line is
//! a match and submits `FACE_VERIFIED`, at most once per
//! `FACE_COOLDOWN_SECS`. Pipe a recognizer's output into this process, or
//! press Enter to simulate a match.

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use waypoint_driver::{CooldownGate, DriverConfig, JourneyClient};

const EVENT: &str = "FACE_VERIFIED";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = DriverConfig::from_env()?;
    let client = JourneyClient::new(&config.api_url, config.request_timeout)?;
    let mut gate = CooldownGate::new(config.face_cooldown);

    info!(
        url = client.event_url(),
        cooldown_secs = config.face_cooldown.as_secs(),
        "Waiting for detections on stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let signal = line.trim();
        if signal.is_empty() {
            continue;
        }

        let now = Instant::now();
        if !gate.is_ready(now) {
            debug!(
                remaining_ms = gate.remaining(now).as_millis(),
                "Detection ignored during cooldown"
            );
            continue;
        }

        match client.submit(EVENT).await {
            Ok(ack) => {
                gate.mark(now);
                info!(
                    signal,
                    location = ?ack.context.current_location,
                    lounge = ?ack.context.lounge_state,
                    "Face verified"
                );
            }
            Err(e) => warn!(error = %e, "Failed to submit detection"),
        }
    }

    info!("Detection stream closed");
    Ok(())
}
