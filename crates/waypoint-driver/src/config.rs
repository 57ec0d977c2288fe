//! Configuration for the event producers.
//!
//! All configuration comes from environment variables, read through an
//! injectable lookup so tests never touch the process environment.

use std::time::Duration;

use crate::error::DriverError;

/// Default server base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Producer configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Base URL of the Waypoint server (without `/event`).
    pub api_url: String,
    /// Pause between scripted events.
    pub step_delay: Duration,
    /// Minimum gap between two detection-triggered submissions.
    pub face_cooldown: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            step_delay: Duration::from_secs(4),
            face_cooldown: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl DriverConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `WAYPOINT_API_URL` -- server base URL (default `http://127.0.0.1:8000`)
    /// - `SIM_DELAY_MS` -- pause between scripted events (default 4000)
    /// - `FACE_COOLDOWN_SECS` -- trigger cooldown window (default 10)
    /// - `REQUEST_TIMEOUT_MS` -- per-request timeout (default 5000)
    pub fn from_env() -> Result<Self, DriverError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DriverError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("WAYPOINT_API_URL")
            .map_or(defaults.api_url, |url| url.trim_end_matches('/').to_owned());

        let step_delay = parse_u64(&lookup, "SIM_DELAY_MS")?
            .map_or(defaults.step_delay, Duration::from_millis);
        let face_cooldown = parse_u64(&lookup, "FACE_COOLDOWN_SECS")?
            .map_or(defaults.face_cooldown, Duration::from_secs);
        let request_timeout = parse_u64(&lookup, "REQUEST_TIMEOUT_MS")?
            .map_or(defaults.request_timeout, Duration::from_millis);

        Ok(Self {
            api_url,
            step_delay,
            face_cooldown,
            request_timeout,
        })
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>, DriverError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| DriverError::Config(format!("invalid {key}: {e}")))
        })
        .transpose()
}
