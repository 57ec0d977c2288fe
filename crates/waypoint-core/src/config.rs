//! Configuration loading and typed config structures for Waypoint.
//!
//! The configuration lives in `waypoint-config.yaml`. Every field has a
//! default, so an empty file (or no file at all) yields a working setup for
//! the canonical three-leg itinerary.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::broadcast::DEFAULT_SUBSCRIBER_BUFFER;
use crate::engine::{BoardingPolicy, JourneyEngine};
use crate::reconcile::RiskPolicy;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WaypointConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Itinerary and transition tuning.
    #[serde(default)]
    pub journey: JourneySection,

    /// Subscriber fan-out settings.
    #[serde(default)]
    pub broadcast: BroadcastSection,
}

impl WaypointConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override the listener address:
    /// - `WAYPOINT_HOST` overrides `server.host`
    /// - `WAYPOINT_PORT` overrides `server.port`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        warn!(path = %path.display(), "Config file not found, using defaults");
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("WAYPOINT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WAYPOINT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("WAYPOINT_PORT={port}: {e}")))?;
        }
        Ok(())
    }

    /// Reject values the engine or broadcaster cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.journey.itinerary.is_empty() {
            return Err(ConfigError::Invalid(
                "journey.itinerary must list at least one airport".to_owned(),
            ));
        }
        if self.journey.itinerary.iter().any(|code| code.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "journey.itinerary contains an empty airport code".to_owned(),
            ));
        }
        if self.journey.risk.max_score == 0 || self.journey.risk.max_score > 100 {
            return Err(ConfigError::Invalid(
                "journey.risk.max_score must be between 1 and 100".to_owned(),
            ));
        }
        if self.broadcast.subscriber_buffer == 0 {
            return Err(ConfigError::Invalid(
                "broadcast.subscriber_buffer must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Itinerary and transition tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JourneySection {
    /// Airport codes, one per leg.
    #[serde(default = "default_itinerary")]
    pub itinerary: Vec<String>,

    /// Risk accumulation on delays.
    #[serde(default)]
    pub risk: RiskPolicy,

    /// Boarding window bookkeeping.
    #[serde(default)]
    pub boarding: BoardingPolicy,
}

impl Default for JourneySection {
    fn default() -> Self {
        Self {
            itinerary: default_itinerary(),
            risk: RiskPolicy::default(),
            boarding: BoardingPolicy::default(),
        }
    }
}

impl JourneySection {
    /// Build an engine at the initial document described by this section.
    pub fn build_engine(&self) -> JourneyEngine {
        JourneyEngine::new(self.itinerary.clone(), self.risk, self.boarding)
    }
}

/// Subscriber fan-out configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BroadcastSection {
    /// Snapshots buffered per subscriber before it is considered too slow.
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
}

impl Default for BroadcastSection {
    fn default() -> Self {
        Self {
            subscriber_buffer: default_subscriber_buffer(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8000
}

fn default_itinerary() -> Vec<String> {
    vec![
        String::from("HYD"),
        String::from("DEL"),
        String::from("LHR"),
    ]
}

const fn default_subscriber_buffer() -> usize {
    DEFAULT_SUBSCRIBER_BUFFER
}
