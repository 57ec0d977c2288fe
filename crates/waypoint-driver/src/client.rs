//! HTTP client for `POST /event`.

use std::time::Duration;

use tracing::debug;
use waypoint_types::{EventRequest, EventResponse};

use crate::error::DriverError;

/// Submits journey events to a running Waypoint server.
#[derive(Debug, Clone)]
pub struct JourneyClient {
    client: reqwest::Client,
    event_url: String,
}

impl JourneyClient {
    /// Create a client for the server at `base_url` (e.g.
    /// `http://127.0.0.1:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DriverError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            event_url: format!("{}/event", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL events are posted to.
    pub fn event_url(&self) -> &str {
        &self.event_url
    }

    /// Submit one event and return the server's acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Http`] if the server cannot be reached or the
    /// body is not an [`EventResponse`], and [`DriverError::Status`] for any
    /// non-success status.
    pub async fn submit(&self, event: &str) -> Result<EventResponse, DriverError> {
        let body = EventRequest {
            event: event.to_owned(),
        };

        let response = self.client.post(&self.event_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(DriverError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ack: EventResponse = response.json().await?;
        debug!(event, status = %ack.status, "Event acknowledged");
        Ok(ack)
    }
}
