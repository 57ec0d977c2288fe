//! Error types for the event producers.

/// Errors that can occur while submitting events.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The server could not be reached or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnosis.
        body: String,
    },

    /// A scripted step failed and the rest of the script was abandoned.
    #[error("step {step} ({event}) failed: {source}")]
    StepFailed {
        /// One-based position of the failing step.
        step: usize,
        /// Event name of the failing step.
        event: String,
        /// Why the submission failed.
        source: Box<DriverError>,
    },

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
