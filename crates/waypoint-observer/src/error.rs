//! Error types for the Observer API server.
//!
//! [`ObserverError`] unifies request-level failures into a single enum that
//! converts into a JSON HTTP response. Events that are unknown or whose
//! guard fails are not errors and never reach this type.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the Observer API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The request body was missing, not JSON, or lacked the `event` field.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] JsonRejection),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MalformedRequest(rejection) => (rejection.status(), rejection.body_text()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
