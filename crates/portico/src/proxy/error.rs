//! Proxy error taxonomy and its JSON envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::envelope::Envelope;

pub const NOT_CONFIGURED_MESSAGE: &str = "API URL is not configured";
pub const TRANSPORT_MESSAGE: &str = "Internal server error";
pub const NON_JSON_MESSAGE: &str = "Backend returned a non-JSON response";

/// Errors produced while forwarding a request to the backend.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The backend base URL is missing from configuration.
    #[error("API URL is not configured")]
    NotConfigured,

    /// A required request field or parameter is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The backend could not be reached or the exchange failed mid-flight.
    #[error("Internal server error")]
    Transport { url: String, detail: String },

    /// The backend answered non-2xx with a JSON body.
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        errors: Option<Value>,
        details: Option<Value>,
    },

    /// The backend answered with a body that is not JSON.
    #[error("Backend returned a non-JSON response")]
    NonJson {
        url: String,
        status: StatusCode,
        raw: String,
        include_details: bool,
    },
}

impl ProxyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Reshape a backend error body, preferring the backend's own message.
    pub fn upstream(
        status: StatusCode,
        body: Value,
        default_message: &str,
        include_details: bool,
    ) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(default_message)
            .to_string();
        let errors = body.get("errors").cloned().filter(|e| !e.is_null());

        Self::Upstream {
            status,
            message,
            errors,
            details: include_details.then_some(body),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::NotConfigured | Self::Transport { .. } | Self::NonJson { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn envelope(self) -> Envelope {
        match self {
            Self::NotConfigured => Envelope::message(NOT_CONFIGURED_MESSAGE)
                .with_error("Server configuration error"),
            Self::Validation(msg) => Envelope::message(msg),
            Self::Transport { detail, .. } => {
                Envelope::message(TRANSPORT_MESSAGE).with_error(detail)
            }
            Self::Upstream {
                message,
                errors,
                details,
                ..
            } => {
                let mut envelope = Envelope::message(message);
                envelope.errors = errors;
                envelope.details = details;
                envelope
            }
            Self::NonJson {
                raw,
                include_details,
                ..
            } => {
                let mut envelope = Envelope::message(NON_JSON_MESSAGE);
                if include_details {
                    envelope.details = Some(Value::String(raw));
                }
                envelope
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::NotConfigured => error!("Backend base URL is not configured"),
            Self::Transport { url, detail } => {
                error!(url = %url, error = %detail, "Backend request failed");
            }
            Self::NonJson { url, status, .. } => {
                warn!(url = %url, upstream_status = %status, "Replacing non-JSON backend response with 500");
            }
            Self::Upstream { status, message, .. } => {
                debug!(upstream_status = %status, message = %message, "Passing backend error through");
            }
            Self::Validation(msg) => debug!(message = %msg, "Rejected request"),
        }

        (status, Json(self.envelope())).into_response()
    }
}
