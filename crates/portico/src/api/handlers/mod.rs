//! API request handlers.
//!
//! Proxied resources live in one module each; every handler builds a
//! [`ProxyCall`](crate::proxy::ProxyCall) and hands it to the upstream client.

pub mod announcements;
pub mod auth;
pub mod consultations;
pub mod contacts;
pub mod events;
pub mod health;
pub mod hr_consultations;
pub mod language;
pub mod newsletter;
pub mod quotes;
pub mod testimonials;
pub mod uploads;

use axum::Json;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartRejection;
use axum::http::{StatusCode, Uri};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::proxy::{Envelope, FormField, ProxyError, read_multipart};

/// Parse a JSON request body. An empty body is an empty object.
pub(crate) fn json_body(body: &Bytes) -> Result<Value, ProxyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ProxyError::validation(format!("Invalid JSON body: {e}")))
}

/// Buffer a multipart request body.
pub(crate) async fn form_body(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<FormField>, ProxyError> {
    let multipart = multipart
        .map_err(|e| ProxyError::validation(format!("Expected multipart form data: {e}")))?;
    read_multipart(multipart).await
}

/// Fallback for unknown `/api` paths.
pub async fn api_not_found(uri: Uri) -> (StatusCode, Json<Envelope>) {
    tracing::debug!(path = %uri.path(), "No API route matched");
    (StatusCode::NOT_FOUND, Json(Envelope::message("Not found")))
}

/// `?date=` parameter of the time-slot endpoints.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// The trimmed date, or a 400 when missing or blank.
    pub fn required(self) -> Result<String, ProxyError> {
        self.date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| ProxyError::validation("Date parameter is required"))
    }
}

/// Time-slot tally for one date.
#[derive(Debug, Serialize)]
pub struct TimeSlots {
    pub date: String,
    pub slots: BTreeMap<String, u64>,
}
