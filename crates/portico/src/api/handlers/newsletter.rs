use axum::{extract::State, http::HeaderMap};
use bytes::Bytes;
use serde_json::Value;

use super::json_body;
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply};

pub async fn subscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let payload = json_body(&body)?;
    let has_email = payload
        .get("email")
        .and_then(Value::as_str)
        .is_some_and(|email| !email.trim().is_empty());
    if !has_email {
        return Err(ProxyError::validation("Email is required"));
    }

    let call = ProxyCall::post("/newsletter/subscribe")
        .json(payload)
        .forward_headers(&headers)
        .wrapped("Subscribed successfully")
        .created()
        .default_error("Failed to subscribe");
    state.upstream.send(call).await
}
