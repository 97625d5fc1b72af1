use axum::{
    extract::{Multipart, RawQuery, State, multipart::MultipartRejection},
    http::HeaderMap,
};

use super::form_body;
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply};

pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::get("/events")
        .query(query)
        .forward_headers(&headers)
        .default_error("Failed to fetch events");
    state.upstream.send(call).await
}

/// Create an event from a multipart form (fields plus `images[...]` files).
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let fields = form_body(multipart).await?;
    let call = ProxyCall::post("/events")
        .form(fields)
        .forward_headers(&headers)
        .wrapped("Event created successfully")
        .created()
        .default_error("Failed to create event");
    state.upstream.send(call).await
}
