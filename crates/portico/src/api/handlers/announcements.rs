use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
};
use bytes::Bytes;

use super::json_body;
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply};

pub async fn list_announcements(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::get("/announcements")
        .query(query)
        .forward_headers(&headers)
        .default_error("Failed to fetch announcements");
    state.upstream.send(call).await
}

pub async fn create_announcement(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::post("/announcements")
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .wrapped("Announcement created successfully")
        .created()
        .default_error("Failed to create announcement");
    state.upstream.send(call).await
}
