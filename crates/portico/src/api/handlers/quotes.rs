//! Admin quote requests.

use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
};
use bytes::Bytes;

use super::json_body;
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply};

pub async fn list_quotes(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::get("/admin/quotes")
        .query(query)
        .forward_headers(&headers)
        .default_error("Failed to fetch quotes");
    state.upstream.send(call).await
}

pub async fn update_quote_status(
    State(state): State<AppState>,
    Path(quote_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::patch(format!("/admin/quotes/{quote_id}/status"))
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .wrapped("Quote status updated successfully")
        .default_error("Failed to update quote status");
    state.upstream.send(call).await
}

pub async fn delete_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<String>,
    headers: HeaderMap,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::delete(format!("/admin/quotes/{quote_id}"))
        .forward_headers(&headers)
        .wrapped("Quote deleted successfully")
        .default_error("Failed to delete quote");
    state.upstream.send(call).await
}

pub async fn reply_to_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::post(format!("/admin/quotes/{quote_id}/reply"))
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .wrapped("Reply sent successfully")
        .default_error("Failed to send reply");
    state.upstream.send(call).await
}
