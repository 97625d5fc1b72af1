//! Chunked blog media upload.
//!
//! Three independent calls keyed by the upload id the backend issues on `init`:
//! `init`, then one `chunk` call per piece, then `complete`. No upload state is
//! kept here; an unknown id is the backend's error to report.

use axum::{
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    http::HeaderMap,
};
use bytes::Bytes;

use super::{form_body, json_body};
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply};

pub async fn init_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::post("/blogs/chunked-upload/init")
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .with_details()
        .default_error("Failed to initialize upload");
    state.upstream.send(call).await
}

pub async fn upload_chunk(
    State(state): State<AppState>,
    Path(upload_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let fields = form_body(multipart).await?;
    let call = ProxyCall::post(format!("/blogs/chunked-upload/{upload_id}/chunk"))
        .form(fields)
        .forward_headers(&headers)
        .with_details()
        .default_error("Failed to upload chunk");
    state.upstream.send(call).await
}

pub async fn complete_upload(
    State(state): State<AppState>,
    Path(upload_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::post(format!("/blogs/chunked-upload/{upload_id}/complete"))
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .with_details()
        .default_error("Failed to complete upload");
    state.upstream.send(call).await
}
