//! Contact form: public submission and admin inbox.

use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
};
use bytes::Bytes;

use super::json_body;
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply};

pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::post("/contacts")
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .wrapped("Message sent successfully")
        .created()
        .default_error("Failed to send message");
    state.upstream.send(call).await
}

pub async fn list_submissions(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::get("/contact-form-submissions")
        .query(query)
        .forward_headers(&headers)
        .default_error("Failed to fetch contact form submissions");
    state.upstream.send(call).await
}

pub async fn delete_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    headers: HeaderMap,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::delete(format!("/contact-form-submissions/{submission_id}"))
        .forward_headers(&headers)
        .wrapped("Submission deleted successfully")
        .default_error("Failed to delete submission");
    state.upstream.send(call).await
}
