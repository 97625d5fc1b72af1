use axum::{
    extract::{Query, State},
    http::HeaderMap,
};
use bytes::Bytes;
use serde::Deserialize;

use super::json_body;
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply};

#[derive(Debug, Deserialize)]
pub struct TestimonialsQuery {
    pub include_unapproved: Option<String>,
}

pub async fn list_testimonials(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TestimonialsQuery>,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::get("/testimonials")
        .query(
            query
                .include_unapproved
                .map(|value| format!("include_unapproved={value}")),
        )
        .forward_headers(&headers)
        .default_error("Failed to fetch testimonials");
    state.upstream.send(call).await
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::post("/testimonials")
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .wrapped("Testimonial created successfully")
        .created()
        .default_error("Failed to create testimonial");
    state.upstream.send(call).await
}
