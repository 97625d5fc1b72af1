//! General consultation bookings.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use bytes::Bytes;

use super::{DateQuery, TimeSlots, json_body};
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply, tally_time_slots};

pub async fn update_consultation_status(
    State(state): State<AppState>,
    Path(consultation_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ProxyReply, ProxyError> {
    state.upstream.base_url()?;
    let call = ProxyCall::put(format!("/consultations/{consultation_id}"))
        .json(json_body(&body)?)
        .forward_headers(&headers)
        .wrapped("Consultation status updated successfully")
        .default_error("Failed to update consultation status");
    state.upstream.send(call).await
}

pub async fn consultation_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::get("/consultations-stats")
        .forward_headers(&headers)
        .default_error("Failed to fetch consultation statistics");
    state.upstream.send(call).await
}

/// Booked consultations per time slot on a date.
pub async fn consultation_time_slots(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> Result<Json<TimeSlots>, ProxyError> {
    state.upstream.base_url()?;
    let date = query.required()?;
    let call = ProxyCall::get("/consultations")
        .query(Some(format!("preferred_date={date}")))
        .forward_headers(&headers)
        .default_error("Failed to fetch time slots");

    let (_, records) = state.upstream.exchange(call).await?;
    Ok(Json(TimeSlots {
        slots: tally_time_slots(&records),
        date,
    }))
}
