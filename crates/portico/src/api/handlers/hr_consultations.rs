//! HR consultation bookings.

use axum::{
    Json,
    extract::{Query, RawQuery, State},
    http::HeaderMap,
};

use super::{DateQuery, TimeSlots};
use crate::api::AppState;
use crate::proxy::{ProxyCall, ProxyError, ProxyReply, tally_time_slots};

/// List HR consultations; the query string is forwarded as-is.
pub async fn list_hr_consultations(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<ProxyReply, ProxyError> {
    let call = ProxyCall::get("/hr-consultations")
        .query(query)
        .forward_headers(&headers)
        .default_error("Failed to fetch HR consultations");
    state.upstream.send(call).await
}

pub async fn hr_time_slots(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> Result<Json<TimeSlots>, ProxyError> {
    state.upstream.base_url()?;
    let date = query.required()?;
    let call = ProxyCall::get("/hr-consultations/time-slot-availability")
        .query(Some(format!("date={date}")))
        .forward_headers(&headers)
        .default_error("Failed to fetch time slot availability");

    let (_, records) = state.upstream.exchange(call).await?;
    Ok(Json(TimeSlots {
        slots: tally_time_slots(&records),
        date,
    }))
}
