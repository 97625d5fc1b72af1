//! Display language preference.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub language: String,
    pub supported: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}

pub async fn get_language(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<LanguageResponse> {
    Json(LanguageResponse {
        language: state.languages.current(&headers),
        supported: state.languages.supported().to_vec(),
    })
}

pub async fn set_language(
    State(state): State<AppState>,
    Json(request): Json<SetLanguageRequest>,
) -> ApiResult<Response> {
    let code = request.language.trim();
    let cookie = state
        .languages
        .select(code)
        .ok_or_else(|| ApiError::bad_request(format!("unsupported language '{code}'")))?;
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::internal(format!("invalid Set-Cookie value: {e}")))?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LanguageResponse {
            language: code.to_string(),
            supported: state.languages.supported().to_vec(),
        }),
    )
        .into_response())
}
