//! Admin login endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::session::{AuthSession, LoginOutcome};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

/// Session snapshot for client hydration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: AuthSession,
    pub is_loading: bool,
}

fn cookie_header(value: String) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(&value)
        .map_err(|e| ApiError::internal(format!("invalid Set-Cookie value: {e}")))
}

/// Check credentials. An unreadable body counts as a failed attempt.
pub async fn login(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let outcome = match request {
        Ok(Json(request)) => state.auth.login(&request.email, &request.password),
        Err(rejection) => {
            debug!("Rejecting unreadable login body: {}", rejection.body_text());
            LoginOutcome {
                success: false,
                set_cookie: state.auth.logout(),
            }
        }
    };
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    Ok((
        status,
        [(SET_COOKIE, cookie_header(outcome.set_cookie)?)],
        Json(LoginResponse {
            success: outcome.success,
        }),
    )
        .into_response())
}

/// Clear the session cookie and send the browser to the login page.
pub async fn logout(State(state): State<AppState>) -> ApiResult<Response> {
    let cookie = cookie_header(state.auth.logout())?;
    Ok((
        [(SET_COOKIE, cookie)],
        Redirect::to(&state.auth.config().login_path),
    )
        .into_response())
}

pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionResponse> {
    Json(SessionResponse {
        session: state.auth.session(&headers),
        is_loading: false,
    })
}
