//! Admin login state.
//!
//! The whole session is the `isAuthenticated` cookie. There is no server-side
//! store; the cookie value is trusted as-is.

use std::sync::Arc;

use axum::http::HeaderMap;
use log::{debug, info};
use serde::Serialize;

use super::cookie::{clear_cookie, request_cookie, set_cookie};
use crate::config::AuthConfig;

pub const AUTH_COOKIE: &str = "isAuthenticated";
const AUTH_COOKIE_VALUE: &str = "true";

/// Session state as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub is_authenticated: bool,
}

impl AuthSession {
    /// Hydrate from request cookies.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            is_authenticated: request_cookie(headers, AUTH_COOKIE) == Some(AUTH_COOKIE_VALUE),
        }
    }
}

/// Outcome of a login attempt: whether it succeeded and the cookie to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub set_cookie: String,
}

/// Credential check and cookie issuance for the admin dashboard.
#[derive(Debug, Clone)]
pub struct AuthService {
    config: Arc<AuthConfig>,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Succeeds only for the configured credential pair.
    pub fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let success = email == self.config.admin_email && password == self.config.admin_password;

        if success {
            info!("Admin login succeeded");
            LoginOutcome {
                success,
                set_cookie: set_cookie(
                    AUTH_COOKIE,
                    AUTH_COOKIE_VALUE,
                    self.config.cookie_max_age_secs,
                ),
            }
        } else {
            debug!("Admin login rejected");
            LoginOutcome {
                success,
                set_cookie: clear_cookie(AUTH_COOKIE),
            }
        }
    }

    /// Cookie clearing the session.
    pub fn logout(&self) -> String {
        clear_cookie(AUTH_COOKIE)
    }

    pub fn session(&self, headers: &HeaderMap) -> AuthSession {
        AuthSession::from_headers(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::COOKIE};

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            admin_email: "owner@site.test".to_string(),
            admin_password: "s3cret".to_string(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_login_exact_pair_sets_week_long_cookie() {
        let outcome = service().login("owner@site.test", "s3cret");
        assert!(outcome.success);
        assert_eq!(
            outcome.set_cookie,
            "isAuthenticated=true; Path=/; Max-Age=604800"
        );
    }

    #[test]
    fn test_login_anything_else_clears_cookie() {
        let auth = service();
        for (email, password) in [
            ("owner@site.test", "wrong"),
            ("OWNER@site.test", "s3cret"),
            ("", ""),
            ("owner@site.test ", "s3cret"),
        ] {
            let outcome = auth.login(email, password);
            assert!(!outcome.success, "{email}/{password} should fail");
            assert_eq!(outcome.set_cookie, "isAuthenticated=; Path=/; Max-Age=0");
        }
    }

    #[test]
    fn test_session_requires_literal_true() {
        let mut headers = HeaderMap::new();
        assert!(!AuthSession::from_headers(&headers).is_authenticated);

        headers.insert(COOKIE, HeaderValue::from_static("isAuthenticated=yes"));
        assert!(!AuthSession::from_headers(&headers).is_authenticated);

        headers.insert(COOKIE, HeaderValue::from_static("isAuthenticated=true"));
        assert!(AuthSession::from_headers(&headers).is_authenticated);
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let value = serde_json::to_value(AuthSession {
            is_authenticated: true,
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"isAuthenticated": true}));
    }
}
