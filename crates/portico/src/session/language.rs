//! Display language preference, kept in a cookie.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::cookie::{request_cookie, set_cookie};
use crate::config::LanguageConfig;

pub const LANGUAGE_COOKIE: &str = "language";
const LANGUAGE_COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct LanguageService {
    config: Arc<LanguageConfig>,
}

impl LanguageService {
    pub fn new(config: LanguageConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn supported(&self) -> &[String] {
        &self.config.supported
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.config.supported.iter().any(|s| s == code)
    }

    /// The cookie's language when supported, otherwise the default.
    pub fn current(&self, headers: &HeaderMap) -> String {
        request_cookie(headers, LANGUAGE_COOKIE)
            .filter(|code| self.is_supported(code))
            .unwrap_or(self.config.default.as_str())
            .to_string()
    }

    /// Cookie selecting `code`, or `None` when the language is not supported.
    pub fn select(&self, code: &str) -> Option<String> {
        self.is_supported(code)
            .then(|| set_cookie(LANGUAGE_COOKIE, code, LANGUAGE_COOKIE_MAX_AGE))
    }
}
