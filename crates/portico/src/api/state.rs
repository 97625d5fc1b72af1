//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::proxy::Upstream;
use crate::session::{AuthService, LanguageService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration resolved at startup.
    pub config: Arc<AppConfig>,
    /// Client for the remote backend API.
    pub upstream: Upstream,
    /// Admin login state.
    pub auth: AuthService,
    /// Display language preference.
    pub languages: LanguageService,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let upstream = Upstream::new(&config.backend)?;
        let auth = AuthService::new(config.auth.clone());
        let languages = LanguageService::new(config.language.clone());

        Ok(Self {
            config: Arc::new(config),
            upstream,
            auth,
            languages,
        })
    }

    /// Directory of the prebuilt site bundle.
    pub fn static_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.frontend.static_dir)
    }
}
