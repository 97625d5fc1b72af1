//! Application configuration.
//!
//! Configuration is resolved once at startup from, in increasing priority:
//! built-in defaults, the TOML config file, `PORTICO__*` environment variables,
//! and finally the legacy deployment variables (`NEXT_PUBLIC_API_URL`, `SMTP_*`).

use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_NAME: &str = "portico";

/// Legacy variable holding the backend base URL.
pub const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("backend base URL is not configured (set {API_URL_ENV} or backend.base_url)")]
    MissingBackendUrl,

    #[error("backend base URL must start with http:// or https://, got '{0}'")]
    InvalidBackendUrl(String),

    #[error("admin credentials must not be empty")]
    EmptyCredentials,

    #[error("default language '{0}' is not in the supported list")]
    UnsupportedDefaultLanguage(String),

    #[error("could not determine a config directory")]
    NoConfigDir,

    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub frontend: FrontendConfig,
    pub auth: AuthConfig,
    pub language: LanguageConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body on `/api` routes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Remote backend API configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend API (e.g. "http://localhost:8000/api").
    pub base_url: Option<String>,
    /// Per-request timeout. Unset means the HTTP client's defaults apply.
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    /// Base URL with surrounding whitespace and trailing slashes removed.
    /// An empty value counts as unset.
    pub fn normalized_base_url(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Directory holding the prebuilt site bundle.
    pub static_dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            static_dir: "./public".to_string(),
        }
    }
}

/// Admin login and route protection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// The single accepted admin email.
    pub admin_email: String,
    /// The single accepted admin password.
    pub admin_password: String,
    /// Path prefixes that require the auth cookie. Matched as plain string prefixes.
    pub protected_prefixes: Vec<String>,
    pub login_path: String,
    pub signup_path: String,
    /// Where authenticated users land when they open the login or signup page.
    pub admin_root: String,
    /// Lifetime of the auth cookie in seconds.
    pub cookie_max_age_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@example.com".to_string(),
            admin_password: "changeme".to_string(),
            protected_prefixes: vec!["/admin".to_string()],
            login_path: "/login".to_string(),
            signup_path: "/signup".to_string(),
            admin_root: "/admin".to_string(),
            cookie_max_age_secs: 60 * 60 * 24 * 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub default: String,
    pub supported: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: "en".to_string(),
            supported: vec!["en".to_string(), "fr".to_string()],
        }
    }
}

/// Outbound mail transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub host: Option<String>,
    pub port: u16,
    pub secure: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            secure: false,
            user: None,
            password: None,
            from: None,
        }
    }
}

impl MailConfig {
    pub fn is_configured(&self) -> bool {
        self.host.is_some() && self.from.is_some()
    }
}

impl AppConfig {
    /// Check the values the server cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self
            .backend
            .normalized_base_url()
            .ok_or(ConfigError::MissingBackendUrl)?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(base_url));
        }

        if self.auth.admin_email.trim().is_empty() || self.auth.admin_password.is_empty() {
            return Err(ConfigError::EmptyCredentials);
        }

        if !self.language.supported.contains(&self.language.default) {
            return Err(ConfigError::UnsupportedDefaultLanguage(
                self.language.default.clone(),
            ));
        }

        Ok(())
    }

    /// Apply the legacy deployment variables on top of the loaded config.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(API_URL_ENV) {
            self.backend.base_url = Some(url);
        }
        if let Some(host) = non_empty("SMTP_HOST") {
            self.mail.host = Some(host);
        }
        if let Some(port) = non_empty("SMTP_PORT").and_then(|p| p.trim().parse().ok()) {
            self.mail.port = port;
        }
        if let Some(secure) = non_empty("SMTP_SECURE") {
            self.mail.secure = secure.trim().eq_ignore_ascii_case("true");
        }
        if let Some(user) = non_empty("SMTP_USER") {
            self.mail.user = Some(user);
        }
        if let Some(pass) = non_empty("SMTP_PASS") {
            self.mail.password = Some(pass);
        }
        if let Some(from) = non_empty("SMTP_FROM") {
            self.mail.from = Some(from);
        }
    }

    /// Copy with secrets masked, for printing.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.auth.admin_password = "********".to_string();
        if copy.mail.password.is_some() {
            copy.mail.password = Some("********".to_string());
        }
        copy
    }
}

/// Load configuration from `path` (optional on disk) and the environment.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let built = Config::builder()
        .set_default("logging.level", "info")?
        .add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(Environment::with_prefix(&env_prefix()).separator("__"))
        .build()?;

    let mut config: AppConfig = built.try_deserialize()?;
    config.apply_legacy_env(|key| env::var(key).ok());
    Ok(config)
}

/// Render the default config file contents.
pub fn default_config_toml(path: &Path) -> Result<String, toml::ser::Error> {
    let body = toml::to_string_pretty(&AppConfig::default())?;
    Ok(format!(
        "# Configuration for {APP_NAME}\n# File: {}\n\n{body}",
        path.display()
    ))
}

pub fn env_prefix() -> String {
    APP_NAME.to_ascii_uppercase()
}

pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join(APP_NAME));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Resolve the config file path, honoring an explicit override.
/// A directory override resolves to `config.toml` inside it.
pub fn resolve_config_path(override_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match override_path {
        Some(path) => {
            let expanded = expand_path(path)?;
            if expanded.is_dir() {
                Ok(expanded.join("config.toml"))
            } else {
                Ok(expanded)
            }
        }
        None => Ok(default_config_dir()?.join("config.toml")),
    }
}

/// Expand `~` and environment variables in a path.
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| ConfigError::InvalidPath {
        path: raw.to_string(),
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
