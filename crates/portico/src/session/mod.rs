//! Client-facing session context: admin login state and display language.

mod auth;
mod cookie;
mod language;

pub use auth::{AUTH_COOKIE, AuthService, AuthSession, LoginOutcome};
pub use cookie::{clear_cookie, cookie_value, request_cookie, set_cookie};
pub use language::{LANGUAGE_COOKIE, LanguageService};
