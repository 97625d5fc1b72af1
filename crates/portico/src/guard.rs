//! Route protection for the admin pages.
//!
//! A two-state machine per request, derived from the `isAuthenticated` cookie:
//! unauthenticated requests to a protected prefix go to the login page, and
//! authenticated requests to the login or signup page go to the admin root.
//! Everything else passes through untouched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use log::debug;

use crate::config::AuthConfig;
use crate::session::{AuthService, AuthSession};

/// Leading path segments the guard never inspects. Matched as prefixes of the
/// path without its leading slash, so `/apiary` is skipped along with `/api`.
const EXCLUDED_PREFIXES: [&str; 5] = [
    "api",
    "_next/static",
    "_next/image",
    "assets/",
    "favicon.ico",
];

const EXCLUDED_IMAGE_EXTENSIONS: [&str; 6] = ["svg", "png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(String),
}

/// Whether the guard skips this path entirely.
pub fn is_excluded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if EXCLUDED_PREFIXES.iter().any(|prefix| rest.starts_with(prefix)) {
        return true;
    }

    matches!(
        path.rsplit_once('.'),
        Some((_, ext)) if EXCLUDED_IMAGE_EXTENSIONS.contains(&ext)
    )
}

/// Decide what to do with a request for `path`.
pub fn decide(config: &AuthConfig, path: &str, authenticated: bool) -> GuardDecision {
    let protected = config
        .protected_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()));

    if protected && !authenticated {
        return GuardDecision::Redirect(config.login_path.clone());
    }

    if authenticated && (path == config.login_path || path == config.signup_path) {
        return GuardDecision::Redirect(config.admin_root.clone());
    }

    GuardDecision::Pass
}

/// Middleware applying [`decide`] to every non-excluded request.
pub async fn auth_guard(State(auth): State<AuthService>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if is_excluded(&path) {
        return next.run(request).await;
    }

    let session = AuthSession::from_headers(request.headers());
    match decide(auth.config(), &path, session.is_authenticated) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::Redirect(target) => {
            debug!(
                "auth guard: redirecting {} to {} (authenticated: {})",
                path, target, session.is_authenticated
            );
            Redirect::temporary(&target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::default()
    }

    #[test]
    fn test_protected_paths_redirect_when_unauthenticated() {
        for path in ["/admin", "/admin/quotes", "/admin-anything", "/administrator"] {
            assert_eq!(
                decide(&config(), path, false),
                GuardDecision::Redirect("/login".to_string()),
                "{path}"
            );
        }
    }

    #[test]
    fn test_protected_paths_pass_when_authenticated() {
        for path in ["/admin", "/admin/events/new", "/admin-anything"] {
            assert_eq!(decide(&config(), path, true), GuardDecision::Pass, "{path}");
        }
    }

    #[test]
    fn test_login_and_signup_redirect_when_authenticated() {
        assert_eq!(
            decide(&config(), "/login", true),
            GuardDecision::Redirect("/admin".to_string())
        );
        assert_eq!(
            decide(&config(), "/signup", true),
            GuardDecision::Redirect("/admin".to_string())
        );
        assert_eq!(decide(&config(), "/login", false), GuardDecision::Pass);
        assert_eq!(decide(&config(), "/signup", false), GuardDecision::Pass);
    }

    #[test]
    fn test_login_match_is_exact() {
        assert_eq!(decide(&config(), "/login/help", true), GuardDecision::Pass);
    }

    #[test]
    fn test_public_paths_pass() {
        for authenticated in [false, true] {
            assert_eq!(decide(&config(), "/", authenticated), GuardDecision::Pass);
            assert_eq!(decide(&config(), "/about", authenticated), GuardDecision::Pass);
        }
    }

    #[test]
    fn test_custom_prefixes() {
        let config = AuthConfig {
            protected_prefixes: vec!["/admin".to_string(), "/dashboard".to_string()],
            ..AuthConfig::default()
        };
        assert_eq!(
            decide(&config, "/dashboard/stats", false),
            GuardDecision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_exclusions() {
        assert!(is_excluded("/api/admin/quotes"));
        assert!(is_excluded("/_next/static/chunk.js"));
        assert!(is_excluded("/_next/image"));
        assert!(is_excluded("/favicon.ico"));
        assert!(is_excluded("/admin/logo.png"));
        assert!(is_excluded("/hero.webp"));
        assert!(!is_excluded("/admin"));
        assert!(!is_excluded("/admin/report.pdf"));
        assert!(!is_excluded("/login"));
    }
}
