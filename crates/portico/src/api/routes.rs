//! Route definitions.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers::{
    announcements, api_not_found, auth, consultations, contacts, events, health,
    hr_consultations, language, newsletter, quotes, testimonials, uploads,
};
use super::state::AppState;
use crate::guard::auth_guard;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api_routes = Router::new()
        // Admin quotes
        .route("/admin/quotes", get(quotes::list_quotes))
        .route(
            "/admin/quotes/{quote_id}/status",
            patch(quotes::update_quote_status),
        )
        .route("/admin/quotes/{quote_id}", delete(quotes::delete_quote))
        .route(
            "/admin/quotes/{quote_id}/reply",
            post(quotes::reply_to_quote),
        )
        // Announcements
        .route(
            "/announcements",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        // Consultations
        .route(
            "/consultations/{consultation_id}/status",
            put(consultations::update_consultation_status),
        )
        .route("/consultations/stats", get(consultations::consultation_stats))
        .route(
            "/consultations/time-slots",
            get(consultations::consultation_time_slots),
        )
        .route(
            "/hr-consultations",
            get(hr_consultations::list_hr_consultations),
        )
        .route(
            "/hr-consultations/time-slots",
            get(hr_consultations::hr_time_slots),
        )
        // Contact
        .route("/contact", post(contacts::submit_contact))
        .route(
            "/contact-form-submissions",
            get(contacts::list_submissions),
        )
        .route(
            "/contact-form-submissions/{submission_id}",
            delete(contacts::delete_submission),
        )
        // Events
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route(
            "/testimonials",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        // Chunked blog uploads
        .route("/blogs/chunked-upload/init", post(uploads::init_upload))
        .route(
            "/blogs/chunked-upload/{upload_id}/chunk",
            post(uploads::upload_chunk),
        )
        .route(
            "/blogs/chunked-upload/{upload_id}/complete",
            post(uploads::complete_upload),
        )
        .fallback(api_not_found)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes));

    let site_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route(
            "/i18n/language",
            get(language::get_language).put(language::set_language),
        );

    let static_dir = state.static_dir();
    let site_bundle = ServeDir::new(&static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes)
        .merge(site_routes)
        .fallback_service(site_bundle)
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_guard,
        ))
        .layer(trace_layer)
        .with_state(state)
}
