//! Test utilities: a recording mock backend and an app wired to it.

#![allow(dead_code)]

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

use portico::api::{self, AppState};
use portico::config::AppConfig;

pub const INDEX_HTML: &str = "<!doctype html><title>portico</title>";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Backend double that records every request and answers from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

/// Bind the mock backend on an ephemeral port and return it with its base URL.
pub async fn spawn_mock_backend() -> (MockBackend, String) {
    let backend = MockBackend::default();
    let app = Router::new()
        .fallback(record_and_reply)
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, format!("http://127.0.0.1:{port}/api"))
}

async fn record_and_reply(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    backend.calls.fetch_add(1, Ordering::SeqCst);
    let path = uri.path().trim_start_matches("/api").to_string();
    backend.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let reply = |status: StatusCode, body: Value| (status, Json(body)).into_response();

    match (method.as_str(), path.as_str()) {
        ("GET", "/admin/quotes") => reply(
            StatusCode::OK,
            json!({"data": [{"id": "q1", "status": "pending"}], "total": 1}),
        ),
        ("PATCH", "/admin/quotes/q1/status") => {
            reply(StatusCode::OK, json!({"id": "q1", "status": "accepted"}))
        }
        ("POST", "/admin/quotes/q1/reply") => {
            reply(StatusCode::OK, json!({"id": "q1", "replied": true}))
        }
        ("DELETE", "/admin/quotes/missing") => {
            reply(StatusCode::NOT_FOUND, json!({"message": "Quote not found"}))
        }
        ("POST", "/announcements") => reply(StatusCode::OK, json!({"id": "a1"})),
        ("PUT", "/consultations/c1") => {
            reply(StatusCode::OK, json!({"id": "c1", "status": "confirmed"}))
        }
        ("GET", "/consultations-stats") => {
            reply(StatusCode::OK, json!({"total": 3, "pending": 1}))
        }
        ("GET", "/hr-consultations") => reply(StatusCode::OK, json!({"data": [], "total": 0})),
        ("POST", "/contacts") => reply(StatusCode::OK, json!({"id": "m1"})),
        ("GET", "/contact-form-submissions") => reply(StatusCode::OK, json!([{"id": "s1"}])),
        ("DELETE", "/contact-form-submissions/s1") => reply(StatusCode::OK, json!({"deleted": true})),
        ("POST", "/testimonials") => reply(StatusCode::OK, json!({"id": "t2"})),
        ("GET", "/consultations") => reply(
            StatusCode::OK,
            json!([
                {"id": 1, "preferred_time": "10:00"},
                {"id": 2, "preferred_time": "10:00"},
                {"id": 3, "preferred_time": "14:30"},
                {"id": 4}
            ]),
        ),
        ("GET", "/hr-consultations/time-slot-availability") => reply(
            StatusCode::OK,
            json!({"data": [{"preferred_time": "09:00"}, {"preferred_time": "09:00"}]}),
        ),
        ("GET", "/events") => (
            StatusCode::BAD_GATEWAY,
            [(header::CONTENT_TYPE, "text/html")],
            "<html><body>Bad gateway</body></html>",
        )
            .into_response(),
        ("POST", "/events") => reply(StatusCode::OK, json!({"id": "e1"})),
        ("POST", "/newsletter/subscribe") => reply(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"message": "Already subscribed", "errors": {"email": ["taken"]}}),
        ),
        ("GET", "/testimonials") => reply(StatusCode::OK, json!([{"id": "t1"}])),
        ("POST", "/blogs/chunked-upload/init") => {
            reply(StatusCode::OK, json!({"upload_id": "u1", "chunk_size": 1024}))
        }
        ("POST", "/blogs/chunked-upload/u1/chunk") => {
            reply(StatusCode::OK, json!({"upload_id": "u1", "received": 1}))
        }
        ("POST", "/blogs/chunked-upload/u1/complete") => {
            reply(StatusCode::OK, json!({"url": "/media/u1.mp4"}))
        }
        ("POST", p) if p.starts_with("/blogs/chunked-upload/") => reply(
            StatusCode::NOT_FOUND,
            json!({"message": "Upload session not found", "upload_id": "bogus"}),
        ),
        _ => reply(StatusCode::NOT_FOUND, json!({"message": "No such route"})),
    }
}

/// Test configuration with a temporary site bundle.
pub fn test_config(backend_url: Option<String>) -> (AppConfig, TempDir) {
    let static_dir = tempfile::tempdir().unwrap();
    fs::write(static_dir.path().join("index.html"), INDEX_HTML).unwrap();
    fs::write(static_dir.path().join("about.html"), "<h1>About</h1>").unwrap();

    let mut config = AppConfig::default();
    config.backend.base_url = backend_url;
    config.frontend.static_dir = static_dir.path().display().to_string();
    config.auth.admin_email = "admin@example.com".to_string();
    config.auth.admin_password = "s3cret".to_string();
    (config, static_dir)
}

/// Create a test application pointed at `backend_url`. Keep the returned
/// directory alive for the duration of the test.
pub fn test_app(backend_url: Option<String>) -> (Router, TempDir) {
    let (config, static_dir) = test_config(backend_url);
    let state = AppState::new(config).unwrap();
    (api::create_router(state), static_dir)
}
