//! Description of a single forwarded backend call.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use super::form::FormField;

/// Request headers copied onto the outbound call.
const FORWARDED_HEADERS: [header::HeaderName; 2] =
    [header::AUTHORIZATION, header::ACCEPT_LANGUAGE];

/// Outbound request body.
#[derive(Debug, Clone, Default)]
pub enum OutboundBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<FormField>),
}

/// How a successful backend payload is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessShape {
    /// Return the backend JSON untouched.
    Passthrough,
    /// Wrap the payload as `{message, data}`.
    Wrapped { message: &'static str },
}

/// One inbound request translated into one backend call.
#[derive(Debug, Clone)]
pub struct ProxyCall {
    pub method: Method,
    /// Backend path with parameters already substituted, e.g. `/admin/quotes/7`.
    pub path: String,
    /// Raw query string, appended verbatim.
    pub query: Option<String>,
    pub body: OutboundBody,
    pub headers: Vec<(header::HeaderName, HeaderValue)>,
    pub shape: SuccessShape,
    /// Status to answer with on success; `None` mirrors the backend status.
    pub success_status: Option<StatusCode>,
    /// Message used when a backend error body carries none.
    pub default_error: &'static str,
    /// Attach the backend error body as `details`.
    pub include_details: bool,
}

impl ProxyCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: OutboundBody::Empty,
            headers: Vec::new(),
            shape: SuccessShape::Passthrough,
            success_status: None,
            default_error: "Request to backend failed",
            include_details: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a raw query string. Empty strings are ignored.
    pub fn query(mut self, query: Option<impl Into<String>>) -> Self {
        self.query = query.map(Into::into).filter(|q: &String| !q.is_empty());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = OutboundBody::Json(body);
        self
    }

    pub fn form(mut self, fields: Vec<FormField>) -> Self {
        self.body = OutboundBody::Form(fields);
        self
    }

    /// Copy the forwardable headers from the inbound request.
    pub fn forward_headers(mut self, headers: &HeaderMap) -> Self {
        for name in FORWARDED_HEADERS {
            if let Some(value) = headers.get(&name) {
                self.headers.push((name, value.clone()));
            }
        }
        self
    }

    pub fn wrapped(mut self, message: &'static str) -> Self {
        self.shape = SuccessShape::Wrapped { message };
        self
    }

    pub fn created(mut self) -> Self {
        self.success_status = Some(StatusCode::CREATED);
        self
    }

    pub fn default_error(mut self, message: &'static str) -> Self {
        self.default_error = message;
        self
    }

    pub fn with_details(mut self) -> Self {
        self.include_details = true;
        self
    }
}

/// A successful proxied response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ProxyReply {
    /// Shape a decoded backend payload according to the call's success rules.
    pub fn from_backend(
        shape: SuccessShape,
        success_status: Option<StatusCode>,
        backend_status: StatusCode,
        payload: Value,
    ) -> Self {
        let status = success_status.unwrap_or(backend_status);
        let body = match shape {
            SuccessShape::Passthrough => payload,
            SuccessShape::Wrapped { message } => json!({ "message": message, "data": payload }),
        };
        Self { status, body }
    }
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_mirrors_backend_status() {
        let reply = ProxyReply::from_backend(
            SuccessShape::Passthrough,
            None,
            StatusCode::OK,
            json!([{"id": 1}]),
        );
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!([{"id": 1}]));
    }

    #[test]
    fn test_wrapped_pins_created_status() {
        let reply = ProxyReply::from_backend(
            SuccessShape::Wrapped {
                message: "Testimonial created successfully",
            },
            Some(StatusCode::CREATED),
            StatusCode::OK,
            json!({"id": 9}),
        );
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(
            reply.body,
            json!({"message": "Testimonial created successfully", "data": {"id": 9}})
        );
    }

    #[test]
    fn test_query_ignores_empty() {
        let call = ProxyCall::get("/events").query(Some(""));
        assert!(call.query.is_none());
        let call = ProxyCall::get("/events").query(Some("page=2"));
        assert_eq!(call.query.as_deref(), Some("page=2"));
    }

    #[test]
    fn test_forward_headers_copies_authorization_only() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        headers.insert(header::COOKIE, HeaderValue::from_static("isAuthenticated=true"));
        let call = ProxyCall::get("/events").forward_headers(&headers);
        assert_eq!(call.headers.len(), 1);
        assert_eq!(call.headers[0].0, header::AUTHORIZATION);
    }
}
