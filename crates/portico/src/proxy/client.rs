//! Backend HTTP client.

use std::time::Duration;

use axum::http::{StatusCode, header};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::call::{OutboundBody, ProxyCall, ProxyReply};
use super::error::ProxyError;
use super::form::build_form;
use crate::config::BackendConfig;

/// Client for the remote backend API.
///
/// Holds the pooled HTTP client and the base URL resolved at startup. A missing
/// base URL is not an error here; every call fails closed instead.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: Client,
    base_url: Option<String>,
}

impl Upstream {
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.normalized_base_url(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn base_url(&self) -> Result<&str, ProxyError> {
        self.base_url.as_deref().ok_or(ProxyError::NotConfigured)
    }

    /// Concatenate base URL, path and raw query.
    pub fn url_for(&self, path: &str, query: Option<&str>) -> Result<String, ProxyError> {
        let mut url = format!("{}{}", self.base_url()?, path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        Ok(url)
    }

    /// Forward a call and shape the successful payload.
    pub async fn send(&self, call: ProxyCall) -> Result<ProxyReply, ProxyError> {
        let shape = call.shape;
        let success_status = call.success_status;
        let (status, payload) = self.exchange(call).await?;
        Ok(ProxyReply::from_backend(shape, success_status, status, payload))
    }

    /// Forward a call and return the decoded backend payload.
    pub async fn exchange(&self, call: ProxyCall) -> Result<(StatusCode, Value), ProxyError> {
        let url = self.url_for(&call.path, call.query.as_deref())?;
        debug!(method = %call.method, url = %url, "Forwarding request to backend");

        let mut request = self
            .client
            .request(call.method.clone(), &url)
            .header(header::ACCEPT, "application/json");
        for (name, value) in &call.headers {
            request = request.header(name, value);
        }
        request = match call.body {
            OutboundBody::Empty => request,
            OutboundBody::Json(body) => request.json(&body),
            OutboundBody::Form(fields) => request.multipart(build_form(fields)?),
        };

        let response = request.send().await.map_err(|e| {
            error!(url = %url, "Backend request failed: {:?}", e);
            ProxyError::Transport {
                url: url.clone(),
                detail: e.to_string(),
            }
        })?;

        let status = response.status();
        let raw = response.text().await.map_err(|e| {
            error!(url = %url, status = %status, "Failed to read backend response: {:?}", e);
            ProxyError::Transport {
                url: url.clone(),
                detail: e.to_string(),
            }
        })?;

        decode_response(&url, status, raw, call.default_error, call.include_details)
            .map(|payload| (status, payload))
    }
}

/// Decode a backend body and classify failures.
fn decode_response(
    url: &str,
    status: StatusCode,
    raw: String,
    default_error: &str,
    include_details: bool,
) -> Result<Value, ProxyError> {
    let parsed = if raw.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&raw)
    };

    match parsed {
        Ok(payload) if status.is_success() => Ok(payload),
        Ok(body) => {
            warn!(url = %url, status = %status, body = %raw, "Backend returned an error");
            Err(ProxyError::upstream(
                status,
                body,
                default_error,
                include_details,
            ))
        }
        Err(e) => {
            error!(
                url = %url,
                status = %status,
                body = %raw,
                "Backend returned a non-JSON response: {}",
                e
            );
            Err(ProxyError::NonJson {
                url: url.to_string(),
                status,
                raw,
                include_details,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream(base_url: Option<&str>) -> Upstream {
        Upstream::new(&BackendConfig {
            base_url: base_url.map(str::to_string),
            timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_url_for_concatenates_verbatim() {
        let client = upstream(Some("http://backend:8000/api/"));
        assert_eq!(
            client.url_for("/hr-consultations", Some("status=new&page=2")).unwrap(),
            "http://backend:8000/api/hr-consultations?status=new&page=2"
        );
        assert_eq!(
            client.url_for("/events", None).unwrap(),
            "http://backend:8000/api/events"
        );
    }

    #[test]
    fn test_missing_base_url_fails_closed() {
        let client = upstream(None);
        assert!(!client.is_configured());
        assert!(matches!(
            client.url_for("/events", None),
            Err(ProxyError::NotConfigured)
        ));
    }

    #[test]
    fn test_decode_success_and_empty_body() {
        let payload =
            decode_response("u", StatusCode::OK, r#"{"a":1}"#.to_string(), "x", false).unwrap();
        assert_eq!(payload, json!({"a": 1}));

        let empty = decode_response("u", StatusCode::NO_CONTENT, String::new(), "x", false).unwrap();
        assert_eq!(empty, Value::Null);
    }

    #[test]
    fn test_decode_json_error_keeps_status() {
        let err = decode_response(
            "u",
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"X"}"#.to_string(),
            "default",
            false,
        )
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "X");
    }

    #[test]
    fn test_decode_html_error_becomes_500() {
        let err = decode_response(
            "u",
            StatusCode::NOT_FOUND,
            "<html>Not Found</html>".to_string(),
            "default",
            true,
        )
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ProxyError::NonJson { include_details: true, .. }));
    }
}
