//! Shared HTTP plumbing for the API collaborators

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use rbdash_core::prelude::*;

/// Local backend used during development (the web console's dev proxy target)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8092";

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Every API route lives under this prefix
const API_PREFIX: &str = "/api";

/// Longest error body excerpt carried into an error message
const MAX_ERROR_BODY: usize = 200;

/// `{"data": ...}` wrapper used by every API response
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// reqwest client plus the validated backend base URL.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("rbdash/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(timeout_ms.max(1)))
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API route, e.g. `endpoint("/apps")`
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, route)
    }

    pub(crate) fn get(&self, route: &str) -> RequestBuilder {
        self.client.get(self.endpoint(route))
    }

    pub(crate) fn post(&self, route: &str) -> RequestBuilder {
        self.client.post(self.endpoint(route))
    }

    /// GET an absolute URL outside the API (logo assets)
    pub(crate) fn get_absolute(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Send a request, mapping transport failures into our error type
pub(crate) async fn send(request: RequestBuilder, label: &str) -> Result<Response> {
    request.send().await.map_err(|e| {
        let kind = if e.is_timeout() {
            "timed out"
        } else if e.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        Error::http(format!("{label}: {kind}: {e}"))
    })
}

/// Fail on non-success statuses; 401/403 become [`Error::Unauthorized`]
pub(crate) async fn ensure_ok(resp: Response, label: &str) -> Result<Response> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        debug!("{label}: {status}");
        return Err(Error::Unauthorized);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = error_excerpt(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "unexpected status".to_string());
        return Err(Error::api_status(status.as_u16(), format!("{label}: {message}")));
    }
    Ok(resp)
}

/// Decode a `{"data": T}` body
pub(crate) async fn read_data<T: DeserializeOwned>(resp: Response, label: &str) -> Result<T> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| Error::http(format!("{label}: failed to read body: {e}")))?;
    let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
    Ok(envelope.data)
}

/// Prefer the backend's `{"error": "..."}` message, else a trimmed body
fn error_excerpt(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
            return Some(msg.to_string());
        }
    }
    Some(body.chars().take(MAX_ERROR_BODY).collect())
}

fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| Error::invalid_url(trimmed, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::invalid_url(
                trimmed,
                format!("unsupported scheme '{other}'"),
            ))
        }
    }
    if url.host_str().is_none() {
        return Err(Error::invalid_url(trimmed, "missing host"));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_prefix() {
        let http = HttpClient::new("http://localhost:8092", 1000).unwrap();
        assert_eq!(http.endpoint("/apps"), "http://localhost:8092/api/apps");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let http = HttpClient::new("https://api.example.com/", 1000).unwrap();
        assert_eq!(http.base_url(), "https://api.example.com");
        assert_eq!(
            http.endpoint("/auth/me"),
            "https://api.example.com/api/auth/me"
        );
    }

    #[test]
    fn test_base_path_preserved() {
        let http = HttpClient::new("https://example.com/rapidbuild", 1000).unwrap();
        assert_eq!(
            http.endpoint("/apps"),
            "https://example.com/rapidbuild/api/apps"
        );
    }

    #[test]
    fn test_invalid_base_urls() {
        assert!(matches!(
            HttpClient::new("localhost:8092", 1000),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpClient::new("ftp://example.com", 1000),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpClient::new("not a url", 1000),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_error_excerpt() {
        assert_eq!(
            error_excerpt(r#"{"error":"database unavailable"}"#).as_deref(),
            Some("database unavailable")
        );
        assert_eq!(error_excerpt("  plain text  ").as_deref(), Some("plain text"));
        assert_eq!(error_excerpt("   "), None);
        assert_eq!(error_excerpt(&"x".repeat(500)).map(|s| s.len()), Some(200));
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }
}
