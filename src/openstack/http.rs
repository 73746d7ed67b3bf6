//! HTTP utilities for OpenStack REST API calls

use crate::error::FetchError;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const REQUEST_ID_HEADER: &str = "X-OpenStack-Request-ID";

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Global request id sent with every call so backend logs can be correlated
fn new_request_id() -> String {
    format!("req-{}", uuid::Uuid::new_v4())
}

/// HTTP client wrapper shared by every service client
#[derive(Clone)]
pub struct OsHttpClient {
    client: Client,
}

impl OsHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("heat-resource-fetcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make an authenticated GET request
    pub async fn get(&self, url: &str, token: &str) -> Result<Value> {
        self.get_with_query::<[(&str, &str); 0]>(url, token, None).await
    }

    /// Make an authenticated GET request with query parameters
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        url: &str,
        token: &str,
        query: Option<&Q>,
    ) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).header(AUTH_TOKEN_HEADER, token);
        if let Some(query) = query {
            request = request.query(query);
        }

        self.send(request, url).await
    }

    /// Make an unauthenticated POST request with a JSON body
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let request = self.client.post(url).json(body);
        self.send(request, url).await
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Value> {
        let request_id = new_request_id();
        tracing::trace!("request id {} for {}", request_id, url);

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(FetchError::Api {
                status,
                url: url.to_string(),
            }
            .into());
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

/// Join a catalog endpoint and a relative path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode a single path segment (ids, stack names)
pub fn path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Short hint for an error, used next to the full error chain on stderr
pub fn format_api_error(error: &anyhow::Error) -> Option<&'static str> {
    let status = error.downcast_ref::<FetchError>()?.status()?;

    let hint = match status.as_u16() {
        401 => "Authentication failed. Check OS_USERNAME, OS_PASSWORD and OS_TENANT_NAME.",
        403 => "Permission denied. The user lacks a role required by this call.",
        404 => "Resource not found. It may have been deleted outside the stack.",
        413 | 429 => "Rate limit exceeded. Please try again later.",
        500 | 502 | 503 | 504 => "OpenStack service temporarily unavailable. Please try again.",
        _ => return None,
    };
    Some(hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("bad\nrequest\t!"), "badrequest!");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://heat:8004/v1/abc/", "/stacks"),
            "http://heat:8004/v1/abc/stacks"
        );
        assert_eq!(join_url("http://neutron:9696", "v2.0/ports/1"), "http://neutron:9696/v2.0/ports/1");
    }

    #[test]
    fn test_path_segment_encodes_reserved_characters() {
        assert_eq!(path_segment("my stack/1"), "my%20stack%2F1");
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = new_request_id();
        let b = new_request_id();
        assert!(a.starts_with("req-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_format_api_error_hints() {
        let err: anyhow::Error = FetchError::Api {
            status: StatusCode::UNAUTHORIZED,
            url: "http://keystone/v2.0/tokens".into(),
        }
        .into();
        assert!(format_api_error(&err).unwrap().contains("Authentication failed"));

        let err: anyhow::Error = FetchError::Api {
            status: StatusCode::IM_A_TEAPOT,
            url: "http://x".into(),
        }
        .into();
        assert_eq!(format_api_error(&err), None);
        assert_eq!(format_api_error(&anyhow::anyhow!("other")), None);
    }
}
