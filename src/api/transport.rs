//! Transport seam between the typed client and the network
//!
//! `HttpTransport` POSTs GraphQL documents with reqwest's blocking client.
//! Tests swap in a scripted transport instead.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use super::response::GraphQlResponse;
use crate::config::Settings;
use crate::error::{DashError, DashResult};

/// Header carrying the deployment API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// A single GraphQL operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn new(operation_name: &'static str, query: &'static str, variables: Value) -> Self {
        Self {
            operation_name,
            query,
            variables,
        }
    }
}

/// Executes GraphQL requests and returns the `data` object
pub trait Transport {
    fn execute(&self, request: &GraphQlRequest, token: Option<&str>) -> DashResult<Value>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &GraphQlRequest, token: Option<&str>) -> DashResult<Value> {
        (**self).execute(request, token)
    }
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> DashResult<Self> {
        settings.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(concat!("budgetdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self, token: Option<&str>) -> DashResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| DashError::Unauthenticated("Stored token is not a valid header".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| DashError::Config("API key contains invalid characters".into()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        Ok(headers)
    }
}

/// First part of an error body, for log and error messages
fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Map a non-success status to an error
pub(crate) fn status_error(status: StatusCode, body: &str) -> DashError {
    let reason = status.canonical_reason().unwrap_or("request failed");
    let message = if body.trim().is_empty() {
        reason.to_string()
    } else {
        format!("{}: {}", reason, snippet(body))
    };

    if status == StatusCode::UNAUTHORIZED {
        DashError::Unauthenticated(message)
    } else {
        DashError::Http {
            status: status.as_u16(),
            message,
        }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &GraphQlRequest, token: Option<&str>) -> DashResult<Value> {
        log::debug!("POST {} ({})", self.endpoint, request.operation_name);

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers(token)?)
            .json(request)
            .send()
            .map_err(|e| DashError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            log::warn!(
                "{} failed with HTTP {}",
                request.operation_name,
                status.as_u16()
            );
            return Err(status_error(status, &body));
        }

        let envelope: GraphQlResponse = response
            .json()
            .map_err(|e| DashError::Json(format!("Malformed GraphQL response: {}", e)))?;

        envelope.into_data().map_err(|e| {
            log::warn!("{} returned errors: {}", request.operation_name, e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transport(api_key: Option<&str>) -> HttpTransport {
        let settings = Settings {
            api_key: api_key.map(String::from),
            ..Settings::default()
        };
        HttpTransport::new(&settings).unwrap()
    }

    #[test]
    fn test_request_serializes_as_graphql_body() {
        let request = GraphQlRequest::new("GetTenants", "query { tenants { id } }", json!({}));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["operationName"], "GetTenants");
        assert_eq!(body["variables"], json!({}));
    }

    #[test]
    fn test_headers_include_bearer_and_api_key() {
        let headers = transport(Some("k-123")).headers(Some("jwt.abc")).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer jwt.abc");
        assert_eq!(headers[API_KEY_HEADER], "k-123");
    }

    #[test]
    fn test_headers_without_credentials() {
        let headers = transport(Some("  ")).headers(None).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(API_KEY_HEADER).is_none());
    }

    #[test]
    fn test_status_classification() {
        assert!(status_error(StatusCode::UNAUTHORIZED, "").is_auth_failure());

        let forbidden = status_error(StatusCode::FORBIDDEN, "missing key");
        assert!(forbidden.is_forbidden());
        assert_eq!(forbidden.to_string(), "HTTP 403: Forbidden: missing key");

        let server = status_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(server.status_code(), Some(502));
    }

    #[test]
    fn test_unreachable_endpoint_is_network_error() {
        let settings = Settings {
            endpoint: "http://127.0.0.1:9/graphql".into(),
            request_timeout_secs: 2,
            ..Settings::default()
        };
        let transport = HttpTransport::new(&settings).unwrap();
        let request = GraphQlRequest::new("HealthCheck", super::super::queries::HEALTH_CHECK, json!({}));
        let err = transport.execute(&request, None).unwrap_err();
        assert!(matches!(err, DashError::Network(_)));
    }
}
