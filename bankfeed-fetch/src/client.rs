//! HTTP client for the upstream provider API.

use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::ApiConfig;
use crate::error::FetchError;

/// Thin wrapper around the provider's POST-only JSON API.
///
/// Credentials are merged into every request body. Two calling conventions
/// are exposed:
///
/// - [`ApiClient::post`] (strict): fails on any non-success status or on a
///   body carrying an `error_code`, regardless of status. Some provider
///   errors arrive as HTTP 200 with an embedded error code, so the body
///   check is not optional.
/// - [`ApiClient::post_allow_error`] (lenient): hands the status and body
///   back so the caller can interpret provider error codes itself.
///
/// No retry logic lives here; retry policy is product-specific and belongs
/// to the fetchers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a client from a configuration.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bankfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Merges the configured credentials into the request body.
    ///
    /// Every endpoint takes a JSON object; a non-object payload is replaced
    /// by an empty body before the credentials are added.
    fn with_credentials(&self, payload: Value) -> Value {
        let mut body = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        body.insert(
            "client_id".to_string(),
            Value::String(self.config.client_id.clone()),
        );
        body.insert(
            "secret".to_string(),
            Value::String(self.config.secret.clone()),
        );
        Value::Object(body)
    }

    /// Strict call: fails with [`FetchError::Api`] if the status is not
    /// success or the decoded body contains an `error_code` field.
    #[instrument(skip(self, payload))]
    pub async fn post(&self, path: &str, payload: Value) -> Result<Value, FetchError> {
        let (status, body) = self.post_allow_error(path, payload).await?;
        if !status.is_success() || body.get("error_code").is_some() {
            return Err(FetchError::Api {
                path: path.to_string(),
                body,
            });
        }
        Ok(body)
    }

    /// Lenient call: returns the raw status and decoded body even when the
    /// provider reports an application-level error. Only transport and
    /// decode failures error.
    #[instrument(skip(self, payload))]
    pub async fn post_allow_error(
        &self,
        path: &str,
        payload: Value,
    ) -> Result<(StatusCode, Value), FetchError> {
        let url = self.endpoint(path);
        let body = self.with_credentials(payload);

        debug!(url = %url, "dispatching request");
        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        debug!(status = %status, "decoded response");

        Ok((status, body))
    }
}

// ============================================================================
// Tests
// ============================================================================
