//! HTTP client for the detection service.
//!
//! One client instance owns a reusable connection pool and an immutable
//! configuration. `detect` and `enforce` follow the same protocol and
//! differ only in the endpoint path: a single JSON POST carrying the
//! payload and context, authenticated with the `X-API-Key` header. One
//! network attempt is made per call; there is no retry, no backoff, and
//! no client-imposed timeout.

use crate::context::Context;
use crate::error::ClientError;
use crate::payload::FeaturePayload;
use crate::request::{build_request, Operation};
use crate::response::ServiceResponse;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.childsafe.dev/v1";

/// Diagnostic used when a failed response has no body.
const GENERIC_FAILURE: &str = "request failed";

/// Client configuration. Immutable once a client is constructed from it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL, without a trailing slash.
    pub base_url: String,
    /// API key sent verbatim in the `X-API-Key` header.
    pub api_key: String,
}

impl ClientConfig {
    /// Configuration for the production endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the base URL, e.g. for staging or a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL for an endpoint path under the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Asynchronous detection service client.
///
/// Cheap to clone and safe to share across concurrent tasks: calls hold
/// no per-call mutable state and the underlying connection pool is
/// reused.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
}

impl Client {
    /// Create a client bound to the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        // No timeout here: calls run until the transport itself gives up.
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self { config, http }
    }

    /// Create a client for the production endpoint with the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(ClientConfig::new(api_key))
    }

    /// The configuration this client was constructed with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request a risk assessment for a feature payload.
    pub async fn detect(
        &self,
        payload: &FeaturePayload,
        context: &Context,
    ) -> Result<ServiceResponse, ClientError> {
        self.send(Operation::Detect, payload, context).await
    }

    /// Request an enforcement verdict for a feature payload.
    pub async fn enforce(
        &self,
        payload: &FeaturePayload,
        context: &Context,
    ) -> Result<ServiceResponse, ClientError> {
        self.send(Operation::Enforce, payload, context).await
    }

    /// Execute one operation: a single POST against its endpoint.
    async fn send(
        &self,
        operation: Operation,
        payload: &FeaturePayload,
        context: &Context,
    ) -> Result<ServiceResponse, ClientError> {
        let body = build_request(payload, context);
        let url = self.config.endpoint(operation.path());

        tracing::debug!(
            operation = operation.name(),
            url = %url,
            features = payload.len(),
            "dispatching request"
        );

        let response = self
            .http
            .post(&url)
            .header("X-API-Key", self.config.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        self.classify(response).await
    }

    /// Check service availability.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let response = self
            .http
            .get(self.config.endpoint("/v1/health"))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(response.status().is_success())
    }

    /// Fetch the usage quota for the configured key.
    pub async fn quota(&self) -> Result<ServiceResponse, ClientError> {
        let response = self
            .http
            .get(self.config.endpoint("/v1/quota"))
            .header("X-API-Key", self.config.api_key.as_str())
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        self.classify(response).await
    }

    /// Submit misclassification feedback for a previous verdict. The
    /// report document is caller-shaped and forwarded as-is.
    pub async fn feedback(
        &self,
        report: &serde_json::Value,
    ) -> Result<ServiceResponse, ClientError> {
        let response = self
            .http
            .post(self.config.endpoint("/v1/feedback"))
            .header("X-API-Key", self.config.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(report)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        self.classify(response).await
    }

    /// Classify an exchange by status alone: any success status decodes
    /// the body permissively, any other status fails with the body text
    /// as the message.
    async fn classify(&self, response: reqwest::Response) -> Result<ServiceResponse, ClientError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "service rejected request");
            let message = if body.is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                body
            };
            return Err(ClientError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(ServiceResponse::from_body(&body))
    }
}

/// Blocking client for synchronous call sites.
pub struct BlockingClient {
    inner: Client,
    runtime: tokio::runtime::Runtime,
}

impl BlockingClient {
    /// Create a blocking client bound to the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create runtime: {e}")))?;

        Ok(Self {
            inner: Client::new(config),
            runtime,
        })
    }

    /// Request a risk assessment for a feature payload.
    pub fn detect(
        &self,
        payload: &FeaturePayload,
        context: &Context,
    ) -> Result<ServiceResponse, ClientError> {
        self.runtime.block_on(self.inner.detect(payload, context))
    }

    /// Request an enforcement verdict for a feature payload.
    pub fn enforce(
        &self,
        payload: &FeaturePayload,
        context: &Context,
    ) -> Result<ServiceResponse, ClientError> {
        self.runtime.block_on(self.inner.enforce(payload, context))
    }

    /// Check service availability.
    pub fn health(&self) -> Result<bool, ClientError> {
        self.runtime.block_on(self.inner.health())
    }

    /// Fetch the usage quota for the configured key.
    pub fn quota(&self) -> Result<ServiceResponse, ClientError> {
        self.runtime.block_on(self.inner.quota())
    }

    /// Submit misclassification feedback for a previous verdict.
    pub fn feedback(&self, report: &serde_json::Value) -> Result<ServiceResponse, ClientError> {
        self.runtime.block_on(self.inner.feedback(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_production() {
        let config = ClientConfig::new("abc123");
        assert_eq!(config.base_url, "https://api.childsafe.dev/v1");
        assert_eq!(config.api_key, "abc123");
        assert_eq!(
            config.endpoint("/v1/detect"),
            "https://api.childsafe.dev/v1/v1/detect"
        );
    }

    #[test]
    fn test_base_url_override_trims_trailing_slash() {
        let config = ClientConfig::new("k").with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(
            config.endpoint("/v1/enforce"),
            "http://127.0.0.1:8080/v1/enforce"
        );
    }

    #[test]
    fn test_client_exposes_config() {
        let client = Client::with_api_key("abc123");
        assert_eq!(client.config().api_key, "abc123");
        assert_eq!(client.config().base_url, DEFAULT_BASE_URL);
    }
}
