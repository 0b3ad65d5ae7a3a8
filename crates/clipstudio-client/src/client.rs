//! Resilient request executor.
//!
//! Single-attempt HTTP client with:
//! - Health gating (fail fast when the backend is known to be down)
//! - Per-environment request timeout
//! - Bearer token injection
//! - Structured error extraction from non-2xx bodies
//! - Observability (tracing spans, metrics)
//!
//! The executor never retries: POST endpoints here are not idempotent.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info_span, Instrument};
use url::Url;

use crate::auth::{FileTokenStore, NoToken, TokenStore};
use crate::environment::{self, EnvironmentProfile};
use crate::error::{ApiError, ApiResult};
use crate::health::{HealthGate, HealthPolicy, HealthStatus, PROBE_TIMEOUT};
use crate::metrics::record_request;
use crate::types::{RequestBody, RequestDescriptor};

/// Environment variable selecting the health policy.
pub const HEALTH_POLICY_ENV_VAR: &str = "CLIPSTUDIO_HEALTH_POLICY";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the API client.
#[derive(Clone)]
pub struct ApiClientConfig {
    /// Base URL and request timeout
    pub profile: EnvironmentProfile,
    /// When to re-probe the backend
    pub health_policy: HealthPolicy,
    /// Health probe timeout
    pub probe_timeout: Duration,
    /// Auth token source
    pub token_store: Arc<dyn TokenStore>,
}

impl fmt::Debug for ApiClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClientConfig")
            .field("profile", &self.profile)
            .field("health_policy", &self.health_policy)
            .field("probe_timeout", &self.probe_timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClientConfig {
    /// Config for a profile with the default health policy and no auth.
    pub fn new(profile: EnvironmentProfile) -> Self {
        Self {
            profile,
            health_policy: HealthPolicy::default(),
            probe_timeout: PROBE_TIMEOUT,
            token_store: Arc::new(NoToken),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let health_policy = std::env::var(HEALTH_POLICY_ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        let token_store: Arc<dyn TokenStore> = match FileTokenStore::from_env() {
            Some(store) => Arc::new(store),
            None => Arc::new(NoToken),
        };

        Self {
            profile: environment::resolve().clone(),
            health_policy,
            probe_timeout: PROBE_TIMEOUT,
            token_store,
        }
    }

    pub fn with_health_policy(mut self, policy: HealthPolicy) -> Self {
        self.health_policy = policy;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = store;
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the generation backend. Construct once and share via `Arc`.
pub struct ApiClient {
    http: Client,
    config: ApiClientConfig,
    health: HealthGate,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("health", &self.health)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiClientConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("clipstudio-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let health = HealthGate::new(config.health_policy, config.probe_timeout);

        Ok(Self {
            http,
            config,
            health,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ApiClientConfig::from_env())
    }

    pub fn profile(&self) -> &EnvironmentProfile {
        &self.config.profile
    }

    /// Probe the backend now and update the cached flag.
    pub async fn probe(&self) -> bool {
        self.health.probe(&self.http, &self.config.profile.base_url).await
    }

    /// Cached reachability; never probes.
    pub fn is_reachable(&self) -> bool {
        self.health.is_reachable()
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health.status()
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Execute a request and return the parsed JSON body.
    pub async fn request(&self, descriptor: RequestDescriptor) -> ApiResult<Value> {
        let span = info_span!(
            "api_request",
            method = %descriptor.method,
            path = %descriptor.path,
            operation = %descriptor.operation
        );

        let start = Instant::now();
        let result = self.execute(&descriptor).instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => "ok".to_string(),
            Err(e) => e
                .http_status()
                .map(|s| s.to_string())
                .unwrap_or_else(|| e.cause().to_string()),
        };
        record_request(&descriptor.operation, &status, latency_ms);

        if let Err(e) = &result {
            error!(
                method = %descriptor.method,
                path = %descriptor.path,
                cause = %e.cause(),
                "API request failed: {}",
                e
            );
        }

        result
    }

    /// Execute a request and deserialize the body into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> ApiResult<T> {
        let path = descriptor.path.clone();
        let value = self.request(descriptor).await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request_json(RequestDescriptor::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request_json(RequestDescriptor::post(path).with_json(body)?)
            .await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request_json(RequestDescriptor::put(path).with_json(body)?)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request_json(RequestDescriptor::delete(path)).await
    }

    /// Fetch raw bytes from an asset URL (a CDN link or generated file).
    ///
    /// Not health-gated and sent without the bearer token: the URL is not the
    /// API base. `kind` names the asset in error messages.
    pub async fn download(&self, url: &str, kind: &str, operation: &str) -> ApiResult<Vec<u8>> {
        let span = info_span!("asset_download", url = %url, operation = %operation);

        let start = Instant::now();
        let result = self.fetch_bytes(url, kind).instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => "ok".to_string(),
            Err(e) => e
                .http_status()
                .map(|s| s.to_string())
                .unwrap_or_else(|| e.cause().to_string()),
        };
        record_request(operation, &status, latency_ms);

        result
    }

    async fn fetch_bytes(&self, url: &str, kind: &str) -> ApiResult<Vec<u8>> {
        Url::parse(url)
            .map_err(|e| ApiError::Config(format!("invalid {} URL {:?}: {}", kind, url, e)))?;

        let timeout = self.config.profile.timeout;
        debug!("Downloading {} from {}", kind, url);

        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http(
                status.as_u16(),
                format!("Failed to download {}: {}", kind, status.as_u16()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;
        Ok(bytes.to_vec())
    }

    async fn execute(&self, descriptor: &RequestDescriptor) -> ApiResult<Value> {
        self.ensure_reachable().await?;

        let timeout = self.config.profile.timeout;
        let url = self.config.profile.url_for(&descriptor.path);

        debug!("Sending {} {}", descriptor.method, url);

        let mut builder = self
            .http
            .request(descriptor.method.into(), &url)
            .timeout(timeout);

        // Multipart bodies get their boundary header from the transport.
        if !descriptor.is_multipart() && !descriptor.has_header(CONTENT_TYPE.as_str()) {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }

        for (name, value) in &descriptor.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(token) = self.config.token_store.token() {
            builder = builder.bearer_auth(token);
        }

        builder = match &descriptor.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(body) => builder.multipart(body.to_form()?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            return Err(ApiError::http(
                status.as_u16(),
                extract_error_message(status.as_u16(), &bytes),
            ));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Consult the health gate; never touches the main endpoint.
    async fn ensure_reachable(&self) -> ApiResult<()> {
        if self.health.should_probe() {
            self.probe().await;
        }

        if self.health.is_reachable() {
            Ok(())
        } else {
            Err(ApiError::backend_unavailable(format!(
                "{} did not pass the health check",
                self.config.profile.base_url
            )))
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, FastAPI validation lists
/// (`{"detail": [{"msg": "..."}]}`), `{"message": "..."}` and `{"error": "..."}`.
pub(crate) fn extract_error_message(status: u16, body: &[u8]) -> String {
    let generic = || format!("HTTP error {}", status);

    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return generic();
    };

    let from_field = |field: &str| -> Option<String> {
        match value.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str).or(item.as_str()))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        }
    };

    from_field("detail")
        .or_else(|| from_field("message"))
        .or_else(|| from_field("error"))
        .unwrap_or_else(generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_string() {
        let msg = extract_error_message(400, br#"{"detail":"Unsupported file type"}"#);
        assert_eq!(msg, "Unsupported file type");
    }

    #[test]
    fn test_extract_validation_list() {
        let body = br#"{"detail":[{"loc":["body","prompt"],"msg":"field required"},{"msg":"too short"}]}"#;
        assert_eq!(extract_error_message(422, body), "field required; too short");
    }

    #[test]
    fn test_extract_fallbacks() {
        assert_eq!(extract_error_message(500, b"<html>oops</html>"), "HTTP error 500");
        assert_eq!(extract_error_message(502, b""), "HTTP error 502");
        assert_eq!(extract_error_message(404, br#"{"detail":""}"#), "HTTP error 404");
        assert_eq!(extract_error_message(409, br#"{"message":"exists"}"#), "exists");
        assert_eq!(extract_error_message(403, br#"{"error":"nope"}"#), "nope");
    }

    #[test]
    fn test_config_defaults() {
        let config = ApiClientConfig::new(EnvironmentProfile::for_environment(
            environment::Environment::Test,
        ));
        assert_eq!(config.health_policy, HealthPolicy::PerRequest);
        assert_eq!(config.probe_timeout, Duration::from_millis(5000));
        assert!(config.token_store.token().is_none());
    }
}
