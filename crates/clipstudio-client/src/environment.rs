//! Environment profile resolution.
//!
//! The deployment mode is a build/start-time signal (`CLIPSTUDIO_ENV`), not
//! user input. Resolution happens once per process and is cached; callers that
//! need a different profile (tests, tools) construct one explicitly and inject
//! it into [`crate::ApiClientConfig`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use tracing::{info, warn};
use url::Url;

/// Environment variable carrying the build mode.
pub const MODE_ENV_VAR: &str = "CLIPSTUDIO_ENV";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV_VAR: &str = "CLIPSTUDIO_API_BASE_URL";

const LOCAL_BASE_URL: &str = "http://localhost:8000";
const PRODUCTION_BASE_URL: &str = "https://api.clipstudio.app";

/// Deployment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    Development,
    Test,
    #[default]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

/// Base URL and timeout policy for one deployment mode. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentProfile {
    pub environment: Environment,
    /// Absolute URL without a trailing slash
    pub base_url: String,
    /// Main request timeout
    pub timeout: Duration,
}

impl EnvironmentProfile {
    /// Built-in profile for a mode.
    pub fn for_environment(environment: Environment) -> Self {
        let (base_url, timeout_ms) = match environment {
            Environment::Development => (LOCAL_BASE_URL, 30_000),
            Environment::Test => (LOCAL_BASE_URL, 10_000),
            Environment::Production => (PRODUCTION_BASE_URL, 30_000),
        };

        Self {
            environment,
            base_url: base_url.to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Resolve from an optional mode signal and base URL override.
    ///
    /// Unknown or missing modes fall back to production. An override that is
    /// not an absolute http(s) URL is ignored.
    pub fn from_signals(mode: Option<&str>, base_url_override: Option<&str>) -> Self {
        let environment = match mode {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to production", e);
                Environment::Production
            }),
            None => Environment::Production,
        };

        let mut profile = Self::for_environment(environment);

        if let Some(raw) = base_url_override.map(str::trim).filter(|s| !s.is_empty()) {
            match normalize_base_url(raw) {
                Some(url) => profile.base_url = url,
                None => warn!(
                    base_url = %raw,
                    "Ignoring {}: not an absolute http(s) URL without query or fragment",
                    BASE_URL_ENV_VAR
                ),
            }
        }

        profile
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let mode = std::env::var(MODE_ENV_VAR).ok();
        let base_url = std::env::var(BASE_URL_ENV_VAR).ok();
        Self::from_signals(mode.as_deref(), base_url.as_deref())
    }

    /// Override the main request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the base URL. Returns `None` if it is not an absolute http(s) URL,
    /// or if it carries a query or fragment.
    pub fn with_base_url(mut self, base_url: &str) -> Option<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Some(self)
    }

    /// Full URL for an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    // Paths are appended verbatim, so a query or fragment would swallow them.
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return None;
    }
    Some(raw.trim_end_matches('/').to_string())
}

static RESOLVED_PROFILE: OnceLock<EnvironmentProfile> = OnceLock::new();

/// Get the process-wide profile, resolving it from the environment on first use.
pub fn resolve() -> &'static EnvironmentProfile {
    RESOLVED_PROFILE.get_or_init(|| {
        let profile = EnvironmentProfile::from_env();
        info!(
            environment = %profile.environment,
            base_url = %profile.base_url,
            timeout_ms = profile.timeout.as_millis() as u64,
            "Resolved API environment"
        );
        profile
    })
}
