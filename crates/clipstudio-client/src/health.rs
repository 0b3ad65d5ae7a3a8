//! Backend health gate.
//!
//! Caches a reachability flag so that feature calls fail fast (within the
//! short probe timeout) when the backend is down, instead of each paying the
//! full request timeout.

use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, warn};

use crate::endpoints;
use crate::metrics::record_probe;

/// Fixed timeout for the health probe, independent of the request timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// When the executor re-probes before a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthPolicy {
    /// Probe before every request.
    #[default]
    PerRequest,
    /// Probe before a request only while the last probe succeeded. Once a
    /// probe fails, requests fail fast until an explicit re-probe.
    WhileReachable,
}

impl HealthPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthPolicy::PerRequest => "per-request",
            HealthPolicy::WhileReachable => "while-reachable",
        }
    }
}

impl fmt::Display for HealthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-request" | "per_request" => Ok(HealthPolicy::PerRequest),
            "while-reachable" | "while_reachable" | "sticky" => Ok(HealthPolicy::WhileReachable),
            other => Err(format!("unknown health policy: {}", other)),
        }
    }
}

/// Last known backend reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub reachable: bool,
    /// `None` until the first probe completes
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            reachable: true,
            last_checked_at: None,
        }
    }
}

/// Cached reachability flag plus the probe that refreshes it.
#[derive(Debug)]
pub struct HealthGate {
    policy: HealthPolicy,
    probe_timeout: Duration,
    status: RwLock<HealthStatus>,
}

impl HealthGate {
    pub fn new(policy: HealthPolicy, probe_timeout: Duration) -> Self {
        Self {
            policy,
            probe_timeout,
            status: RwLock::new(HealthStatus::default()),
        }
    }

    pub fn policy(&self) -> HealthPolicy {
        self.policy
    }

    /// Cached flag; never probes.
    pub fn is_reachable(&self) -> bool {
        self.status().reachable
    }

    pub fn status(&self) -> HealthStatus {
        *self.status.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether the executor should probe before its next request.
    pub fn should_probe(&self) -> bool {
        match self.policy {
            HealthPolicy::PerRequest => true,
            HealthPolicy::WhileReachable => self.is_reachable(),
        }
    }

    /// GET the service root and record the outcome. Never fails: any error,
    /// timeout or non-2xx response marks the backend unreachable.
    pub async fn probe(&self, http: &Client, base_url: &str) -> bool {
        let url = format!("{}{}", base_url, endpoints::HEALTH);

        let reachable = match http.get(&url).timeout(self.probe_timeout).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(url = %url, "Backend health probe ok");
                true
            }
            Ok(response) => {
                warn!(
                    url = %url,
                    status = response.status().as_u16(),
                    "Backend health probe failed"
                );
                false
            }
            Err(e) => {
                warn!(url = %url, "Backend is not available, using mock data: {}", e);
                false
            }
        };

        self.record(reachable);
        reachable
    }

    fn record(&self, reachable: bool) {
        let mut status = self.status.write().unwrap_or_else(|e| e.into_inner());
        *status = HealthStatus {
            reachable,
            last_checked_at: Some(Utc::now()),
        };
        record_probe(reachable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_initial_status_is_optimistic() {
        let gate = HealthGate::new(HealthPolicy::PerRequest, PROBE_TIMEOUT);
        assert!(gate.is_reachable());
        assert!(gate.status().last_checked_at.is_none());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("per-request".parse::<HealthPolicy>().unwrap(), HealthPolicy::PerRequest);
        assert_eq!("sticky".parse::<HealthPolicy>().unwrap(), HealthPolicy::WhileReachable);
        assert!("hourly".parse::<HealthPolicy>().is_err());
    }

    #[tokio::test]
    async fn test_probe_success_and_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gate = HealthGate::new(HealthPolicy::PerRequest, PROBE_TIMEOUT);
        let http = Client::new();

        assert!(gate.probe(&http, &server.uri()).await);
        assert!(gate.is_reachable());

        assert!(!gate.probe(&http, &server.uri()).await);
        assert!(!gate.is_reachable());
        assert!(gate.status().last_checked_at.is_some());
    }

    #[tokio::test]
    async fn test_probe_timeout_marks_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let gate = HealthGate::new(HealthPolicy::PerRequest, Duration::from_millis(50));
        assert!(!gate.probe(&Client::new(), &server.uri()).await);
        assert!(!gate.is_reachable());
    }

    #[tokio::test]
    async fn test_while_reachable_stops_probing_after_failure() {
        let gate = HealthGate::new(HealthPolicy::WhileReachable, PROBE_TIMEOUT);
        assert!(gate.should_probe());
        gate.record(false);
        assert!(!gate.should_probe());
        gate.record(true);
        assert!(gate.should_probe());

        let per_request = HealthGate::new(HealthPolicy::PerRequest, PROBE_TIMEOUT);
        per_request.record(false);
        assert!(per_request.should_probe());
    }
}
