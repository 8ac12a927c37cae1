use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monitored target address.
///
/// Endpoints are created once from configuration and only ever cloned, so the
/// address lives behind an `Arc<str>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(Arc<str>);

impl Endpoint {
    pub fn new(address: impl Into<Arc<str>>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Endpoint {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Up,
    Down,
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Up => write!(f, "up"),
            ProbeStatus::Down => write!(f, "down"),
        }
    }
}

/// Result signal sent by a probe task once it has checked its endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Endpoint that was probed
    pub endpoint: Endpoint,

    /// When the probe finished
    pub checked_at: DateTime<Utc>,

    /// Up when any response came back, down on transport failure
    pub status: ProbeStatus,

    /// Response time in milliseconds
    pub latency_ms: Option<u64>,

    /// HTTP status code of the response, informational only
    pub status_code: Option<u16>,

    /// Transport error (if the probe failed)
    pub error_message: Option<String>,
}

impl ProbeResult {
    pub fn up(endpoint: Endpoint, latency_ms: u64, status_code: Option<u16>) -> Self {
        Self {
            endpoint,
            checked_at: Utc::now(),
            status: ProbeStatus::Up,
            latency_ms: Some(latency_ms),
            status_code,
            error_message: None,
        }
    }

    pub fn down(endpoint: Endpoint, error: String) -> Self {
        Self {
            endpoint,
            checked_at: Utc::now(),
            status: ProbeStatus::Down,
            latency_ms: None,
            status_code: None,
            error_message: Some(error),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == ProbeStatus::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_displays_its_address() {
        let endpoint = Endpoint::from("http://golang.org");
        assert_eq!(endpoint.to_string(), "http://golang.org");
        assert_eq!(endpoint.as_str(), "http://golang.org");
    }

    #[test]
    fn endpoint_serializes_as_plain_string() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            endpoint: Endpoint,
        }

        let encoded = toml::to_string(&Wrapper { endpoint: "http://amazon.com".into() }).unwrap();
        assert_eq!(encoded.trim(), r#"endpoint = "http://amazon.com""#);

        let decoded: Wrapper = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.endpoint, Endpoint::from("http://amazon.com"));
    }

    #[test]
    fn constructors_set_status() {
        let up = ProbeResult::up("http://a.test".into(), 12, Some(500));
        assert!(up.is_up());
        assert_eq!(up.status_code, Some(500));
        assert_eq!(up.latency_ms, Some(12));

        let down = ProbeResult::down("http://b.test".into(), "connection refused".into());
        assert_eq!(down.status, ProbeStatus::Down);
        assert_eq!(down.error_message.as_deref(), Some("connection refused"));
        assert!(down.latency_ms.is_none());
    }
}
