use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::checker::{Checker, HttpChecker};
use super::types::{Endpoint, ProbeResult};

/// Monitoring executor - performs individual probes
pub struct MonitoringExecutor {
    checker: Arc<dyn Checker>,
}

impl MonitoringExecutor {
    /// Create an executor probing over HTTP with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self::with_checker(Arc::new(HttpChecker::new(timeout)?)))
    }

    pub fn with_checker(checker: Arc<dyn Checker>) -> Self {
        Self { checker }
    }

    /// Probe one endpoint and announce the outcome.
    ///
    /// Failures are reported and folded into the returned result, never propagated.
    pub async fn probe(&self, endpoint: Endpoint) -> ProbeResult {
        match self.checker.check(&endpoint).await {
            Ok((latency_ms, status_code)) => {
                info!(%endpoint, latency_ms, status_code, "{endpoint} is up!");
                ProbeResult::up(endpoint, latency_ms, status_code)
            }
            Err(e) => {
                warn!(%endpoint, error = %e, "{endpoint} might be down!");
                ProbeResult::down(endpoint, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::types::ProbeStatus;
    use anyhow::anyhow;

    struct FixedChecker(Option<u16>);

    #[async_trait::async_trait]
    impl Checker for FixedChecker {
        async fn check(&self, _endpoint: &Endpoint) -> Result<(u64, Option<u16>)> {
            match self.0 {
                Some(code) => Ok((7, Some(code))),
                None => Err(anyhow!("dns error: no such host")),
            }
        }
    }

    #[tokio::test]
    async fn test_any_status_code_is_up() {
        for code in [200, 301, 404, 500, 503] {
            let executor = MonitoringExecutor::with_checker(Arc::new(FixedChecker(Some(code))));
            let result = executor.probe("http://a.test".into()).await;

            assert_eq!(result.status, ProbeStatus::Up, "status code {code}");
            assert_eq!(result.status_code, Some(code));
            assert_eq!(result.endpoint.as_str(), "http://a.test");
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_down() {
        let executor = MonitoringExecutor::with_checker(Arc::new(FixedChecker(None)));
        let result = executor.probe("http://b.test".into()).await;

        assert_eq!(result.status, ProbeStatus::Down);
        assert_eq!(result.error_message.as_deref(), Some("dns error: no such host"));
    }
}
