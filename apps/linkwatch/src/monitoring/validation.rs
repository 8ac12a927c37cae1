//! Validation of monitor configuration before the loop starts.

use anyhow::{Result, anyhow};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use super::scheduler::MonitorConfig;
use super::types::Endpoint;

const MIN_INTERVAL: Duration = Duration::from_millis(1);
const MAX_INTERVAL: Duration = Duration::from_secs(86400); // 24 hours
const MIN_TIMEOUT: Duration = Duration::from_millis(1);
const MAX_TIMEOUT: Duration = Duration::from_secs(300); // 5 minutes

/// Validate everything a [`MonitorConfig`] carries
pub fn validate_monitor_config(config: &MonitorConfig) -> Result<()> {
    validate_endpoints(&config.endpoints)?;
    validate_check_interval(config.interval)?;
    validate_timeout(config.timeout)
}

/// At least one endpoint, each a valid HTTP(S) URL, no duplicates
pub fn validate_endpoints(endpoints: &[Endpoint]) -> Result<()> {
    if endpoints.is_empty() {
        return Err(anyhow!("No endpoints configured"));
    }

    let mut seen = HashSet::with_capacity(endpoints.len());
    for endpoint in endpoints {
        validate_endpoint(endpoint)?;
        if !seen.insert(endpoint) {
            return Err(anyhow!("Duplicate endpoint: {}", endpoint));
        }
    }

    Ok(())
}

/// Validate a single HTTP/HTTPS endpoint
pub fn validate_endpoint(endpoint: &Endpoint) -> Result<()> {
    let url = Url::parse(endpoint.as_str())
        .map_err(|e| anyhow!("Invalid URL {}: {}", endpoint, e))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(anyhow!("Unsupported scheme for {}: {}", endpoint, other)),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(anyhow!("Endpoint has no host: {}", endpoint));
    }

    if let Some(port) = url.port() {
        validate_port(port)?;
    }

    Ok(())
}

fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        return Err(anyhow!("Port 0 is not valid"));
    }
    Ok(())
}

/// Validate the delay between probes of one endpoint
pub fn validate_check_interval(interval: Duration) -> Result<()> {
    if interval < MIN_INTERVAL {
        return Err(anyhow!("Check interval must be greater than zero"));
    }

    if interval > MAX_INTERVAL {
        return Err(anyhow!(
            "Check interval too long: {:?} (maximum: {:?})",
            interval,
            MAX_INTERVAL
        ));
    }

    Ok(())
}

/// Validate the request timeout
pub fn validate_timeout(timeout: Duration) -> Result<()> {
    if timeout < MIN_TIMEOUT {
        return Err(anyhow!("Timeout must be greater than zero"));
    }

    if timeout > MAX_TIMEOUT {
        return Err(anyhow!("Timeout too long: {:?} (maximum: {:?})", timeout, MAX_TIMEOUT));
    }

    Ok(())
}
