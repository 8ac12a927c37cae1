use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::executor::MonitoringExecutor;
use super::types::{Endpoint, ProbeResult};
use super::validation::validate_monitor_config;
use crate::error::MonitorError;

/// Endpoints probed when no configuration is supplied
pub const DEFAULT_ENDPOINTS: [&str; 4] =
    ["http://google.com", "http://facebook.com", "http://golang.org", "http://amazon.com"];
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity of the observer feed; slow subscribers lag instead of blocking the loop.
const OBSERVER_CAPACITY: usize = 256;

/// Runtime configuration of a [`LinkMonitor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub endpoints: Vec<Endpoint>,
    /// Delay between a probe reporting back and the next probe of the same endpoint
    pub interval: Duration,
    /// Upper bound on a single outbound request
    pub timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.into_iter().map(Endpoint::from).collect(),
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Link monitor - probes every endpoint, then re-probes each one `interval`
/// after its previous result came back.
///
/// Every endpoint owns at most one task at a time, either probing or waiting
/// for its next probe, so re-checks of the same endpoint never overlap.
pub struct LinkMonitor {
    config: MonitorConfig,
    executor: Arc<MonitoringExecutor>,
    observers: broadcast::Sender<ProbeResult>,
}

impl LinkMonitor {
    /// Validate `config` and build a monitor probing over HTTP
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        validate_monitor_config(&config).map_err(MonitorError::InvalidConfig)?;
        let executor = MonitoringExecutor::new(config.timeout).map_err(MonitorError::Client)?;

        Self::with_executor(config, Arc::new(executor))
    }

    /// Validate `config` and build a monitor around an existing executor
    pub fn with_executor(
        config: MonitorConfig,
        executor: Arc<MonitoringExecutor>,
    ) -> Result<Self, MonitorError> {
        validate_monitor_config(&config).map_err(MonitorError::InvalidConfig)?;

        let (observers, _) = broadcast::channel(OBSERVER_CAPACITY);
        Ok(Self { config, executor, observers })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Feed of every result consumed by the monitor loop
    pub fn subscribe(&self) -> broadcast::Receiver<ProbeResult> {
        self.observers.subscribe()
    }

    /// Run until the process is killed
    pub async fn run_forever(&self) {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.run(shutdown_rx).await;
    }

    /// Run until `shutdown` turns `true` or its sender is dropped.
    ///
    /// Outstanding probes and timers are cancelled before this returns.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<ProbeResult>();
        let mut tasks: HashMap<Endpoint, JoinHandle<()>> = HashMap::new();

        for endpoint in &self.config.endpoints {
            if tasks.contains_key(endpoint) {
                continue;
            }
            let handle = self.spawn_probe(endpoint.clone(), None, &result_tx, &shutdown);
            tasks.insert(endpoint.clone(), handle);
        }

        info!(
            endpoints = tasks.len(),
            interval_ms = self.config.interval.as_millis() as u64,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "Link monitor started"
        );

        loop {
            tokio::select! {
                biased;

                _ = wait_for_shutdown(&mut shutdown) => {
                    info!("Shutdown signal received, stopping link monitor");
                    break;
                }

                Some(result) = result_rx.recv() => {
                    let endpoint = result.endpoint.clone();
                    debug!(%endpoint, status = %result.status, "Probe reported, rescheduling");

                    // No subscribers is fine.
                    let _ = self.observers.send(result);

                    let handle = self.spawn_probe(
                        endpoint.clone(),
                        Some(self.config.interval),
                        &result_tx,
                        &shutdown,
                    );
                    if let Some(previous) = tasks.insert(endpoint, handle) {
                        previous.abort();
                    }
                }
            }
        }

        for (_, handle) in tasks.drain() {
            handle.abort();
            let _ = handle.await;
        }

        info!("Link monitor stopped");
    }

    /// Spawn one task that optionally waits `delay`, probes `endpoint` and
    /// sends the result on the coordination channel.
    fn spawn_probe(
        &self,
        endpoint: Endpoint,
        delay: Option<Duration>,
        result_tx: &mpsc::UnboundedSender<ProbeResult>,
        shutdown: &watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let executor = self.executor.clone();
        let result_tx = result_tx.clone();
        let mut shutdown = shutdown.clone();

        tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::select! {
                    biased;
                    _ = wait_for_shutdown(&mut shutdown) => return,
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            let result = tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut shutdown) => return,
                result = executor.probe(endpoint) => result,
            };

            if result_tx.send(result).is_err() {
                debug!("Result channel closed, dropping probe result");
            }
        })
    }
}

/// Resolves once shutdown is requested or can no longer be requested.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
