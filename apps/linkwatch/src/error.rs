use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Invalid monitor configuration: {0:#}")]
    InvalidConfig(anyhow::Error),
    #[error("Failed to build HTTP client: {0:#}")]
    Client(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}
