//! Concurrent link monitor: probes a fixed set of endpoints forever, re-checking
//! each one a fixed delay after its previous probe reported back.

pub mod config;
pub mod error;
pub mod monitoring;

pub use error::{AppError, MonitorError};
pub use monitoring::{Endpoint, LinkMonitor, MonitorConfig, ProbeResult, ProbeStatus};
