//! Link monitoring module
//!
//! - `checker` reaches out to an endpoint
//! - `executor` turns a check into a reported probe result
//! - `scheduler` runs the probe / reschedule loop

pub mod checker;
pub mod executor;
pub mod scheduler;
pub mod types;
pub mod validation;

pub use executor::MonitoringExecutor;
pub use scheduler::{LinkMonitor, MonitorConfig};
pub use types::{Endpoint, ProbeResult, ProbeStatus};
