//! Shared tracing setup for the linkwatch binaries.

mod tracing;

pub use crate::tracing::{LogFormat, init, init_with_level};
