use std::{fmt, fs, io, path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MonitorError;
use crate::monitoring::scheduler::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, MonitorConfig};
use crate::monitoring::validation::validate_monitor_config;
use crate::monitoring::types::Endpoint;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    ReadFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    WriteFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to parse {path}: {source}")]
    ParseFailed { path: path::PathBuf, source: toml::de::Error },
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: Monitor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitor {
    pub endpoints: Vec<Endpoint>,
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

impl Default for Monitor {
    fn default() -> Self {
        let defaults = MonitorConfig::default();
        Self {
            endpoints: defaults.endpoints,
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let write_2 = write_indented(2);

        writeln!(f, "Current Monitor Configuration:")?;
        write_title_1(f, "Monitor")?;
        write_1(f, "Interval (ms)", &self.monitor.interval_ms)?;
        write_1(f, "Timeout (ms)", &self.monitor.timeout_ms)?;
        write_1(f, "Endpoints", &self.monitor.endpoints.len())?;
        for (index, endpoint) in self.monitor.endpoints.iter().enumerate() {
            write_2(f, &format!("#{}", index + 1), endpoint)?;
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Writes the default config to `path` (with a `.toml` extension) if no
    /// file exists there yet.
    ///
    /// ```no_run
    /// let cfg = linkwatch::config::Config::from_config("linkwatch.toml")?;
    /// println!("{}", cfg);
    /// # Ok::<(), linkwatch::config::Error>(())
    /// ```
    pub fn from_config(path: impl AsRef<path::Path>) -> Result<Self, Error> {
        let config_path = normalize_toml_path(path.as_ref());

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| Error::ReadFailed { path: config_path.clone(), source })?;
            toml::from_str(raw_string.as_str())
                .map_err(|source| Error::ParseFailed { path: config_path, source })
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::WriteFailed { path: parent.to_path_buf(), source })?;
        }

        fs::write(path, config_str)
            .map_err(|source| Error::WriteFailed { path: path.to_path_buf(), source })
    }

    /// Runtime settings for the link monitor
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            endpoints: self.monitor.endpoints.clone(),
            interval: Duration::from_millis(self.monitor.interval_ms),
            timeout: Duration::from_millis(self.monitor.timeout_ms),
        }
    }

    /// Runtime settings for the link monitor, rejected if they could not run
    pub fn validated_monitor_config(&self) -> Result<MonitorConfig, MonitorError> {
        let config = self.monitor_config();
        validate_monitor_config(&config).map_err(MonitorError::InvalidConfig)?;
        Ok(config)
    }
}
