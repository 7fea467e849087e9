//! Configuration for presence-io
//!
//! Loads configuration from a TOML file. Every section is optional; missing
//! values fall back to the stock board setup (IIO device 0, channel 13,
//! threshold 60000, destination 192.168.42.10:5000, 2 s interval).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of IIO devices in sysfs
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/bus/iio/devices";

/// Raw ADC value above which presence is reported.
///
/// Opaque constant: applied to the raw channel value as-is, with no
/// assumption about converter bit-width or calibration.
pub const DEFAULT_THRESHOLD: u32 = 60_000;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// ADC channel location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Directory holding `iio:deviceN` entries
    pub sysfs_root: PathBuf,
    /// IIO device index (`iio:device<N>`)
    pub device: u32,
    /// Voltage channel index (`in_voltage<C>_raw`)
    pub channel: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            device: 0,
            channel: 13,
        }
    }
}

/// Presence classification
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Presence is reported for readings strictly above this value
    pub threshold: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// UDP endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Receiver address, `ip:port`
    pub destination: String,
    /// Local bind address for the sending socket
    ///
    /// `0.0.0.0:0` lets the kernel pick an ephemeral port; we only send.
    pub bind_address: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            destination: "192.168.42.10:5000".to_string(),
            bind_address: "0.0.0.0:0".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Parsed destination endpoint, IPv4 only
    pub fn destination_addr(&self) -> Result<SocketAddr> {
        let addr: SocketAddr = self.destination.parse().map_err(|e| {
            Error::InvalidConfig(format!(
                "network.destination {:?}: {}",
                self.destination, e
            ))
        })?;
        if !addr.is_ipv4() {
            return Err(Error::InvalidConfig(format!(
                "network.destination {:?}: must be an IPv4 address",
                self.destination
            )));
        }
        Ok(addr)
    }
}

/// Sampling cadence
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause between sampling cycles in milliseconds
    pub interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { interval_ms: 2000 }
    }
}

impl TimingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Example
    /// ```no_run
    /// use presence_io::config::Config;
    ///
    /// let config = Config::load("/etc/presence-io.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the daemon cannot run with
    pub fn validate(&self) -> Result<()> {
        self.network.destination_addr()?;
        if self.timing.interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "timing.interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
