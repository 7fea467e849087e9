//! Linux IIO ADC channel read through sysfs
//!
//! The kernel exposes each voltage channel as a pseudo-file holding the
//! latest raw conversion:
//!
//! ```text
//! /sys/bus/iio/devices/iio:device0/in_voltage13_raw
//! ```
//!
//! Reading the file triggers a fresh conversion, so the file is reopened on
//! every sample.

use super::SensorSource;
use crate::config::SensorConfig;
use crate::core::types::Reading;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One ADC channel of an IIO device
#[derive(Debug, Clone)]
pub struct IioAdc {
    path: PathBuf,
}

impl IioAdc {
    /// Channel `channel` of `iio:device<device>` under `sysfs_root`
    pub fn new(sysfs_root: impl AsRef<Path>, device: u32, channel: u32) -> Self {
        let path = sysfs_root
            .as_ref()
            .join(format!("iio:device{}", device))
            .join(format!("in_voltage{}_raw", channel));
        Self { path }
    }

    pub fn from_config(config: &SensorConfig) -> Self {
        Self::new(&config.sysfs_root, config.device, config.channel)
    }

    /// Path of the raw value file, fixed at construction
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SensorSource for IioAdc {
    fn read(&mut self) -> Result<Reading> {
        let content = fs::read_to_string(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_raw(&content).ok_or_else(|| Error::Parse {
            path: self.path.clone(),
            content,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// First whitespace-delimited token as an unsigned integer
fn parse_raw(content: &str) -> Option<Reading> {
    content.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_channel(root: &Path, device: u32, channel: u32, content: &str) {
        let dir = root.join(format!("iio:device{}", device));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("in_voltage{}_raw", channel)), content).unwrap();
    }

    #[test]
    fn test_path_layout() {
        let adc = IioAdc::new("/sys/bus/iio/devices", 0, 13);
        assert_eq!(
            adc.path(),
            Path::new("/sys/bus/iio/devices/iio:device0/in_voltage13_raw")
        );

        let adc = IioAdc::from_config(&SensorConfig::default());
        assert_eq!(
            adc.path(),
            Path::new("/sys/bus/iio/devices/iio:device0/in_voltage13_raw")
        );
    }

    #[test]
    fn test_reads_raw_value() {
        let dir = TempDir::new().unwrap();
        write_channel(dir.path(), 0, 13, "65000\n");

        let mut adc = IioAdc::new(dir.path(), 0, 13);
        assert_eq!(adc.read().unwrap(), 65000);
    }

    #[test]
    fn test_every_read_is_fresh() {
        let dir = TempDir::new().unwrap();
        write_channel(dir.path(), 1, 2, "100\n");

        let mut adc = IioAdc::new(dir.path(), 1, 2);
        assert_eq!(adc.read().unwrap(), 100);

        write_channel(dir.path(), 1, 2, "61000\n");
        assert_eq!(adc.read().unwrap(), 61000);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut adc = IioAdc::new(dir.path(), 0, 13);

        match adc.read() {
            Err(Error::Read { path, .. }) => assert_eq!(path, adc.path()),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_content() {
        let dir = TempDir::new().unwrap();

        for content in ["", "\n", "abc", "-1", "12.5"] {
            write_channel(dir.path(), 0, 0, content);
            let mut adc = IioAdc::new(dir.path(), 0, 0);
            assert!(
                matches!(adc.read(), Err(Error::Parse { .. })),
                "content {:?} should not parse",
                content
            );
        }
    }

    #[test]
    fn test_parse_raw() {
        assert_eq!(parse_raw("  42  \n"), Some(42));
        assert_eq!(parse_raw("0"), Some(0));
        assert_eq!(parse_raw("123 456"), Some(123));
        assert_eq!(parse_raw("65535\n"), Some(65535));
        assert_eq!(parse_raw("x1"), None);
    }
}
