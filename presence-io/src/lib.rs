//! presence-io - IIO ADC presence sampler
//!
//! Samples one Linux IIO voltage channel, classifies the raw value against a
//! fixed threshold and streams the result as a CSV line over UDP.
//!
//! - [`sensor`]: IIO sysfs channel reader and the [`sensor::SensorSource`] seam
//! - [`monitor`]: The periodic read-classify-send loop
//! - [`streaming`]: CSV wire format, UDP publisher and listener-side receiver

pub mod config;
pub mod core;
pub mod error;
pub mod monitor;
pub mod sensor;
pub mod streaming;

// Re-export commonly used types
pub use config::Config;
pub use crate::core::types::{Presence, Reading, Report};
pub use error::{Error, Result};
pub use monitor::{CycleOutcome, MonitorConfig, MonitorStats, PresenceMonitor};
