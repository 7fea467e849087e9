//! Sensor sources for the sampling loop

use crate::core::types::Reading;
use crate::error::Result;

mod iio;
mod mock;

pub use iio::IioAdc;
pub use mock::MockSensor;

/// A source of raw ADC readings
///
/// Every call must sample live state; implementations do not cache.
pub trait SensorSource: Send {
    /// Take one reading
    ///
    /// Failures are returned to the caller, which decides whether to skip
    /// the current cycle.
    fn read(&mut self) -> Result<Reading>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}
