//! Scripted sensor for testing

use super::SensorSource;
use crate::core::types::Reading;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Sensor that replays queued readings
///
/// Clones share the same script, so a test can keep a handle after moving
/// the sensor into the loop. An exhausted script yields read errors.
#[derive(Clone, Default)]
pub struct MockSensor {
    inner: Arc<Mutex<MockSensorInner>>,
}

#[derive(Default)]
struct MockSensorInner {
    script: VecDeque<Option<Reading>>,
    reads: usize,
}

impl MockSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reading
    pub fn push_value(&self, value: Reading) {
        self.lock().script.push_back(Some(value));
    }

    /// Queue a failed read
    pub fn push_failure(&self) {
        self.lock().script.push_back(None);
    }

    /// Number of read attempts so far
    pub fn reads(&self) -> usize {
        self.lock().reads
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockSensorInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SensorSource for MockSensor {
    fn read(&mut self) -> Result<Reading> {
        let mut inner = self.lock();
        inner.reads += 1;
        match inner.script.pop_front() {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(Error::Other("scripted read failure".to_string())),
            None => Err(Error::Other("mock sensor script exhausted".to_string())),
        }
    }

    fn describe(&self) -> String {
        "mock sensor".to_string()
    }
}
