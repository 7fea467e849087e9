//! Sampling loop: read, classify, send, sleep
//!
//! ```text
//!   ┌──────────┐  ok   ┌─────────────────┐
//!   │   read   │──────▶│ classify + send │──┐
//!   └──────────┘       └─────────────────┘  │
//!     ▲     │ failed                        ▼
//!     │     └──────────────────────▶┌──────────────┐
//!     └─────────────────────────────│ sleep        │
//!                                   └──────────────┘
//! ```
//!
//! The loop has no terminal state of its own; it stops when the shared
//! running flag is cleared (Ctrl-C in the daemon, the test harness in tests).
//! The pause between cycles is sliced so a cleared flag is noticed promptly.

use crate::config::Config;
use crate::core::types::{Presence, Reading};
use crate::sensor::SensorSource;
use crate::streaming::UdpPublisher;
use crate::streaming::wire::encode_report;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep while waiting for the next cycle
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Loop parameters, fixed at construction
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub threshold: u32,
    pub interval: Duration,
}

impl MonitorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            threshold: config.detection.threshold,
            interval: config.timing.interval(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of one sampling cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Report sent
    Sent { value: Reading, presence: Presence },
    /// Sensor could not be read; nothing sent
    ReadFailed,
    /// Report built but the datagram could not be sent
    SendFailed { value: Reading, presence: Presence },
}

/// Per-outcome cycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub cycles: u64,
    pub sent: u64,
    pub read_failures: u64,
    pub send_failures: u64,
}

impl MonitorStats {
    fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::Sent { .. } => self.sent += 1,
            CycleOutcome::ReadFailed => self.read_failures += 1,
            CycleOutcome::SendFailed { .. } => self.send_failures += 1,
        }
    }
}

/// Periodic presence sampler
pub struct PresenceMonitor<S: SensorSource> {
    source: S,
    publisher: UdpPublisher,
    config: MonitorConfig,
}

impl<S: SensorSource> PresenceMonitor<S> {
    pub fn new(source: S, publisher: UdpPublisher, config: MonitorConfig) -> Self {
        Self {
            source,
            publisher,
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one read-classify-send cycle
    ///
    /// Neither a read failure nor a send failure is fatal; both are logged
    /// and reported through the outcome.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let value = match self.source.read() {
            Ok(v) => v,
            Err(e) => {
                log::error!("Sensor read failed: {}", e);
                return CycleOutcome::ReadFailed;
            }
        };

        let presence = Presence::classify(value, self.config.threshold);
        let message = encode_report(value, presence);

        if let Err(e) = self.publisher.send(message.as_bytes()) {
            log::warn!("ADC value: {} (send failed: {})", value, e);
            return CycleOutcome::SendFailed { value, presence };
        }

        log::info!("ADC value: {} (sent: {})", value, message.trim_end());
        match presence {
            Presence::Detected => log::info!(">>> Presenca detectada!"),
            Presence::NotDetected => log::info!("Sem presenca."),
        }

        CycleOutcome::Sent { value, presence }
    }

    /// Sample until `running` is cleared
    pub fn run(&mut self, running: Arc<AtomicBool>) -> MonitorStats {
        log::info!(
            "Sampling {} every {:?} -> {} (threshold {})",
            self.source.describe(),
            self.config.interval,
            self.publisher.destination(),
            self.config.threshold
        );

        let mut stats = MonitorStats::default();

        while running.load(Ordering::Relaxed) {
            let outcome = self.run_cycle();
            stats.record(&outcome);
            log::trace!("Cycle {}: {:?}", stats.cycles, outcome);

            wait_interval(self.config.interval, &running);
        }

        log::info!(
            "Sampler stopped after {} cycles ({} sent, {} read failures, {} send failures)",
            stats.cycles,
            stats.sent,
            stats.read_failures,
            stats.send_failures
        );
        stats
    }
}

/// Sleep for `interval`, returning early once `running` is cleared
fn wait_interval(interval: Duration, running: &AtomicBool) {
    let deadline = Instant::now() + interval;
    while running.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        std::thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}
