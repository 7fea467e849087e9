//! presence-io - IIO ADC presence sampler daemon
//!
//! Reads the configured ADC channel every interval and sends
//! `adc,<value>,<label>` datagrams to the configured receiver.
//!
//! Exits with status 1 if the configuration cannot be loaded or the UDP
//! socket cannot be created.

use clap::Parser;
use presence_io::config::Config;
use presence_io::error::{Error, Result};
use presence_io::monitor::{MonitorConfig, PresenceMonitor};
use presence_io::sensor::IioAdc;
use presence_io::streaming::UdpPublisher;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Parser, Debug)]
#[command(name = "presence-io", version, about = "IIO ADC presence sampler")]
struct Args {
    /// TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            log::info!("Using config: {}", path.display());
            Config::load(path)?
        }
        None => {
            log::info!("No config file given, using built-in defaults");
            Config::default()
        }
    };

    let destination = config.network.destination_addr()?;
    let publisher = UdpPublisher::bind(&config.network.bind_address, destination)
        .inspect_err(|e| log::error!("{}", e))?;
    log::info!("UDP socket bound on {}", publisher.local_addr()?);

    let sensor = IioAdc::from_config(&config.sensor);
    log::info!("ADC channel: {}", sensor.path().display());

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let monitor_config = MonitorConfig::from_config(&config);
    let mut monitor = PresenceMonitor::new(sensor, publisher, monitor_config);
    monitor.run(running);

    log::info!("presence-io stopped");
    Ok(())
}
