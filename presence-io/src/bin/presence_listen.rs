//! presence-listen - console receiver for presence-io reports
//!
//! Binds a UDP port, prints every datagram with its source, and keeps
//! running statistics over the last 50 reported values.

use clap::Parser;
use presence_io::error::{Error, Result};
use presence_io::streaming::udp_receiver::DEFAULT_LISTEN_ADDRESS;
use presence_io::streaming::{RecentValues, UdpReceiver, decode_report};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Parser, Debug)]
#[command(name = "presence-listen", version, about = "Receive presence-io reports")]
struct Args {
    /// Local address to listen on
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDRESS)]
    bind: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let mut receiver = UdpReceiver::bind(&args.bind)?;
    log::info!("Waiting for reports on {} ...", receiver.local_addr()?);

    let mut window = RecentValues::default();

    while running.load(Ordering::Relaxed) {
        let Some((from, message)) = receiver.recv()? else {
            continue;
        };
        log::info!("Packet from {}: {}", from, message);

        match decode_report(&message) {
            Ok(report) => {
                window.push(report.value);
                if let (Some(min), Some(max), Some(mean)) =
                    (window.min(), window.max(), window.mean())
                {
                    log::info!(
                        "  last {}: min {} max {} mean {:.1}",
                        window.len(),
                        min,
                        max,
                        mean
                    );
                }
            }
            Err(e) => log::debug!("  not a report: {}", e),
        }
    }

    log::info!("Shutting down listener");
    Ok(())
}
