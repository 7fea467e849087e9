//! End-to-end tests: sysfs channel file -> sampling loop -> UDP datagrams

use presence_io::Presence;
use presence_io::config::Config;
use presence_io::error::Error;
use presence_io::monitor::{CycleOutcome, MonitorConfig, PresenceMonitor};
use presence_io::sensor::{IioAdc, SensorSource};
use presence_io::streaming::{UdpPublisher, UdpReceiver, decode_report};
use std::fs;
use std::net::{SocketAddr, UdpSocket};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn channel_file(root: &Path) -> PathBuf {
    let dir = root.join("iio:device0");
    fs::create_dir_all(&dir).unwrap();
    dir.join("in_voltage13_raw")
}

fn loopback_receiver() -> (UdpSocket, SocketAddr) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_millis(500)))
        .unwrap();
    let addr = socket.local_addr().unwrap();
    (socket, addr)
}

fn recv_text(socket: &UdpSocket) -> Option<String> {
    let mut buf = [0u8; 128];
    socket
        .recv_from(&mut buf)
        .ok()
        .map(|(n, _)| String::from_utf8_lossy(&buf[..n]).into_owned())
}

fn monitor(root: &Path, dest: SocketAddr) -> PresenceMonitor<IioAdc> {
    let publisher = UdpPublisher::bind("127.0.0.1:0", dest).unwrap();
    let config = MonitorConfig {
        threshold: 60_000,
        interval: Duration::from_millis(20),
    };
    PresenceMonitor::new(IioAdc::new(root, 0, 13), publisher, config)
}

#[test]
fn detected_scenario() {
    let dir = TempDir::new().unwrap();
    fs::write(channel_file(dir.path()), "65000\n").unwrap();
    let (receiver, dest) = loopback_receiver();

    let mut monitor = monitor(dir.path(), dest);
    monitor.run_cycle();

    assert_eq!(
        recv_text(&receiver).as_deref(),
        Some("adc,65000,presenca detectada\n")
    );
}

#[test]
fn not_detected_scenario() {
    let dir = TempDir::new().unwrap();
    fs::write(channel_file(dir.path()), "100\n").unwrap();
    let (receiver, dest) = loopback_receiver();

    let mut monitor = monitor(dir.path(), dest);
    monitor.run_cycle();

    assert_eq!(
        recv_text(&receiver).as_deref(),
        Some("adc,100,sem presenca\n")
    );
}

#[test]
fn missing_device_file_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let (receiver, dest) = loopback_receiver();

    let mut sensor = IioAdc::new(dir.path(), 0, 13);
    assert!(matches!(sensor.read(), Err(Error::Read { .. })));

    let mut monitor = monitor(dir.path(), dest);
    assert_eq!(monitor.run_cycle(), CycleOutcome::ReadFailed);
    assert_eq!(recv_text(&receiver), None);
}

#[test]
fn loop_tracks_live_value_and_stops_on_flag() {
    let dir = TempDir::new().unwrap();
    let file = channel_file(dir.path());
    fs::write(&file, "100\n").unwrap();
    let (receiver, dest) = loopback_receiver();

    let mut monitor = monitor(dir.path(), dest);
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    let handle = thread::spawn(move || monitor.run(r));

    let first = recv_text(&receiver).expect("first report");
    assert_eq!(first, "adc,100,sem presenca\n");

    fs::write(&file, "61000\n").unwrap();
    let mut saw_detected = false;
    for _ in 0..200 {
        match recv_text(&receiver) {
            Some(text) if text == "adc,61000,presenca detectada\n" => {
                saw_detected = true;
                break;
            }
            Some(_) => continue,
            None => break,
        }
    }
    assert!(saw_detected);

    running.store(false, Ordering::Relaxed);
    let stats = handle.join().unwrap();
    assert!(stats.sent >= 2);
    assert_eq!(stats.read_failures, 0);
}

#[test]
fn listener_decodes_sender_output() {
    let dir = TempDir::new().unwrap();
    fs::write(channel_file(dir.path()), "65000").unwrap();

    let mut receiver = UdpReceiver::bind("127.0.0.1:0").unwrap();
    let dest = receiver.local_addr().unwrap();

    let mut monitor = monitor(dir.path(), dest);
    monitor.run_cycle();

    let (_, text) = receiver.recv().unwrap().expect("report");
    let report = decode_report(&text).unwrap();
    assert_eq!(report.value, 65000);
    assert_eq!(report.presence(), Some(Presence::Detected));
}

#[test]
fn config_file_drives_channel_path() {
    let dir = TempDir::new().unwrap();
    let toml = format!(
        "[sensor]\nsysfs_root = {:?}\ndevice = 2\nchannel = 5\n",
        dir.path().display().to_string()
    );
    let config = Config::from_toml_str(&toml).unwrap();
    let sensor = IioAdc::from_config(&config.sensor);
    assert_eq!(
        sensor.path(),
        dir.path().join("iio:device2").join("in_voltage5_raw")
    );
}

#[test]
fn socket_failure_exits_with_status_1() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("presence-io.toml");
    // TEST-NET-3 address is never assigned to a local interface
    fs::write(
        &config_path,
        "[network]\ndestination = \"127.0.0.1:5000\"\nbind_address = \"203.0.113.1:0\"\n",
    )
    .unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_presence-io"))
        .arg("--config")
        .arg(&config_path)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}
