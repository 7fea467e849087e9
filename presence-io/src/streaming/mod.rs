//! UDP streaming for presence reports

pub mod udp_publisher;
pub mod udp_receiver;
pub mod wire;

pub use udp_publisher::UdpPublisher;
pub use udp_receiver::{RecentValues, UdpReceiver};
pub use wire::{decode_report, encode_report};
