//! Error types for presence-io

use std::net::SocketAddr;
use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// presence-io error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// ADC pseudo-file could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Channel file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// ADC pseudo-file did not hold a non-negative integer
    #[error("Invalid ADC value in {}: {content:?}", path.display())]
    Parse {
        /// Channel file path
        path: PathBuf,
        /// Raw file contents
        content: String,
    },

    /// UDP socket could not be created
    #[error("Failed to create UDP socket on {addr}: {source}")]
    Socket {
        /// Requested bind address
        addr: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// UDP datagram could not be sent
    #[error("Failed to send to {dest}: {source}")]
    Send {
        /// Destination endpoint
        dest: SocketAddr,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Received datagram is not an `adc,<value>[,<label>]` line
    #[error("Invalid report: {0}")]
    InvalidReport(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
