//! UDP receiver for presence reports (listener side)
//!
//! Binds a port, waits for datagrams with a short read timeout so callers
//! can re-check their running flag, and hands back the sender address and
//! the trimmed text payload.

use crate::core::types::Reading;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

/// Default listener address (all interfaces, port 5000)
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:5000";

/// Read timeout between running-flag checks
const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Largest datagram we accept; report lines are a few dozen bytes
const MAX_DATAGRAM_SIZE: usize = 1024;

/// Number of values kept by the listener
pub const RECENT_VALUES_CAPACITY: usize = 50;

/// Blocking UDP receiver with a read timeout
pub struct UdpReceiver {
    socket: UdpSocket,
    buffer: Vec<u8>,
}

impl UdpReceiver {
    pub fn bind(addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind(addr).map_err(|source| Error::Socket {
            addr: addr.to_string(),
            source,
        })?;
        socket.set_read_timeout(Some(RECV_TIMEOUT))?;
        Ok(Self {
            socket,
            buffer: vec![0u8; MAX_DATAGRAM_SIZE],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Wait for one datagram
    ///
    /// Returns `Ok(None)` when the timeout elapses with nothing received.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn recv(&mut self) -> Result<Option<(SocketAddr, String)>> {
        match self.socket.recv_from(&mut self.buffer) {
            Ok((n, from)) => {
                let text = String::from_utf8_lossy(&self.buffer[..n]).trim().to_string();
                Ok(Some((from, text)))
            }
            Err(ref e) if is_idle_wakeup(e.kind()) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Errors that only mean "nothing received yet"
///
/// A signal (Ctrl-C) interrupts `recvfrom` on a socket with a read timeout
/// with EINTR even under SA_RESTART.
fn is_idle_wakeup(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
    )
}

/// Rolling window of the most recent reported values
#[derive(Debug, Clone)]
pub struct RecentValues {
    values: VecDeque<Reading>,
    capacity: usize,
}

impl RecentValues {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a value, evicting the oldest once full
    pub fn push(&mut self, value: Reading) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<Reading> {
        self.values.back().copied()
    }

    pub fn min(&self) -> Option<Reading> {
        self.values.iter().copied().min()
    }

    pub fn max(&self) -> Option<Reading> {
        self.values.iter().copied().max()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: u64 = self.values.iter().map(|&v| u64::from(v)).sum();
        Some(sum as f64 / self.values.len() as f64)
    }
}

impl Default for RecentValues {
    fn default() -> Self {
        Self::new(RECENT_VALUES_CAPACITY)
    }
}
