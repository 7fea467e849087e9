//! UDP publisher for presence reports
//!
//! Fire-and-forget unicast to one fixed destination. The socket is bound
//! once at startup; the destination is stored at construction and never
//! changes. There is no acknowledgement and no retry: a failed send is
//! reported to the caller and the next cycle simply sends again.

use crate::error::{Error, Result};
use std::net::{SocketAddr, UdpSocket};

/// UDP sender bound to a fixed destination
pub struct UdpPublisher {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpPublisher {
    /// Create the sending socket
    ///
    /// This is the only fatal network failure: without a socket the daemon
    /// cannot do anything useful.
    pub fn bind(bind_address: &str, destination: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(bind_address).map_err(|source| Error::Socket {
            addr: bind_address.to_string(),
            source,
        })?;
        Ok(Self::new(socket, destination))
    }

    /// Wrap an already-bound socket
    pub fn new(socket: UdpSocket, destination: SocketAddr) -> Self {
        Self {
            socket,
            destination,
        }
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Send one payload as a single datagram
    pub fn send(&self, payload: &[u8]) -> Result<usize> {
        self.socket
            .send_to(payload, self.destination)
            .map_err(|source| Error::Send {
                dest: self.destination,
                source,
            })
    }
}
