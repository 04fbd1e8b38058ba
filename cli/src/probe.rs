//! Double-bind probe.
//!
//! Binds the same address twice without setting any socket options itself.
//! Whether the second bind succeeds therefore reveals whether something
//! else, such as the reuse-forcing shim loaded via LD_PRELOAD, applied
//! SO_REUSEADDR/SO_REUSEPORT to both sockets.

use std::fmt;
use std::io;
use std::net::{SocketAddr, TcpListener, UdpSocket};

use anyhow::{Context, Result};
use log::debug;

/// Socket flavor to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Udp,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Udp => "udp",
        }
    }
}

/// What the second bind attempt revealed.
#[derive(Debug)]
pub enum Outcome {
    /// The second bind took the same explicit address: reuse was forced on
    /// from outside.
    Reusable { addr: SocketAddr },
    /// The second bind was refused; the address stays exclusively owned.
    Exclusive { addr: SocketAddr, error: io::Error },
    /// Port 0 requested: the kernel hands out distinct ports and reuse
    /// never comes into play.
    Ephemeral {
        first: SocketAddr,
        second: SocketAddr,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reusable { addr } => {
                write!(f, "reuse active: second bind on {addr} succeeded")
            }
            Outcome::Exclusive { addr, error } => {
                write!(f, "reuse inactive: second bind on {addr} failed ({error})")
            }
            Outcome::Ephemeral { first, second } => {
                write!(f, "ephemeral request: kernel assigned {first} and {second}")
            }
        }
    }
}

enum ProbeSocket {
    Tcp(TcpListener),
    Udp(UdpSocket),
}

impl ProbeSocket {
    fn bind(transport: Transport, addr: SocketAddr) -> io::Result<Self> {
        match transport {
            Transport::Tcp => TcpListener::bind(addr).map(Self::Tcp),
            Transport::Udp => UdpSocket::bind(addr).map(Self::Udp),
        }
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        match self {
            ProbeSocket::Tcp(listener) => listener.local_addr(),
            ProbeSocket::Udp(socket) => socket.local_addr(),
        }
    }
}

/// Bind `addr` twice and report what the second attempt revealed. The
/// first socket stays open while the second bind runs.
pub fn run(transport: Transport, addr: SocketAddr) -> Result<Outcome> {
    let first = ProbeSocket::bind(transport, addr)
        .with_context(|| format!("first {} bind to {addr} failed", transport.as_str()))?;
    let first_addr = first
        .local_addr()
        .context("no local address on the first socket")?;
    debug!("first bind took {first_addr}");

    if addr.port() == 0 {
        let second = ProbeSocket::bind(transport, addr)
            .with_context(|| format!("second {} bind to {addr} failed", transport.as_str()))?;
        let second_addr = second
            .local_addr()
            .context("no local address on the second socket")?;
        return Ok(Outcome::Ephemeral {
            first: first_addr,
            second: second_addr,
        });
    }

    match ProbeSocket::bind(transport, first_addr) {
        Ok(_second) => Ok(Outcome::Reusable { addr: first_addr }),
        Err(error) => Ok(Outcome::Exclusive {
            addr: first_addr,
            error,
        }),
    }
}
