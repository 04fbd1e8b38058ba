//! Shared fixtures for unit tests.

use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex};

use crate::event::Severity;
use crate::logging::{LogSink, ShimLogger};

/// Sink that stores every line it accepts, optionally restricted to one
/// severity.
pub struct CaptureSink {
    only: Option<Severity>,
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl CaptureSink {
    pub fn pair(only: Option<Severity>) -> (Box<Self>, Arc<Mutex<Vec<(Severity, String)>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (
            Box::new(Self {
                only,
                lines: Arc::clone(&lines),
            }),
            lines,
        )
    }
}

impl LogSink for CaptureSink {
    fn enabled(&self, severity: Severity) -> bool {
        self.only.map_or(true, |wanted| wanted == severity)
    }

    fn write(&self, severity: Severity, line: &str) {
        self.lines.lock().unwrap().push((severity, line.to_string()));
    }
}

/// Logger with a single all-severity capture sink.
pub fn capture_logger() -> (ShimLogger, Arc<Mutex<Vec<(Severity, String)>>>) {
    let (sink, lines) = CaptureSink::pair(None);
    (ShimLogger::new(vec![sink]), lines)
}

pub fn v4_record(ip: [u8; 4], port: u16) -> libc::sockaddr_in {
    let mut sa: libc::sockaddr_in = unsafe { mem::zeroed() };
    sa.sin_family = libc::AF_INET as libc::sa_family_t;
    sa.sin_port = port.to_be();
    sa.sin_addr.s_addr = u32::from(Ipv4Addr::from(ip)).to_be();
    sa
}

pub fn v6_record(ip: Ipv6Addr, port: u16) -> libc::sockaddr_in6 {
    let mut sa: libc::sockaddr_in6 = unsafe { mem::zeroed() };
    sa.sin6_family = libc::AF_INET6 as libc::sa_family_t;
    sa.sin6_port = port.to_be();
    sa.sin6_addr.s6_addr = ip.octets();
    sa
}
