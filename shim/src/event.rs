//! Structured log events emitted by the bind hook.

use std::fmt;

use libc::c_int;

use crate::sockaddr::BindTarget;

/// Severity of a logged event, mapped by each sink onto its own levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// One loggable occurrence inside the hook.
///
/// Formatting lives here so every sink emits identical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindEvent {
    /// A bind call was observed; carries the decoded target.
    Request {
        pid: u32,
        fd: c_int,
        target: BindTarget,
    },
    /// Both reuse options were applied to the descriptor.
    ReuseApplied { pid: u32, fd: c_int },
    /// The dynamic loader could not provide the original bind.
    ResolveFailed,
}

impl BindEvent {
    pub fn severity(&self) -> Severity {
        match self {
            BindEvent::Request { .. } | BindEvent::ReuseApplied { .. } => Severity::Info,
            BindEvent::ResolveFailed => Severity::Error,
        }
    }
}

impl fmt::Display for BindEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindEvent::Request { pid, fd, target } => match target {
                BindTarget::V4(addr) => write!(
                    f,
                    "Hooked bind: PID={pid}, FD={fd}, IP={}, Port={}",
                    addr.ip(),
                    addr.port()
                ),
                BindTarget::V6(addr) => write!(
                    f,
                    "Hooked bind: PID={pid}, FD={fd}, IP={}, Port={}",
                    addr.ip(),
                    addr.port()
                ),
                BindTarget::Other(family) => write!(
                    f,
                    "Hooked bind: PID={pid}, FD={fd}, Family={family} (unsupported)"
                ),
            },
            BindEvent::ReuseApplied { pid, fd } => {
                write!(f, "Hooked bind: PID={pid}, FD={fd}, setsockopt SO_REUSEPORT")
            }
            BindEvent::ResolveFailed => write!(f, "Failed to find original bind function"),
        }
    }
}
