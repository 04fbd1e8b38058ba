//! Multi-sink logger for hook events.
//!
//! One capability, many sinks: every event is formatted once and offered to
//! each configured sink, so the system log and the human-readable stream
//! always carry identical content. Sinks opt out per severity; the stdout
//! stream only carries informational traffic while errors stay on the
//! system log.

use std::ffi::CString;
use std::io::{self, Write};

use crate::event::{BindEvent, Severity};

/// A destination for formatted log lines.
pub trait LogSink: Send + Sync {
    /// Whether this sink wants events of the given severity.
    fn enabled(&self, severity: Severity) -> bool {
        let _ = severity;
        true
    }

    /// Write one formatted line.
    fn write(&self, severity: Severity, line: &str);
}

/// The hook's logging capability.
pub struct ShimLogger {
    sinks: Vec<Box<dyn LogSink>>,
}

impl ShimLogger {
    pub fn new(sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self { sinks }
    }

    /// Format `event` once and hand it to every interested sink.
    pub fn record(&self, event: &BindEvent) {
        let severity = event.severity();
        let line = event.to_string();
        for sink in &self.sinks {
            if sink.enabled(severity) {
                sink.write(severity, &line);
            }
        }
    }
}

/// System log sink, writing through `syslog(3)`.
pub struct Syslog;

impl LogSink for Syslog {
    fn write(&self, severity: Severity, line: &str) {
        let priority = match severity {
            Severity::Info => libc::LOG_INFO,
            Severity::Error => libc::LOG_ERR,
        };
        // The line is passed as a formatting argument so stray percent
        // signs in it cannot reach syslog's formatter.
        if let Ok(message) = CString::new(line) {
            unsafe { libc::syslog(priority, c"%s".as_ptr(), message.as_ptr()) };
        }
    }
}

/// Human-readable stdout stream. Informational lines only; errors belong to
/// the system log or stderr.
pub struct Console;

impl LogSink for Console {
    fn enabled(&self, severity: Severity) -> bool {
        severity == Severity::Info
    }

    fn write(&self, _severity: Severity, line: &str) {
        // Ignore write failures: the host process owns stdout and may have
        // closed it.
        let _ = writeln!(io::stdout().lock(), "{line}");
    }
}
