//! LD_PRELOAD shim that logs bind targets and forces address/port reuse.
//!
//! Compiled as a cdylib and loaded into the target process via LD_PRELOAD.
//! The exported `bind` wraps the platform call transparently: the original
//! symbol is resolved once through the dynamic loader, the caller's address
//! record is decoded and logged, SO_REUSEADDR and SO_REUSEPORT are applied
//! when an explicit port on a supported family was requested, and the
//! untouched arguments are then handed to the real implementation, whose
//! return value and errno reach the caller verbatim.

pub mod error;
pub mod event;
pub mod hook;
pub mod logging;
pub mod ops;
pub mod resolve;
pub mod sockaddr;

#[cfg(test)]
mod test_utils;

pub use error::ShimError;
pub use sockaddr::BindTarget;

use libc::{c_int, socklen_t};

use crate::event::BindEvent;
use crate::logging::ShimLogger;
use crate::ops::NativeOps;
use crate::resolve::BindFn;

#[cfg(target_os = "linux")]
fn set_errno(code: c_int) {
    unsafe { *libc::__errno_location() = code };
}

#[cfg(target_os = "macos")]
fn set_errno(code: c_int) {
    unsafe { *libc::__error() = code };
}

/// Wiring between the exported symbol and the core hook: supplies the
/// resolved capability and translates failures into the platform's
/// -1/errno convention.
///
/// # Safety
///
/// As for bind(2): `addr` must be null or point to `addrlen` readable
/// bytes.
unsafe fn run_interposed(
    original: Option<BindFn>,
    log: &ShimLogger,
    sockfd: c_int,
    addr: *const libc::sockaddr,
    addrlen: socklen_t,
) -> c_int {
    let Some(original) = original else {
        // Fail closed: with nothing to delegate to, the call never happens.
        log.record(&BindEvent::ResolveFailed);
        set_errno(ShimError::Unresolved.errno());
        return -1;
    };

    let ops = NativeOps::new(original);
    match hook::hooked_bind(&ops, log, sockfd, addr, addrlen) {
        Ok(rc) => rc,
        Err(err) => {
            set_errno(err.errno());
            -1
        }
    }
}

/// Process-global wiring behind the exported symbol. Compiled out of test
/// builds so the crate's own test binary does not interpose on the sockets
/// its tests create.
#[cfg(not(test))]
mod exported {
    use std::sync::OnceLock;

    use super::*;
    use crate::logging::{Console, Syslog};
    use crate::resolve::OriginalBind;

    /// Write-once handle to the real bind.
    static ORIGINAL_BIND: OriginalBind = OriginalBind::new();

    /// Logger wired on first use: system log plus a stdout stream.
    static LOGGER: OnceLock<ShimLogger> = OnceLock::new();

    fn logger() -> &'static ShimLogger {
        LOGGER.get_or_init(|| ShimLogger::new(vec![Box::new(Syslog), Box::new(Console)]))
    }

    /// Interposed entry point with the exact name and signature of bind(2).
    ///
    /// # Safety
    ///
    /// Invoked by callers of bind(2) under its contract.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn bind(
        sockfd: c_int,
        addr: *const libc::sockaddr,
        addrlen: socklen_t,
    ) -> c_int {
        run_interposed(ORIGINAL_BIND.get(), logger(), sockfd, addr, addrlen)
    }
}
