//! The per-call interposition procedure.

use std::io::{self, Write};

use libc::{c_int, sockaddr, socklen_t};

use crate::error::ShimError;
use crate::event::BindEvent;
use crate::logging::ShimLogger;
use crate::ops::{BindOps, ReuseOption};

/// Run the hook for one bind call.
///
/// A single linear procedure: decode the target, log it, force the reuse
/// options when an explicit port on a supported family was requested, then
/// delegate with the caller's untouched arguments. `Ok` carries the
/// original implementation's return value with its errno left as-is; the
/// only `Err` produced here is an option failure, which aborts before the
/// original call is ever reached.
///
/// # Safety
///
/// As for bind(2): `addr` must be null or point to `addrlen` readable
/// bytes, and the arguments are forwarded to the underlying implementation
/// unchanged.
pub unsafe fn hooked_bind(
    ops: &impl BindOps,
    log: &ShimLogger,
    sockfd: c_int,
    addr: *const sockaddr,
    addrlen: socklen_t,
) -> Result<c_int, ShimError> {
    let target = crate::sockaddr::decode(addr, addrlen);
    let pid = std::process::id();

    log.record(&BindEvent::Request {
        pid,
        fd: sockfd,
        target,
    });

    if target.requests_fixed_port() {
        force_reuse(ops, sockfd)?;
        log.record(&BindEvent::ReuseApplied { pid, fd: sockfd });
    }

    Ok(ops.bind(sockfd, addr, addrlen))
}

/// Apply both reuse options in their fixed order, stopping at the first
/// failure.
fn force_reuse(ops: &impl BindOps, fd: c_int) -> Result<(), ShimError> {
    for option in ReuseOption::ORDER {
        if let Err(source) = ops.set_reuse(fd, option) {
            let err = ShimError::Reuse { option, source };
            let _ = writeln!(io::stderr().lock(), "{err}");
            return Err(err);
        }
    }
    Ok(())
}
