//! The platform-call capability behind the hook.
//!
//! The core procedure never touches `setsockopt` or the resolved symbol
//! directly; it goes through [`BindOps`] so tests can swap in a recording
//! fake and run the whole hook without a live loader or real sockets.

use std::fmt;
use std::io;
use std::mem;

use libc::{c_int, sockaddr, socklen_t};

use crate::resolve::BindFn;

/// The two reuse options the hook forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReuseOption {
    Address,
    Port,
}

impl ReuseOption {
    /// Application order: address reuse first, then port reuse.
    pub const ORDER: [ReuseOption; 2] = [ReuseOption::Address, ReuseOption::Port];

    pub fn name(self) -> &'static str {
        match self {
            ReuseOption::Address => "SO_REUSEADDR",
            ReuseOption::Port => "SO_REUSEPORT",
        }
    }

    fn raw(self) -> c_int {
        match self {
            ReuseOption::Address => libc::SO_REUSEADDR,
            ReuseOption::Port => libc::SO_REUSEPORT,
        }
    }
}

impl fmt::Display for ReuseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Platform calls needed by the hook.
pub trait BindOps {
    /// Enable `option` on the descriptor.
    fn set_reuse(&self, fd: c_int, option: ReuseOption) -> io::Result<()>;

    /// Invoke the underlying bind with the caller's untouched arguments.
    ///
    /// # Safety
    ///
    /// `addr` and `len` must describe an address record as accepted by
    /// bind(2).
    unsafe fn bind(&self, fd: c_int, addr: *const sockaddr, len: socklen_t) -> c_int;
}

/// Real capability: `setsockopt(2)` plus the loader-resolved original bind.
pub struct NativeOps {
    original: BindFn,
}

impl NativeOps {
    pub fn new(original: BindFn) -> Self {
        Self { original }
    }
}

impl BindOps for NativeOps {
    fn set_reuse(&self, fd: c_int, option: ReuseOption) -> io::Result<()> {
        let enabled: c_int = 1;
        let rc = unsafe {
            libc::setsockopt(
                fd,
                libc::SOL_SOCKET,
                option.raw(),
                &enabled as *const c_int as *const libc::c_void,
                mem::size_of::<c_int>() as socklen_t,
            )
        };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    unsafe fn bind(&self, fd: c_int, addr: *const sockaddr, len: socklen_t) -> c_int {
        (self.original)(fd, addr, len)
    }
}
