//! One-time resolution of the original bind implementation.

use std::ffi::CStr;
use std::mem;
use std::sync::OnceLock;

use libc::{c_int, sockaddr, socklen_t};

/// Signature of the platform bind call.
pub type BindFn = unsafe extern "C" fn(c_int, *const sockaddr, socklen_t) -> c_int;

/// Process-wide, write-once slot for the resolved original bind.
///
/// The first caller runs the resolver inside the cell's initializer, so
/// resolution happens exactly once even under concurrent first use and no
/// caller can observe a half-written handle. A failed resolution is cached
/// too: once the loader has reported the symbol missing, every later call
/// fails fast instead of re-querying.
pub struct OriginalBind {
    slot: OnceLock<Option<BindFn>>,
}

impl OriginalBind {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// The resolved handle, looking it up through the dynamic loader on
    /// first use.
    pub fn get(&self) -> Option<BindFn> {
        self.resolve_with(|| unsafe { lookup_next(c"bind") })
    }

    /// Same as [`get`](Self::get) with the loader lookup swapped out; the
    /// resolver runs at most once for the lifetime of the slot.
    pub fn resolve_with(&self, resolver: impl FnOnce() -> Option<BindFn>) -> Option<BindFn> {
        *self.slot.get_or_init(resolver)
    }
}

/// Look up the next definition of `symbol` in dynamic resolution order.
///
/// # Safety
///
/// The symbol, if found, must have the [`BindFn`] signature.
unsafe fn lookup_next(symbol: &CStr) -> Option<BindFn> {
    let addr = libc::dlsym(libc::RTLD_NEXT, symbol.as_ptr());
    if addr.is_null() {
        None
    } else {
        Some(mem::transmute::<*mut libc::c_void, BindFn>(addr))
    }
}
