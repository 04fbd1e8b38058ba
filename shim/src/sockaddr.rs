//! Bounds-checked decoding of the generic socket address passed to bind.

use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};
use std::ptr;

use libc::{sockaddr, socklen_t};

/// A bind target, tagged by address family.
///
/// Only IPv4 and IPv6 are decoded; everything else keeps its raw family code
/// and is logged as unsupported without being treated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindTarget {
    V4(SocketAddrV4),
    V6(SocketAddrV6),
    Other(u16),
}

impl BindTarget {
    /// Requested port in host byte order, for supported families.
    pub fn port(&self) -> Option<u16> {
        match self {
            BindTarget::V4(addr) => Some(addr.port()),
            BindTarget::V6(addr) => Some(addr.port()),
            BindTarget::Other(_) => None,
        }
    }

    /// True when the target carries an explicit, non-ephemeral port.
    pub fn requests_fixed_port(&self) -> bool {
        matches!(self.port(), Some(port) if port != 0)
    }
}

/// End of the family discriminant within the generic record. Not just its
/// size: BSD layouts place `sa_len` in front of `sa_family`.
const FAMILY_FIELD_END: usize =
    mem::offset_of!(sockaddr, sa_family) + mem::size_of::<libc::sa_family_t>();

/// Decode the address record handed to bind into a [`BindTarget`].
///
/// Each family is read only after checking that `len` covers the full
/// family-specific record; a record too short for its claimed family falls
/// back to `Other` instead of being partially decoded. This never fails:
/// malformed input degrades to the unsupported branch and the real bind
/// gets to reject it.
///
/// # Safety
///
/// `addr` must be null or point to at least `len` readable bytes.
pub unsafe fn decode(addr: *const sockaddr, len: socklen_t) -> BindTarget {
    if addr.is_null() || (len as usize) < FAMILY_FIELD_END {
        return BindTarget::Other(libc::AF_UNSPEC as u16);
    }
    // The record may sit at any alignment, so the discriminant is read the
    // same way as the family-specific structs below.
    let family = ptr::addr_of!((*addr).sa_family).read_unaligned();
    match family as libc::c_int {
        libc::AF_INET if (len as usize) >= mem::size_of::<libc::sockaddr_in>() => {
            let v4: libc::sockaddr_in = (addr as *const libc::sockaddr_in).read_unaligned();
            let ip = Ipv4Addr::from(u32::from_be(v4.sin_addr.s_addr));
            let port = u16::from_be(v4.sin_port);
            BindTarget::V4(SocketAddrV4::new(ip, port))
        }
        libc::AF_INET6 if (len as usize) >= mem::size_of::<libc::sockaddr_in6>() => {
            let v6: libc::sockaddr_in6 = (addr as *const libc::sockaddr_in6).read_unaligned();
            let ip = Ipv6Addr::from(v6.sin6_addr.s6_addr);
            let port = u16::from_be(v6.sin6_port);
            // flowinfo and scope_id are stored in native byte order.
            BindTarget::V6(SocketAddrV6::new(
                ip,
                port,
                v6.sin6_flowinfo,
                v6.sin6_scope_id,
            ))
        }
        _ => BindTarget::Other(family as u16),
    }
}
