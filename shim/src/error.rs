//! Errors that abort a hooked bind before delegation.

use std::io;

use thiserror::Error;

use crate::ops::ReuseOption;

#[derive(Debug, Error)]
pub enum ShimError {
    /// The dynamic loader has no further definition of bind.
    #[error("failed to locate the original bind implementation")]
    Unresolved,

    /// A reuse option could not be applied to the descriptor.
    #[error("setsockopt {option} failed: {source}")]
    Reuse {
        option: ReuseOption,
        source: io::Error,
    },
}

impl ShimError {
    /// errno handed to the caller alongside the -1 return.
    ///
    /// Option failures keep the errno of the failed `setsockopt`, so the
    /// caller sees the real OS error even though the hook reported it on
    /// stderr in between.
    pub fn errno(&self) -> libc::c_int {
        match self {
            ShimError::Unresolved => libc::ENOSYS,
            ShimError::Reuse { source, .. } => source.raw_os_error().unwrap_or(libc::EINVAL),
        }
    }
}
