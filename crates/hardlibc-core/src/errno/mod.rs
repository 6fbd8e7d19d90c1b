//! Error taxonomy and the legacy status cell.
//!
//! The primary error channel is the per-call typed `Result` each component
//! returns. The status cell exists for transitional callers written against
//! the C convention of a process-wide last-error slot: every core entry
//! point overwrites it, with 0 on success and a C-style constant on failure,
//! so a caller wanting the value must read it before the next call on the
//! same thread. The cell is thread-local; it is never shared across threads.

use std::cell::Cell;

use thiserror::Error;

thread_local! {
    static ERRNO: Cell<i32> = const { Cell::new(0) };
}

/// C constants recorded in the status cell.
pub const EINVAL: i32 = 22;
pub const ERANGE: i32 = 34;
pub const ENOMEM: i32 = 12;
pub const EIO: i32 = 5;

/// Uniform failure taxonomy shared by all three components.
///
/// A missing match in `lfind` is the non-error `Ok(None)`, not a kind here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Contract violation: zero width, undersized key or table, no spare slot.
    #[error("invalid argument")]
    InvalidArgument,
    /// A value or size exceeds the representable bounds.
    #[error("out of range")]
    Range,
    /// The allocator refused a growth request.
    #[error("allocation failure")]
    AllocationFailure,
    /// A stream fault, including end-of-stream with nothing buffered.
    #[error("stream error")]
    StreamError,
}

impl ErrorKind {
    /// The constant the status cell records for this kind.
    pub fn errno(self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => EINVAL,
            ErrorKind::Range => ERANGE,
            ErrorKind::AllocationFailure => ENOMEM,
            ErrorKind::StreamError => EIO,
        }
    }
}

/// Mapping from a component error into the uniform taxonomy.
pub trait FailureKind {
    fn kind(&self) -> ErrorKind;
}

/// Returns the current thread-local status value.
///
/// Equivalent to reading C `errno` after a call into this crate.
pub fn get_errno() -> i32 {
    ERRNO.get()
}

/// Overwrites the thread-local status value.
pub fn set_errno(value: i32) {
    ERRNO.set(value);
}

/// Records a call outcome in the status cell and passes the result through.
///
/// Success writes 0; failure writes the mapped constant. Every public entry
/// point in this crate returns through here.
pub(crate) fn observe<T, E: FailureKind>(result: Result<T, E>) -> Result<T, E> {
    match &result {
        Ok(_) => set_errno(0),
        Err(err) => set_errno(err.kind().errno()),
    }
    result
}
