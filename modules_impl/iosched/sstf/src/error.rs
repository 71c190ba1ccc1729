//! # Error Types
//!
//! Errors reported by the elevator to the block layer.
//!
//! Only two conditions are recoverable errors: failing to allocate the
//! per-device state at init, and submitting a request that is already
//! queued. An empty queue at dispatch is not an error, and a non-empty queue
//! at teardown is fatal (see [`SstfScheduler::teardown`]).
//!
//! [`SstfScheduler::teardown`]: crate::SstfScheduler::teardown

use core::fmt;

use crate::request::RequestId;

/// Result type for elevator operations
pub type SchedResult<T> = Result<T, SchedError>;

/// Elevator error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// Allocation of scheduler state failed
    OutOfMemory,
    /// The request is already in the queue
    AlreadyQueued(RequestId),
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "Out of memory allocating elevator state"),
            Self::AlreadyQueued(id) => write!(f, "Request {id} is already queued"),
        }
    }
}

impl From<alloc::collections::TryReserveError> for SchedError {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

impl From<hashbrown::TryReserveError> for SchedError {
    fn from(_: hashbrown::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let s = alloc::format!("{}", SchedError::AlreadyQueued(42));
        assert!(s.contains("42"));

        let s = alloc::format!("{}", SchedError::OutOfMemory);
        assert!(s.contains("memory"));
    }

    #[test]
    fn test_error_conversion() {
        let err: SchedError = hashbrown::TryReserveError::CapacityOverflow.into();
        assert_eq!(err, SchedError::OutOfMemory);

        let mut v: alloc::vec::Vec<u64> = alloc::vec::Vec::new();
        let reserve = v.try_reserve(usize::MAX).unwrap_err();
        let err: SchedError = reserve.into();
        assert_eq!(err, SchedError::OutOfMemory);
    }
}
