//! Buffer Error Types

use thiserror::Error;

/// Errors raised by the ping-pong buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Capacity must be at least one byte per region
    #[error("buffer capacity must be greater than zero")]
    ZeroCapacity,

    /// Memory for a region could not be obtained
    #[error("failed to allocate {bytes} bytes for a buffer region")]
    AllocationFailed { bytes: usize },

    /// Active region is already full; the caller must drain before writing
    #[error("active region full at {capacity} bytes; drain the completed region first")]
    CapacityExceeded { capacity: usize },
}
