//! Relay Error Types

use pingpong_buffer::BufferError;
use thiserror::Error;

/// Errors that can occur while relaying serial data
#[derive(Debug, Error)]
pub enum RelayError {
    /// Double-buffer failure (construction or overflow backpressure)
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(String),

    /// I/O error on the byte stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio_serial::Error> for RelayError {
    fn from(err: tokio_serial::Error) -> Self {
        RelayError::Serial(err.to_string())
    }
}
