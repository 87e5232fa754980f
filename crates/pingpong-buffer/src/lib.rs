//! Ping-Pong Double Buffer
//!
//! Provides a swap-on-full double buffer that decouples an interrupt-driven
//! byte producer (e.g. a UART rx callback) from a task-level consumer.

mod buffer;
mod error;

pub use buffer::{PingPongBuffer, Region, WriteStatus, DEFAULT_CAPACITY};
pub use error::BufferError;
