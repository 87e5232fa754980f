//! Relay Messages and Protocol Command Bytes

use serde::{Deserialize, Serialize};

/// Command bytes understood by the upstream measurement protocol
pub mod command {
    pub const START_MEASURE: u8 = 0x01;
    pub const STOP_MEASURE: u8 = 0x02;
    pub const SYNC_MEASURE: u8 = 0x03;
    pub const FIND_NWK: u8 = 0x04;
    pub const END_DEVICE: u8 = 0x05;
    pub const CLOSING: u8 = 0x06;
    pub const CLOSE_NWK: u8 = 0x07;
    /// Start-of-frame marker
    pub const DATA_START: u8 = 0x33;
    /// End-of-frame marker
    pub const DATA_END: u8 = 0x55;
}

/// One completed half-buffer handed to the consumer.
///
/// The payload carries its own length, so no out-of-band byte count is
/// needed; a completed region is always a full half-buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialMessage {
    /// Device the bytes arrived on
    pub device: String,
    /// Completed region contents
    pub payload: Vec<u8>,
}

impl SerialMessage {
    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
