//! Serial Port Configuration

use serde::{Deserialize, Serialize};

/// Configuration for a relayed serial port
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial device path (e.g. "/dev/ttyUSB0" or "COM3")
    pub device: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Bytes per half-buffer; one consumer message per completed region
    pub rx_buffer_size: usize,
    /// Read chunk size for the port loop
    pub rx_threshold: usize,
    /// Idle time after a byte before a port read times out (ms)
    pub idle_timeout_ms: u64,
    /// Hardware flow control (RTS/CTS)
    pub flow_control: bool,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: "/dev/ttyUSB0".to_string(),
            baud_rate: 38_400,
            rx_buffer_size: 128,
            rx_threshold: 64,
            idle_timeout_ms: 6,
            flow_control: false,
        }
    }
}
