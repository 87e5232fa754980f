//! Byte-Stream Relay
//!
//! Feeds incoming bytes through a ping-pong buffer and forwards each
//! completed region to the registered consumer channel.

use crate::config::SerialConfig;
use crate::error::RelayError;
use crate::message::SerialMessage;
use pingpong_buffer::{PingPongBuffer, WriteStatus};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_serial::{FlowControl, SerialPortBuilderExt, SerialStream};
use tracing::{debug, info, warn};

/// Relay between a serial byte source and a consumer task.
///
/// The consumer is registered per instance, so several ports can be
/// relayed independently, each with its own buffer and channel.
pub struct SerialRelay {
    /// Port configuration
    config: SerialConfig,
    /// Double buffer accumulating incoming bytes
    buffer: PingPongBuffer,
    /// Registered consumer; completed regions are dropped while unset
    consumer: Option<mpsc::Sender<SerialMessage>>,
    /// Completed regions forwarded
    relayed: u64,
    /// Completed regions dropped (no consumer, queue full, consumer gone)
    dropped: u64,
}

impl SerialRelay {
    /// Create a relay with its buffer sized from the configuration
    pub fn new(config: SerialConfig) -> Result<Self, RelayError> {
        let buffer = PingPongBuffer::new(config.rx_buffer_size)?;
        info!(
            "relay for {} ready ({} bytes per region)",
            config.device, config.rx_buffer_size
        );
        Ok(Self {
            config,
            buffer,
            consumer: None,
            relayed: 0,
            dropped: 0,
        })
    }

    /// Register the consumer channel, replacing any previous one.
    ///
    /// Completed regions that arrive while no consumer is registered are
    /// dropped, not queued.
    pub fn register_consumer(&mut self, tx: mpsc::Sender<SerialMessage>) {
        self.consumer = Some(tx);
    }

    /// Feed one received byte.
    ///
    /// When the byte completes a region, the region is copied into a
    /// [`SerialMessage`] and forwarded without blocking, so this is safe
    /// to call from a receive callback. An overflow error propagates to
    /// the caller as backpressure; it cannot occur through this path
    /// alone, since a switch always resets the cursor.
    pub fn on_byte(&mut self, byte: u8) -> Result<(), RelayError> {
        match self.buffer.write(byte)? {
            WriteStatus::Written => Ok(()),
            WriteStatus::Switched => {
                self.forward_completed();
                Ok(())
            }
        }
    }

    fn forward_completed(&mut self) {
        let Some(tx) = &self.consumer else {
            self.dropped += 1;
            warn!(
                "no consumer registered; dropping {} byte region",
                self.buffer.capacity()
            );
            return;
        };

        let msg = SerialMessage {
            device: self.config.device.clone(),
            payload: self.buffer.completed().to_vec(),
        };

        match tx.try_send(msg) {
            Ok(()) => {
                self.relayed += 1;
                debug!("forwarded {} byte region", self.buffer.capacity());
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.dropped += 1;
                warn!("consumer queue full; dropping completed region");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.dropped += 1;
                warn!("consumer channel closed; dropping completed region");
                self.consumer = None;
            }
        }
    }

    /// Relay bytes from `source` until end of stream.
    ///
    /// A partial region at end of stream stays pending in the buffer; it
    /// is not forwarded, matching the full-region-only contract.
    pub async fn run<R>(&mut self, mut source: R) -> Result<(), RelayError>
    where
        R: AsyncRead + Unpin,
    {
        let mut chunk = vec![0u8; self.config.rx_threshold.max(1)];
        loop {
            let n = source.read(&mut chunk).await?;
            if n == 0 {
                info!(
                    "{}: stream ended ({} regions relayed, {} dropped, {} bytes pending)",
                    self.config.device,
                    self.relayed,
                    self.dropped,
                    self.buffer.len()
                );
                return Ok(());
            }
            for &byte in &chunk[..n] {
                self.on_byte(byte)?;
            }
        }
    }

    /// Open the configured serial port for async I/O
    pub fn open(config: &SerialConfig) -> Result<SerialStream, RelayError> {
        let flow = if config.flow_control {
            FlowControl::Hardware
        } else {
            FlowControl::None
        };

        let port = tokio_serial::new(config.device.as_str(), config.baud_rate)
            .flow_control(flow)
            .timeout(Duration::from_millis(config.idle_timeout_ms))
            .open_native_async()?;

        info!("opened {} at {} baud", config.device, config.baud_rate);
        Ok(port)
    }

    /// Write an outbound message to the port, returning the bytes written
    pub async fn send<W>(port: &mut W, bytes: &[u8]) -> Result<usize, RelayError>
    where
        W: AsyncWrite + Unpin,
    {
        port.write_all(bytes).await?;
        Ok(bytes.len())
    }

    /// Completed regions forwarded so far
    pub fn relayed(&self) -> u64 {
        self.relayed
    }

    /// Completed regions dropped so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Bytes pending in the active region
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
