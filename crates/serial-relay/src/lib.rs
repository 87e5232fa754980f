//! Serial Relay
//!
//! Bridges a UART byte stream into completed half-buffer messages for a
//! downstream consumer task. Bytes are accumulated in a ping-pong buffer;
//! each time a region fills, its contents are forwarded to the registered
//! consumer over a bounded channel.

mod config;
mod error;
mod message;
mod relay;

pub use config::SerialConfig;
pub use error::RelayError;
pub use message::{command, SerialMessage};
pub use relay::SerialRelay;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
