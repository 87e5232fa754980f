//! Serial Relay - Main Entry Point

use serial_relay::{command, init_logging, SerialConfig, SerialRelay};
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Serial Relay v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = SerialConfig::default();
    let mut mock = false;
    for arg in std::env::args().skip(1) {
        if arg == "--mock" {
            mock = true;
        } else {
            config.device = arg;
        }
    }

    let (tx, mut rx) = mpsc::channel(32);
    let mut relay = SerialRelay::new(config.clone())?;
    relay.register_consumer(tx);

    let consumer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            info!("consumed {} bytes from {}", msg.len(), msg.device);
        }
    });

    if mock {
        info!("mock mode: relaying a synthetic measurement frame");
        let frame = mock_frame(config.rx_buffer_size * 2);
        relay.run(frame.as_slice()).await?;
    } else {
        let port = SerialRelay::open(&config)?;
        relay.run(port).await?;
    }

    drop(relay);
    consumer.await?;
    Ok(())
}

/// Build a framed byte sequence like the measurement firmware sends
fn mock_frame(len: usize) -> Vec<u8> {
    let mut frame = Vec::with_capacity(len);
    frame.push(command::DATA_START);
    frame.push(command::START_MEASURE);
    while frame.len() < len - 1 {
        frame.push((frame.len() % 256) as u8);
    }
    frame.push(command::DATA_END);
    frame
}
