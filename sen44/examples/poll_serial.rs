//! Poll a SEN44 on a serial port and print every reading

use std::time::Duration;

use sen44::{Channel, Sen44, SerialTransport};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sen44=info")),
        )
        .init();

    // Change to your adapter
    let port = std::env::var("SEN44_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    // Comma-separated channel names, all channels by default
    let channels = match std::env::var("SEN44_CHANNELS") {
        Ok(list) => list
            .split(',')
            .map(str::parse::<Channel>)
            .collect::<Result<Vec<_>, _>>()?,
        Err(_) => Channel::ALL.to_vec(),
    };

    let mut transport = SerialTransport::new(port);
    transport.open()?;

    let mut sensor = Sen44::new(transport).with_update_interval(Duration::from_secs(10));
    for channel in channels {
        sensor = sensor.with_sink(channel, move |value: f32| {
            println!("{:<12} {:>8.2} {}", channel, value, channel.unit());
        });
    }

    println!("Polling, press Ctrl-C to stop");

    sensor
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    Ok(())
}
