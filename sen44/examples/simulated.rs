//! Drive the decoder against an in-memory sensor (no hardware needed)

use std::time::Duration;

use sen44::{Channel, MemoryTransport, RequestFrame, ResponseFrame, Sen44};
use tokio::time::sleep;

#[tokio::main]
async fn main() -> sen44::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let transport = MemoryTransport::new();
    let sensor_side = transport.handle();

    let mut sensor = Sen44::new(transport)
        .with_update_interval(Duration::from_millis(500))
        .with_sink(Channel::Pm2_5, |value: f32| println!("PM2.5: {value:.1} µg/m³"))
        .with_sink(Channel::Humidity, |value: f32| println!("RH:    {value:.2} %"))
        .with_sink(Channel::Temperature, |value: f32| println!("T:     {value:.2} °C"));

    // Answer every request with a slowly warming room, split in two chunks
    let responder = tokio::spawn(async move {
        let mut temperature: u16 = 4400;
        loop {
            sleep(Duration::from_millis(50)).await;

            let written = sensor_side.take_written();
            for _ in written.chunks(RequestFrame::BYTES.len()) {
                let frame = ResponseFrame::new([123, 45, 67, 89, 10, 4500, temperature]).encode();
                sensor_side.inject(&frame[..10]);
                sleep(Duration::from_millis(20)).await;
                sensor_side.inject(&frame[10..]);
                temperature += 20;
            }
        }
    });

    sensor.run_until(sleep(Duration::from_secs(3))).await;
    responder.abort();

    Ok(())
}
