//! # sen44
//!
//! Rust driver for the Sensirion SEN44 air quality sensor over UART.
//!
//! ## Features
//!
//! - Validated decoding of measurement frames (length, markers, CRC-8)
//! - PM1.0, PM2.5, PM4.0, PM10.0, VOC index, humidity and temperature
//! - Optional per-channel sinks
//! - Tokio-driven polling loop, or drive it from your own scheduler
//!
//! ## Quick Start
//!
//! ```no_run
//! use sen44::{Channel, Sen44, SerialTransport};
//!
//! #[tokio::main]
//! async fn main() -> sen44::Result<()> {
//!     let mut transport = SerialTransport::new("/dev/ttyUSB0");
//!     transport.open()?;
//!
//!     let mut sensor = Sen44::new(transport)
//!         .with_sink(Channel::Pm2_5, |value: f32| println!("PM2.5: {value} µg/m³"))
//!         .with_sink(Channel::Temperature, |value: f32| println!("T: {value} °C"));
//!
//!     sensor.run().await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod sensor;
pub mod sink;

// Re-exports
pub use error::{Error, Result};
pub use sensor::Sen44;
pub use sink::{Sink, Sinks};

// Re-export protocol and transport types
pub use sen44_core::{AssemblyMode, RequestFrame, ResponseFrame};
pub use sen44_transport::{MemoryHandle, MemoryTransport, SerialTransport, Transport};
pub use sen44_types::{Channel, Measurement};
