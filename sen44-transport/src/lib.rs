//! Transport layer for the SEN44 UART protocol
//!
//! Provides byte-level access to the serial link.

pub mod error;
pub mod memory;
pub mod serial;

pub use error::{Error, Result};
pub use memory::{MemoryHandle, MemoryTransport};
pub use serial::SerialTransport;

/// Byte-oriented, non-blocking link to the sensor
pub trait Transport: Send {
    /// Number of received bytes ready to be read without blocking
    fn available(&mut self) -> Result<usize>;

    /// Read one buffered byte
    fn read_byte(&mut self) -> Result<u8>;

    /// Queue bytes for transmission
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Configured link speed, if known
    fn baud_rate(&self) -> Option<u32>;

    /// Human-readable name of the link
    fn name(&self) -> String;
}
