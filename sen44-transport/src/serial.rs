//! Serial port transport
//!
//! The SEN44 talks 115200 baud, 8 data bits, no parity, one stop bit.

use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, trace};

use sen44_core::constants::BAUD_RATE;

use crate::{error::*, Transport};

/// Serial port transport for the SEN44
pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    timeout: Duration,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Create new serial transport (not yet opened)
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: BAUD_RATE,
            timeout: Duration::from_millis(10),
            port: None,
        }
    }

    /// Set baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set per-byte read/write timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Open the port
    pub fn open(&mut self) -> Result<()> {
        if self.port.is_some() {
            return Ok(());
        }

        debug!("Opening {} at {} baud...", self.path, self.baud_rate);

        let port = serialport::new(&self.path, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.timeout)
            .open()?;

        debug!("Opened {}", self.path);

        self.port = Some(port);
        Ok(())
    }

    /// Close the port
    pub fn close(&mut self) {
        if self.port.take().is_some() {
            debug!("Closed {}", self.path);
        }
    }

    /// Check if open
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn port(&mut self) -> Result<&mut (dyn SerialPort + 'static)> {
        self.port.as_deref_mut().ok_or(Error::NotOpen)
    }
}

impl Transport for SerialTransport {
    fn available(&mut self) -> Result<usize> {
        let n = self.port()?.bytes_to_read()?;
        Ok(n as usize)
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.port()?.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        trace!("Sending {} bytes: {:02X?}", data.len(), data);

        let port = self.port()?;
        port.write_all(data)?;
        port.flush()?;
        Ok(())
    }

    fn baud_rate(&self) -> Option<u32> {
        Some(self.baud_rate)
    }

    fn name(&self) -> String {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_transport_create() {
        let transport = SerialTransport::new("/dev/ttyUSB0");
        assert!(!transport.is_open());
        assert_eq!(transport.baud_rate(), Some(115_200));
        assert_eq!(transport.name(), "/dev/ttyUSB0");
    }

    #[test]
    fn test_serial_transport_not_open() {
        let mut transport = SerialTransport::new("/dev/ttyUSB0");
        assert!(matches!(transport.available(), Err(Error::NotOpen)));
        assert!(matches!(transport.read_byte(), Err(Error::NotOpen)));
        assert!(matches!(transport.write_all(&[0x7E]), Err(Error::NotOpen)));
    }

    #[test]
    fn test_serial_transport_missing_port() {
        let mut transport = SerialTransport::new("/dev/sen44-does-not-exist")
            .with_timeout(Duration::from_millis(1));

        assert!(transport.open().is_err());
        assert!(!transport.is_open());
    }
}
