//! In-memory transport
//!
//! Stands in for a serial port in tests and simulations. The transport side
//! is handed to the driver; the [`MemoryHandle`] side plays the sensor.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use sen44_core::constants::BAUD_RATE;

use crate::{error::*, Transport};

#[derive(Debug, Default)]
struct Link {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    writes: usize,
}

/// Transport backed by in-process queues
#[derive(Debug)]
pub struct MemoryTransport {
    link: Arc<Mutex<Link>>,
    baud_rate: Option<u32>,
}

/// Sensor-side handle of a [`MemoryTransport`]
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    link: Arc<Mutex<Link>>,
}

impl MemoryTransport {
    /// Create new in-memory transport reporting the sensor's baud rate
    pub fn new() -> Self {
        Self {
            link: Arc::new(Mutex::new(Link::default())),
            baud_rate: Some(BAUD_RATE),
        }
    }

    /// Set the reported baud rate
    pub fn with_baud_rate(mut self, baud_rate: Option<u32>) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Get a handle to the other end of the link
    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            link: Arc::clone(&self.link),
        }
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryTransport {
    fn available(&mut self) -> Result<usize> {
        Ok(self.link.lock().rx.len())
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.link.lock().rx.pop_front().ok_or(Error::NoData)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        trace!("Writing {} bytes: {:02X?}", data.len(), data);

        let mut link = self.link.lock();
        link.tx.extend_from_slice(data);
        link.writes += 1;
        Ok(())
    }

    fn baud_rate(&self) -> Option<u32> {
        self.baud_rate
    }

    fn name(&self) -> String {
        "memory".to_string()
    }
}

impl MemoryHandle {
    /// Make bytes available for the driver to read
    pub fn inject(&self, data: &[u8]) {
        self.link.lock().rx.extend(data.iter().copied());
    }

    /// Bytes injected but not yet read
    pub fn pending(&self) -> usize {
        self.link.lock().rx.len()
    }

    /// Take everything the driver has written so far
    pub fn take_written(&self) -> Vec<u8> {
        std::mem::take(&mut self.link.lock().tx)
    }

    /// Number of `write_all` calls made by the driver
    pub fn write_count(&self) -> usize {
        self.link.lock().writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_read_injected() {
        let mut transport = MemoryTransport::new();
        let handle = transport.handle();

        assert_eq!(transport.available().unwrap(), 0);
        handle.inject(&[0x7E, 0x01]);

        assert_eq!(transport.available().unwrap(), 2);
        assert_eq!(transport.read_byte().unwrap(), 0x7E);
        assert_eq!(transport.read_byte().unwrap(), 0x01);
        assert_eq!(handle.pending(), 0);
    }

    #[test]
    fn test_memory_read_empty() {
        let mut transport = MemoryTransport::new();
        assert!(matches!(transport.read_byte(), Err(Error::NoData)));
    }

    #[test]
    fn test_memory_write() {
        let mut transport = MemoryTransport::new();
        let handle = transport.handle();

        transport.write_all(&[1, 2, 3]).unwrap();
        transport.write_all(&[4]).unwrap();

        assert_eq!(handle.write_count(), 2);
        assert_eq!(handle.take_written(), vec![1, 2, 3, 4]);
        assert!(handle.take_written().is_empty());
    }

    #[test]
    fn test_memory_baud_rate() {
        assert_eq!(MemoryTransport::new().baud_rate(), Some(115_200));
        assert_eq!(MemoryTransport::new().with_baud_rate(None).baud_rate(), None);
    }
}
