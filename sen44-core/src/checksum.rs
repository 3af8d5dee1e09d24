//! Sensirion CRC-8
//!
//! ```text
//! polynomial: 0x31 (x^8 + x^5 + x^4 + 1)
//! init:       0xFF
//! reflect:    none, MSB first
//! final xor:  none
//! ```
//!
//! Must match the sensor's own computation byte for byte.

use tracing::trace;

use crate::constants::crc::{INIT, POLYNOMIAL};

/// Calculate the CRC-8 of `data`
///
/// # Examples
///
/// ```
/// use sen44_core::checksum;
///
/// assert_eq!(checksum::calculate(&[0xBE, 0xEF]), 0x92);
/// ```
pub fn calculate(data: &[u8]) -> u8 {
    let mut crc = INIT;

    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }

    trace!(
        len = data.len(),
        checksum = format!("0x{:02X}", crc),
        "Calculated CRC-8"
    );

    crc
}

/// Verify checksum
pub fn verify(data: &[u8], expected: u8) -> bool {
    calculate(data) == expected
}
