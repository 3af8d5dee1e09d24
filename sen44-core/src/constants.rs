//! Protocol constants

use std::time::Duration;

/// Start and end marker of every frame
pub const FRAME_MARKER: u8 = 0x7E;

/// Length of a measurement request frame
pub const REQUEST_LENGTH: usize = 8;

/// Length of a measurement response frame
pub const RESPONSE_LENGTH: usize = 26;

/// Link speed expected by the sensor (8N1)
pub const BAUD_RATE: u32 = 115_200;

/// Default interval between measurement requests
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Default interval between receive drains
pub const DEFAULT_LOOP_INTERVAL: Duration = Duration::from_millis(16);

/// CRC-8 parameters (Sensirion)
pub mod crc {
    /// Generator polynomial x^8 + x^5 + x^4 + 1
    pub const POLYNOMIAL: u8 = 0x31;

    /// Initial register value
    pub const INIT: u8 = 0xFF;
}
