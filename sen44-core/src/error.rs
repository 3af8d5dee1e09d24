//! Error types for sen44-core

/// Result type alias for sen44 protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Frame decoding errors
///
/// None of these are fatal: the offending frame is discarded and the next
/// valid frame decodes normally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Frame is not exactly one response long
    #[error("Invalid frame length: expected {expected} bytes, got {actual} bytes")]
    FrameLength {
        expected: usize,
        actual: usize,
    },

    /// Start or end marker missing
    #[error("Invalid start or end byte: start 0x{start:02X}, end 0x{end:02X}")]
    InvalidMarker {
        start: u8,
        end: u8,
    },

    /// CRC-8 verification failed
    #[error("Checksum mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    ChecksumMismatch {
        expected: u8,
        received: u8,
    },
}
