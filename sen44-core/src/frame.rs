//! SEN44 UART frame structure and encoding/decoding

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use sen44_types::{Channel, Measurement};

use crate::{
    checksum,
    constants::{FRAME_MARKER, REQUEST_LENGTH, RESPONSE_LENGTH},
    error::{Error, Result},
};

/// Measurement request sent to the sensor
///
/// ```text
/// ┌────────┬──────┬──────┬──────┬──────┬────────┬─────────┐
/// │ Marker │ Addr │ Cmd  │ Len  │ CRC  │ Marker │ Padding │
/// │  0x7E  │ 0x00 │ 0x03 │ 0x01 │ 0xFB │  0x7E  │ 2 bytes │
/// └────────┴──────┴──────┴──────┴──────┴────────┴─────────┘
/// ```
///
/// The frame is constant; the trailing padding is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFrame;

impl RequestFrame {
    /// Wire bytes of the request
    pub const BYTES: [u8; REQUEST_LENGTH] = [
        FRAME_MARKER, 0x00, 0x03, 0x01, 0xFB, FRAME_MARKER, 0x00, 0x00,
    ];

    /// Encode the request
    ///
    /// # Examples
    ///
    /// ```
    /// use sen44_core::RequestFrame;
    ///
    /// let bytes = RequestFrame.encode();
    /// assert_eq!(bytes.len(), 8);
    /// assert_eq!(&bytes[..6], &[0x7E, 0x00, 0x03, 0x01, 0xFB, 0x7E]);
    /// ```
    pub fn encode(&self) -> Bytes {
        Bytes::from_static(&Self::BYTES)
    }
}

/// Measurement response received from the sensor
///
/// # Frame Structure
///
/// ```text
/// ┌────────┬──────────┬────────────────────────────┬─────────┬──────┬────────┐
/// │ Marker │ Reserved │ 7 × u16 big-endian words   │ Unused  │ CRC8 │ Marker │
/// │ [0]    │ [1..=2]  │ [3..=16]                   │[17..=23]│ [24] │ [25]   │
/// └────────┴──────────┴────────────────────────────┴─────────┴──────┴────────┘
/// ```
///
/// The CRC covers bytes `[1..=23]`. Word offsets and scales are listed on
/// [`Channel`].
///
/// # Examples
///
/// ```
/// use sen44_core::ResponseFrame;
///
/// let frame = ResponseFrame::new([123, 45, 67, 89, 10, 4500, 4500]);
/// let encoded = frame.encode();
///
/// let measurement = ResponseFrame::decode(&encoded).unwrap();
/// assert_eq!(measurement.temperature(), 22.5);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    /// Bytes 1 and 2, carried through but not interpreted
    pub reserved: [u8; 2],

    /// Raw channel words, in `Channel::ALL` order
    pub words: [u16; Channel::COUNT],
}

impl ResponseFrame {
    /// Frame length in bytes
    pub const LENGTH: usize = RESPONSE_LENGTH;

    /// Index of the checksum byte
    pub const CRC_INDEX: usize = RESPONSE_LENGTH - 2;

    /// Create a response with zeroed reserved bytes
    pub fn new(words: [u16; Channel::COUNT]) -> Self {
        Self {
            reserved: [0x00, 0x00],
            words,
        }
    }

    /// Raw word for one channel
    pub fn word(&self, channel: Channel) -> u16 {
        self.words[channel.index()]
    }

    /// Scaled readings carried by this frame
    pub fn measurement(&self) -> Measurement {
        Measurement::from_raw(self.words)
    }

    /// Encode the response, computing its checksum
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::LENGTH);

        buf.put_u8(FRAME_MARKER);
        buf.put_slice(&self.reserved);
        for word in self.words {
            buf.put_u16(word);
        }
        buf.put_bytes(0x00, Self::CRC_INDEX - buf.len());

        let crc = checksum::calculate(&buf[1..]);
        buf.put_u8(crc);
        buf.put_u8(FRAME_MARKER);

        buf
    }

    /// Validate a raw frame and extract its fields
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The frame is not exactly 26 bytes
    /// - The first or last byte is not the `0x7E` marker
    /// - The CRC-8 over bytes `[1..=23]` does not match byte 24
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() != Self::LENGTH {
            return Err(Error::FrameLength {
                expected: Self::LENGTH,
                actual: buf.len(),
            });
        }

        let start = buf[0];
        let end = buf[Self::LENGTH - 1];
        if start != FRAME_MARKER || end != FRAME_MARKER {
            return Err(Error::InvalidMarker { start, end });
        }

        let received = buf[Self::CRC_INDEX];
        let expected = checksum::calculate(&buf[1..Self::CRC_INDEX]);
        if expected != received {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        let mut words = [0u16; Channel::COUNT];
        for channel in Channel::ALL {
            let offset = channel.offset();
            words[channel.index()] = BigEndian::read_u16(&buf[offset..offset + 2]);
        }

        Ok(Self {
            reserved: [buf[1], buf[2]],
            words,
        })
    }

    /// Validate a raw frame and decode its readings
    pub fn decode(buf: &[u8]) -> Result<Measurement> {
        Self::parse(buf).map(|frame| frame.measurement())
    }
}

impl fmt::Debug for ResponseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseFrame")
            .field("reserved", &hex::encode(self.reserved))
            .field("words", &self.words)
            .finish()
    }
}

impl fmt::Display for ResponseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResponseFrame[{}]", self.measurement())
    }
}
