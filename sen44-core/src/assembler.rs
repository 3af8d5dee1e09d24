//! Frame assembly from the receive byte stream
//!
//! The transport hands over whatever bytes happen to be buffered when the
//! scheduler ticks. The assembler turns those bytes into candidate response
//! frames for [`ResponseFrame::decode`](crate::ResponseFrame::decode).

use bytes::{Buf, BytesMut};
use tracing::{debug, trace};

use crate::{
    checksum,
    constants::{FRAME_MARKER, RESPONSE_LENGTH},
};

/// Index of the checksum byte within a response frame
const CRC_INDEX: usize = RESPONSE_LENGTH - 2;

/// How drained bytes are grouped into frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssemblyMode {
    /// Everything drained in one tick is one frame
    ///
    /// Only correct when the transport always delivers whole responses
    /// within a single tick.
    PerTick,

    /// Bytes accumulate across ticks; frames are located by marker and length
    #[default]
    Accumulate,
}

/// Groups received bytes into candidate frames
#[derive(Debug, Default)]
pub struct FrameAssembler {
    mode: AssemblyMode,
    buf: BytesMut,
}

impl FrameAssembler {
    /// Create an empty assembler
    pub fn new(mode: AssemblyMode) -> Self {
        Self {
            mode,
            buf: BytesMut::with_capacity(RESPONSE_LENGTH * 2),
        }
    }

    /// Assembly mode in use
    pub fn mode(&self) -> AssemblyMode {
        self.mode
    }

    /// Number of bytes currently held
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Append one received byte
    pub fn push(&mut self, byte: u8) {
        self.buf.extend_from_slice(&[byte]);
    }

    /// Append received bytes
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Drop any partially assembled data
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Take the candidate frames available at the end of a tick
    ///
    /// In [`AssemblyMode::PerTick`] this is the whole buffer (if non-empty).
    /// In [`AssemblyMode::Accumulate`] it is every 26-byte run that starts and
    /// ends with the frame marker; an incomplete tail is kept for the next tick.
    /// A run whose checksum does not match is still handed over, as a copy,
    /// but only its leading byte is consumed so a real frame overlapping it
    /// is found on the next pass.
    pub fn take_frames(&mut self) -> Vec<BytesMut> {
        match self.mode {
            AssemblyMode::PerTick => {
                if self.buf.is_empty() {
                    Vec::new()
                } else {
                    vec![self.buf.split()]
                }
            }
            AssemblyMode::Accumulate => self.scan(),
        }
    }

    fn scan(&mut self) -> Vec<BytesMut> {
        let mut frames = Vec::new();

        loop {
            match self.buf.iter().position(|&b| b == FRAME_MARKER) {
                Some(0) => {}
                Some(skip) => {
                    debug!(
                        "Skipping {} bytes before start marker: {}",
                        skip,
                        hex::encode(&self.buf[..skip])
                    );
                    self.buf.advance(skip);
                }
                None => {
                    if !self.buf.is_empty() {
                        debug!(
                            "Discarding {} bytes without start marker: {}",
                            self.buf.len(),
                            hex::encode(&self.buf)
                        );
                        self.buf.clear();
                    }
                    break;
                }
            }

            if self.buf.len() < RESPONSE_LENGTH {
                trace!("Waiting for more data ({} bytes buffered)", self.buf.len());
                break;
            }

            if self.buf[RESPONSE_LENGTH - 1] != FRAME_MARKER {
                // Marker was not a frame start; resync on the next one
                self.buf.advance(1);
                continue;
            }

            if checksum::verify(&self.buf[1..CRC_INDEX], self.buf[CRC_INDEX]) {
                frames.push(self.buf.split_to(RESPONSE_LENGTH));
            } else {
                debug!("Checksum mismatch at candidate start, resyncing");
                frames.push(BytesMut::from(&self.buf[..RESPONSE_LENGTH]));
                self.buf.advance(1);
            }
        }

        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::frame::ResponseFrame;

    fn frame() -> Vec<u8> {
        ResponseFrame::new([123, 45, 67, 89, 10, 4500, 4500]).encode().to_vec()
    }

    #[test]
    fn test_per_tick_forwards_everything() {
        let mut assembler = FrameAssembler::new(AssemblyMode::PerTick);
        assembler.extend(&[0x01, 0x02, 0x03]);

        let frames = assembler.take_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), &[0x01, 0x02, 0x03]);
        assert_eq!(assembler.buffered(), 0);
    }

    #[test]
    fn test_per_tick_empty() {
        let mut assembler = FrameAssembler::new(AssemblyMode::PerTick);
        assert!(assembler.take_frames().is_empty());
    }

    #[test]
    fn test_per_tick_does_not_span_ticks() {
        let data = frame();
        let mut assembler = FrameAssembler::new(AssemblyMode::PerTick);

        assembler.extend(&data[..10]);
        assert_eq!(assembler.take_frames()[0].len(), 10);

        assembler.extend(&data[10..]);
        assert_eq!(assembler.take_frames()[0].len(), 16);
    }

    #[test]
    fn test_accumulate_whole_frame() {
        let data = frame();
        let mut assembler = FrameAssembler::default();
        assembler.extend(&data);

        let frames = assembler.take_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), data.as_slice());
        assert_eq!(assembler.buffered(), 0);
    }

    #[test]
    fn test_accumulate_split_across_ticks() {
        let data = frame();
        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);

        for &byte in &data[..11] {
            assembler.push(byte);
        }
        assert!(assembler.take_frames().is_empty());
        assert_eq!(assembler.buffered(), 11);

        assembler.extend(&data[11..]);
        let frames = assembler.take_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), data.as_slice());
    }

    #[test]
    fn test_accumulate_skips_leading_garbage() {
        let data = frame();
        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);
        assembler.extend(&[0x00, 0x13, 0x37]);
        assembler.extend(&data);

        let frames = assembler.take_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), data.as_slice());
    }

    #[test]
    fn test_accumulate_resyncs_after_stray_marker() {
        let data = frame();
        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);
        assembler.push(FRAME_MARKER);
        assembler.extend(&data);

        let frames = assembler.take_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), data.as_slice());
    }

    #[test]
    fn test_accumulate_back_to_back_frames() {
        let data = frame();
        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);
        assembler.extend(&data);
        assembler.extend(&data);
        assembler.extend(&data[..5]);

        let frames = assembler.take_frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(assembler.buffered(), 5);
    }

    #[test]
    fn test_accumulate_discards_unmarked_noise() {
        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);
        assembler.extend(&[0x11; 40]);

        assert!(assembler.take_frames().is_empty());
        assert_eq!(assembler.buffered(), 0);
    }

    #[test]
    fn test_accumulate_truncated_frame_keeps_next_one() {
        let data = frame();
        let mut truncated = data.clone();
        truncated.remove(7);

        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);
        assembler.extend(&truncated);
        assembler.extend(&data);

        let valid: Vec<BytesMut> = assembler
            .take_frames()
            .into_iter()
            .filter(|f| ResponseFrame::parse(f).is_ok())
            .collect();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].as_ref(), data.as_slice());
        assert_eq!(assembler.buffered(), 0);
    }

    #[test]
    fn test_accumulate_stray_marker_before_frame_with_marker_checksum() {
        // This word set gives a checksum byte equal to the frame marker
        let data = ResponseFrame::new([123, 45, 67, 89, 10, 4500, 9]).encode().to_vec();
        assert_eq!(data[CRC_INDEX], FRAME_MARKER);

        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);
        assembler.push(FRAME_MARKER);
        assembler.extend(&data);

        let frames = assembler.take_frames();
        assert_eq!(frames.last().map(|f| f.as_ref()), Some(data.as_slice()));
        assert!(ResponseFrame::parse(&frames[frames.len() - 1]).is_ok());
        assert_eq!(assembler.buffered(), 0);
    }

    #[test]
    fn test_clear() {
        let mut assembler = FrameAssembler::new(AssemblyMode::Accumulate);
        assembler.extend(&frame()[..20]);
        assembler.clear();
        assert_eq!(assembler.buffered(), 0);
    }
}
