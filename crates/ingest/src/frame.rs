/// Bytes per sensor frame: one id byte followed by a 4-byte value.
pub const FRAME_LEN: usize = 5;

/// One decoded sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub sensor_id: u8,
    /// Big-endian unsigned raw reading.
    pub value:     u32,
}

impl Frame {
    #[must_use]
    pub fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self {
            sensor_id: bytes[0],
            value:     u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
        }
    }
}

/// Reassembles [`Frame`]s from a byte stream that may split frames across
/// reads.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    pending: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `bytes` and return every frame they complete.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Frame> {
        self.pending.extend_from_slice(bytes);

        let complete = self.pending.len() / FRAME_LEN * FRAME_LEN;
        let frames = self.pending[..complete]
            .chunks_exact(FRAME_LEN)
            .map(|c| Frame::from_bytes([c[0], c[1], c[2], c[3], c[4]]))
            .collect();
        self.pending.drain(..complete);
        frames
    }

    /// Bytes buffered towards the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_frame_big_endian() {
        let frame = Frame::from_bytes([3, 0x00, 0x00, 0x01, 0x02]);
        assert_eq!(frame, Frame { sensor_id: 3, value: 258 });
    }

    #[test]
    fn decoder_reassembles_split_frames() {
        let mut dec = FrameDecoder::new();
        assert!(dec.push(&[5, 0, 0]).is_empty());
        assert_eq!(dec.pending(), 3);

        let frames = dec.push(&[0x01, 0x2c, 3, 0, 0, 0, 21, 1]);
        assert_eq!(
            frames,
            vec![
                Frame { sensor_id: 5, value: 300 },
                Frame { sensor_id: 3, value: 21 },
            ]
        );
        assert_eq!(dec.pending(), 1);
    }
}
