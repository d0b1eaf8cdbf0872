//! Frame encoding and decoding for both UART links.
//!
//! Frame format:
//! - START (1 byte): 0x7E synchronization byte
//! - LENGTH (1 byte): payload length (0-250)
//! - TYPE (1 byte): message type identifier
//! - SEQ (1 byte): sender's sequence number, echoed by ACK/NACK
//! - PAYLOAD (0-250 bytes): type-specific data
//! - CRC (1 byte): CRC-8 (poly 0x07) over LENGTH, TYPE, SEQ and PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Bytes a frame adds around its payload (START + LENGTH + TYPE + SEQ + CRC)
pub const FRAME_OVERHEAD: usize = 5;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

const CRC8_POLY: u8 = 0x07;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    InvalidChecksum,
    /// Invalid frame structure or unknown message type
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Sequence number
    pub seq: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// CRC-8 with polynomial 0x07, zero init, no reflection
pub fn crc8(data: &[u8]) -> u8 {
    crc8_update(0, data)
}

fn crc8_update(mut crc: u8, data: &[u8]) -> u8 {
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ CRC8_POLY;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

impl Frame {
    /// Create a new frame with the given message type, sequence and payload
    pub fn new(msg_type: u8, seq: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self {
            msg_type,
            seq,
            payload,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8, seq: u8) -> Self {
        Self {
            msg_type,
            seq,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, msg_type: u8, seq: u8, payload: &[u8]) -> u8 {
        crc8_update(crc8(&[length, msg_type, seq]), payload)
    }

    /// Number of bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let end = 4 + self.payload.len();

        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.msg_type;
        buffer[3] = self.seq;
        buffer[4..end].copy_from_slice(&self.payload);
        buffer[end] = Self::checksum(length, self.msg_type, self.seq, &self.payload);

        Ok(frame_len)
    }
}

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
    msg_type: u8,
    seq: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    WaitingForStart,
    WaitingForLength,
    WaitingForType,
    WaitingForSeq,
    ReadingPayload,
    WaitingForChecksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
            expected_length: 0,
            msg_type: 0,
            seq: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
        self.expected_length = 0;
        self.msg_type = 0;
        self.seq = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// The parser resets itself after an error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                // Anything before START is line noise
                if byte == FRAME_START {
                    self.state = ParseState::WaitingForLength;
                }
                Ok(None)
            }
            ParseState::WaitingForLength => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.expected_length = byte;
                self.state = ParseState::WaitingForType;
                Ok(None)
            }
            ParseState::WaitingForType => {
                self.msg_type = byte;
                self.state = ParseState::WaitingForSeq;
                Ok(None)
            }
            ParseState::WaitingForSeq => {
                self.seq = byte;
                self.buffer.clear();
                self.state = if self.expected_length == 0 {
                    ParseState::WaitingForChecksum
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Capacity is MAX_PAYLOAD_SIZE and the length byte was bounded above
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected =
                    Frame::checksum(self.expected_length, self.msg_type, self.seq, &self.buffer);

                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    seq: self.seq,
                    payload: self.buffer.clone(),
                };

                self.reset();
                Ok(Some(frame))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encoded(frame: &Frame) -> std::vec::Vec<u8> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = frame.encode(&mut buffer).unwrap();
        buffer[..len].to_vec()
    }

    /// Feed bytes until the first frame or error
    fn parse_all(parser: &mut FrameParser, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = parser.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    #[test]
    fn test_crc8_check_value() {
        // CRC-8/SMBUS check value
        assert_eq!(crc8(b"123456789"), 0xF4);
        assert_eq!(crc8(&[]), 0);
    }

    #[test]
    fn test_frame_encode_layout() {
        let frame = Frame::new(0x21, 7, &[3, 1]).unwrap();
        let mut buffer = [0u8; 16];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 7);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(buffer[1], 2); // length
        assert_eq!(buffer[2], 0x21); // type
        assert_eq!(buffer[3], 7); // seq
        assert_eq!(&buffer[4..6], &[3, 1]);
        assert_eq!(buffer[6], crc8(&[2, 0x21, 7, 3, 1]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x01, 0, &[0; 8]).unwrap();
        let mut buffer = [0u8; 12];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_parse_encoded_frame() {
        let original = Frame::new(0x01, 42, &[1, 2, 3, 4, 5]).unwrap();
        let encoded = encoded(&original);

        let mut parser = FrameParser::new();
        let parsed = parse_all(&mut parser, &encoded).unwrap().unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_empty_payload() {
        let encoded = encoded(&Frame::empty(0x02, 9));
        assert_eq!(encoded.len(), FRAME_OVERHEAD);

        let mut parser = FrameParser::new();
        let parsed = parse_all(&mut parser, &encoded).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x02);
        assert_eq!(parsed.seq, 9);
        assert!(parsed.payload.is_empty());
    }

    #[test]
    fn test_parser_invalid_checksum() {
        let mut encoded = encoded(&Frame::new(0x01, 0, &[9, 9]).unwrap());
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parse_all(&mut parser, &encoded), Err(FrameError::InvalidChecksum));
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(parser.feed(251), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let encoded = encoded(&Frame::empty(0x02, 1));

        let mut data = vec![0x00, 0xFF, 0x12, 0x34];
        data.extend_from_slice(&encoded);

        let mut parser = FrameParser::new();
        let parsed = parse_all(&mut parser, &data).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x02);
    }

    #[test]
    fn test_parser_recovers_after_error() {
        let good = encoded(&Frame::new(0x01, 3, &[7]).unwrap());
        let mut bad = good.clone();
        let last = bad.len() - 1;
        bad[last] ^= 0x01;

        let mut parser = FrameParser::new();
        assert!(parse_all(&mut parser, &bad).is_err());
        let parsed = parse_all(&mut parser, &good).unwrap().unwrap();
        assert_eq!(parsed.payload.as_slice(), &[7]);
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(
            Frame::new(0x01, 0, &large_payload),
            Err(FrameError::PayloadTooLarge)
        );
    }

    proptest! {
        #[test]
        fn prop_parser_survives_arbitrary_bytes(
            bytes in prop::collection::vec(any::<u8>(), 0..600),
        ) {
            let mut parser = FrameParser::new();
            for byte in bytes {
                let _ = parser.feed(byte);
            }
        }

        #[test]
        fn prop_encoded_frame_parses_back(
            msg_type in any::<u8>(),
            seq in any::<u8>(),
            payload in prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::new(msg_type, seq, &payload).unwrap();

            let mut parser = FrameParser::new();
            let parsed = parse_all(&mut parser, &encoded(&frame)).unwrap();
            prop_assert_eq!(parsed, Some(frame));
        }
    }
}
