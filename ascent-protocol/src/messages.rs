//! Message types for the companion link
//!
//! - Companion → watch: app messages (tuple dictionaries) and the
//!   companion's ACK/NACK verdict on the watch's last outbound message
//! - Watch → companion: weather requests
//!
//! Verdicts name the outbound sequence number in their payload, not the
//! frame header: ACK is `[seq]`, NACK is `[seq][reason]`.

use crate::dictionary::{keys, Dictionary, DictionaryError, DictionaryWriter};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: companion → watch
pub const MSG_APP_MESSAGE: u8 = 0x01;
pub const MSG_ACK: u8 = 0x02;
pub const MSG_NACK: u8 = 0x03;

// Message type IDs: watch → companion
pub const MSG_WEATHER_REQUEST: u8 = 0x10;

/// Why the companion refused an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackReason {
    /// Companion still processing a previous message
    Busy,
    /// Phone app not running or not reachable
    NotConnected,
    /// Companion gave up waiting for the phone
    Timeout,
    /// Companion could not decode the message
    Malformed,
    /// Reason byte this firmware does not know
    Other(u8),
}

impl NackReason {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => NackReason::Busy,
            0x02 => NackReason::NotConnected,
            0x03 => NackReason::Timeout,
            0x04 => NackReason::Malformed,
            other => NackReason::Other(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            NackReason::Busy => 0x01,
            NackReason::NotConnected => 0x02,
            NackReason::Timeout => 0x03,
            NackReason::Malformed => 0x04,
            NackReason::Other(byte) => byte,
        }
    }
}

/// Frames parsed from the companion link
#[derive(Debug, Clone, Copy)]
pub enum CompanionFrame<'a> {
    /// Tuple dictionary pushed by the companion
    AppMessage { seq: u8, dictionary: Dictionary<'a> },
    /// Outbound message `seq` was delivered
    Ack { seq: u8 },
    /// Outbound message `seq` was refused
    Nack { seq: u8, reason: NackReason },
}

impl<'a> CompanionFrame<'a> {
    /// Parse a companion frame
    ///
    /// The dictionary of an app message is not validated here; decoding
    /// it reports malformed tuples.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_APP_MESSAGE => Ok(CompanionFrame::AppMessage {
                seq: frame.seq,
                dictionary: Dictionary::new(&frame.payload),
            }),
            MSG_ACK => {
                let seq = *frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                Ok(CompanionFrame::Ack { seq })
            }
            MSG_NACK => {
                let [seq, reason] = frame.payload[..] else {
                    return Err(FrameError::InvalidFrame);
                };
                Ok(CompanionFrame::Nack {
                    seq,
                    reason: NackReason::from_byte(reason),
                })
            }
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this frame (companion side, or for testing)
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            CompanionFrame::AppMessage { dictionary, .. } => {
                Frame::new(MSG_APP_MESSAGE, seq, dictionary.as_bytes())
            }
            CompanionFrame::Ack { seq: acked } => Frame::new(MSG_ACK, seq, &[*acked]),
            CompanionFrame::Nack { seq: refused, reason } => {
                Frame::new(MSG_NACK, seq, &[*refused, reason.to_byte()])
            }
        }
    }
}

/// Messages from the watch to the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchMessage<'a> {
    /// Ask the companion to fetch the weather
    ///
    /// An empty key is left out of the dictionary.
    WeatherRequest { api_key: &'a str },
}

impl<'a> WatchMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            WatchMessage::WeatherRequest { api_key } => {
                let mut dict = DictionaryWriter::<MAX_PAYLOAD_SIZE>::new();
                if !api_key.is_empty() {
                    dict.push_str(keys::API_KEY, api_key)
                        .map_err(|_| FrameError::PayloadTooLarge)?;
                }
                Frame::new(MSG_WEATHER_REQUEST, seq, dict.as_bytes())
            }
        }
    }

    /// Parse a watch message (companion side, or for testing)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_WEATHER_REQUEST => {
                let dict = Dictionary::new(&frame.payload);
                let api_key = dict
                    .find(keys::API_KEY)
                    .map_err(|_: DictionaryError| FrameError::InvalidFrame)?
                    .and_then(|tuple| tuple.value.as_str())
                    .unwrap_or("");
                Ok(WatchMessage::WeatherRequest { api_key })
            }
            _ => Err(FrameError::InvalidFrame),
        }
    }
}
