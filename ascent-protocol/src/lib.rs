//! Ascent link protocol
//!
//! This crate defines the UART protocol spoken on the watch's two serial
//! links:
//!
//! - **Companion link**: the BLE bridge to the phone app that fetches the
//!   weather. Carries tuple dictionaries ("app messages") in both directions
//!   plus ACK/NACK verdicts for the watch's outbound messages.
//! - **Display link**: one-way draw commands to the display co-processor,
//!   which owns the bitmaps and fonts.
//!
//! # Frame format
//!
//! ```text
//! ┌───────┬────────┬──────┬─────┬─────────────┬───────┐
//! │ START │ LENGTH │ TYPE │ SEQ │ PAYLOAD     │ CRC-8 │
//! │ 1B    │ 1B     │ 1B   │ 1B  │ 0–250B      │ 1B    │
//! └───────┴────────┴──────┴─────┴─────────────┴───────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dictionary;
pub mod draw;
pub mod frame;
pub mod messages;

pub use dictionary::{Dictionary, DictionaryError, DictionaryWriter, Tuple, TupleValue};
pub use draw::{BitmapId, DrawCommand, LabelId, LayerId};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{CompanionFrame, NackReason, WatchMessage};
