//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Every producer feeds the controller through `EVENT_CHANNEL`; the
//! controller's outputs leave through the outbox, the draw queue and the
//! settings save signal.

use ascent_core::config::MAX_RECORD_SIZE;
use ascent_core::state::Event;
use ascent_core::weather::OutboundMessage;
use ascent_protocol::{Frame, NackReason};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;
use portable_atomic::AtomicBool;

/// Channel capacity for controller events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Outbound companion messages in flight at once
const OUTBOX_SIZE: usize = 1;

/// Channel capacity for display frames; holds a full redraw
const DRAW_CHANNEL_SIZE: usize = 16;

/// Encoded settings record
pub type SettingsBlob = Vec<u8, MAX_RECORD_SIZE>;

/// Companion's verdict on an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkVerdict {
    Ack { seq: u8 },
    Nack { seq: u8, reason: NackReason },
}

impl LinkVerdict {
    pub fn seq(&self) -> u8 {
        match self {
            LinkVerdict::Ack { seq } | LinkVerdict::Nack { seq, .. } => *seq,
        }
    }
}

/// Events for the watchface controller
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Outbound companion messages (controller -> companion TX)
pub static OUTBOX: Channel<CriticalSectionRawMutex, OutboundMessage, OUTBOX_SIZE> =
    Channel::new();

/// Set from the moment a message is queued until its verdict arrives
pub static OUTBOX_BUSY: AtomicBool = AtomicBool::new(false);

/// ACK/NACK frames (companion RX -> companion TX)
pub static LINK_VERDICT: Signal<CriticalSectionRawMutex, LinkVerdict> = Signal::new();

/// Encoded draw commands (controller -> display TX)
pub static DRAW_CHANNEL: Channel<CriticalSectionRawMutex, Frame, DRAW_CHANNEL_SIZE> =
    Channel::new();

/// Latest settings record to persist (controller -> persistence)
///
/// Only the newest record matters, so a pending write is overwritten.
pub static SETTINGS_SAVE: Signal<CriticalSectionRawMutex, SettingsBlob> = Signal::new();
