//! Events processed by the watchface controller

use ascent_protocol::{FrameError, NackReason};

use crate::display::clock::LocalTime;
use crate::power::BatteryState;
use crate::weather::{InboundBatch, MessageError};

/// Why a companion message did not make it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkFailure {
    /// Companion refused the outbound message
    Nack(NackReason),
    /// No verdict arrived for the outbound message
    AckTimeout,
    /// Inbound frame failed to parse
    Frame(FrameError),
    /// Inbound app message failed to decode
    Malformed(MessageError),
    /// Inbound app message arrived while the event queue was full
    Overflow,
}

/// Events that drive the watchface
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Minute boundary reached
    Tick(LocalTime),
    /// Decoded app message from the companion
    Message(InboundBatch),
    /// Battery level or charger status changed
    Battery(BatteryState),
    /// Companion connection changed
    Bluetooth(bool),
    /// Companion accepted the last outbound message
    OutboxSent,
    /// Companion did not accept the last outbound message
    OutboxFailed(LinkFailure),
    /// An inbound message was lost
    InboxDropped(LinkFailure),
}

impl Event {
    /// Check if this event comes from the companion link
    pub fn is_link_event(&self) -> bool {
        matches!(
            self,
            Event::Message(_)
                | Event::OutboxSent
                | Event::OutboxFailed(_)
                | Event::InboxDropped(_)
        )
    }
}
