//! Companion link trait

use crate::weather::OutboundMessage;

/// Errors from queueing an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// A previous message still occupies the outbox
    Busy,
}

/// Outbound half of the companion link
///
/// Delivery verdicts come back later as events, so sending never blocks.
pub trait CompanionLink {
    /// Queue a message if the outbox has a free slot
    fn try_send(&mut self, message: OutboundMessage) -> Result<(), SendError>;
}
