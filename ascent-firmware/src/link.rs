//! Outbound half of the companion link
//!
//! The outbox holds one message. It stays busy until the companion TX task
//! has a verdict, so a second request while one is in flight is refused.

use core::sync::atomic::Ordering;

use ascent_core::traits::{CompanionLink, SendError};
use ascent_core::weather::OutboundMessage;

use crate::channels::{OUTBOX, OUTBOX_BUSY};

#[derive(Debug, Clone, Copy, Default)]
pub struct OutboxLink;

impl CompanionLink for OutboxLink {
    fn try_send(&mut self, message: OutboundMessage) -> Result<(), SendError> {
        if OUTBOX_BUSY.swap(true, Ordering::AcqRel) {
            return Err(SendError::Busy);
        }
        OUTBOX.try_send(message).map_err(|_| {
            OUTBOX_BUSY.store(false, Ordering::Release);
            SendError::Busy
        })
    }
}
