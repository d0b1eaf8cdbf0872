//! Weather exchange with the companion
//!
//! The companion pushes weather reports and settings as app messages; the
//! watch asks for fresh weather on a schedule and whenever it is poked.

pub mod message;
pub mod request;

pub use message::{decode, InboundBatch, InboundMessage, MessageError, MAX_BATCH_LEN};
pub use request::OutboundMessage;
