//! Ascent Hardware Abstraction Layer
//!
//! Traits implemented by chip-specific HALs so the firmware does not depend
//! on one microcontroller family.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (ascent-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ascent-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  ascent-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! - [`flash::FlashStorage`] - Persistent key/value storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, FlashStorage, StorageKey};
