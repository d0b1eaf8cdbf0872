//! RP2040-specific HAL for the watchface firmware
//!
//! RP2040 implementations of the shared `ascent-hal` traits, plus the
//! RP2040 pieces the watchface needs:
//!
//! - Flash storage driver (implements `ascent_hal::FlashStorage`)
//! - RTC wall clock (implements `ascent_core::traits::WallClock`)
//! - VSYS battery voltage scaling for the ADC

#![no_std]

pub mod adc;
pub mod flash;
pub mod rtc;

// Re-export shared traits from ascent-hal for convenience
pub use ascent_hal::{FlashStorage as FlashStorageTrait, StorageKey};
