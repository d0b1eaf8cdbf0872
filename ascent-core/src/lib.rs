//! Board-agnostic core logic for the Ascent watchface
//!
//! This crate contains all watchface logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (display, companion link, settings storage, clock)
//! - Settings store with a versioned, checksummed persisted record
//! - Weather message decoding and weather requests
//! - Display state projection (gauge needle, icons, time and date text)
//! - Weather refresh schedule
//! - The watchface controller that owns all of the above
//! - Face configuration types and their TOML-subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod display;
pub mod geometry;
pub mod power;
pub mod scheduler;
pub mod state;
pub mod traits;
pub mod weather;

pub use controller::{Watchface, WatchfaceError};
