//! Display state derivation
//!
//! Turns settings, the wall clock and battery/Bluetooth status into what
//! the face should show.

pub mod clock;
pub mod gauge;
pub mod projector;

pub use clock::{format_date, format_time, DateText, LocalTime, TimeText, Weekday};
pub use gauge::Gauge;
pub use projector::{DisplayState, Projector};
