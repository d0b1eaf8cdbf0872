//! Wall clock trait

use crate::display::clock::LocalTime;

/// Source of the current local time
pub trait WallClock {
    /// Read the current time
    ///
    /// Returns `None` while the clock has not been set.
    fn now(&mut self) -> Option<LocalTime>;
}
