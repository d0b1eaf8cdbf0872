//! Weather refresh schedule
//!
//! Counts minute ticks and fires once every `rate` ticks. The count lives
//! in memory only, so a restart waits a full period.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherSchedule {
    rate: u16,
    elapsed: u16,
}

impl WeatherSchedule {
    /// A zero rate is treated as one
    pub fn new(rate: u16) -> Self {
        Self {
            rate: rate.max(1),
            elapsed: 0,
        }
    }

    /// Advance by one minute; `true` when a request is due
    pub fn tick(&mut self) -> bool {
        self.elapsed = self.elapsed.saturating_add(1);
        if self.elapsed >= self.rate {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Minutes since the last request
    pub fn elapsed(&self) -> u16 {
        self.elapsed
    }

    pub fn rate(&self) -> u16 {
        self.rate
    }
}
