//! Battery state

/// Charge level and charger status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// 0-100
    pub percent: u8,
    pub charging: bool,
}

impl BatteryState {
    /// Percent above 100 is capped
    pub fn new(percent: u8, charging: bool) -> Self {
        Self {
            percent: percent.min(100),
            charging,
        }
    }
}

impl Default for BatteryState {
    fn default() -> Self {
        Self::new(100, false)
    }
}

/// Map a cell voltage linearly onto 0-100 %
///
/// Readings outside `empty_mv..=full_mv` saturate.
pub fn percent_from_millivolts(millivolts: u16, empty_mv: u16, full_mv: u16) -> u8 {
    if millivolts <= empty_mv || full_mv <= empty_mv {
        return 0;
    }
    if millivolts >= full_mv {
        return 100;
    }
    let above = (millivolts - empty_mv) as u32;
    let span = (full_mv - empty_mv) as u32;
    (above * 100 / span) as u8
}
