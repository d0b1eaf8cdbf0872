//! Face geometry and behaviour configuration
//!
//! Defaults reproduce the stock 180 x 180 face: a temperature track
//! centred on 65 with a span of 35 either side, a 100 px battery bar and a
//! weather refresh every 15 minutes.

use crate::geometry::Point;

/// Size of the face artwork in pixels (square)
pub const FACE_SIZE: i32 = 180;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Gauge range must be positive
    InvalidGaugeRange,
    /// Weather refresh rate must be at least one minute
    InvalidWeatherRate,
    /// Battery bar needs a width
    InvalidBatteryWidth,
    /// Empty voltage must be below full voltage
    InvalidBatteryVoltage,
    /// Screen cannot hold the face artwork
    ScreenTooSmall,
}

/// Temperature gauge track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeConfig {
    /// Temperature at the centre of the track
    pub middle: i32,
    /// Temperature span covered by each half of the track
    pub range: i32,
    /// Left half, coldest end
    pub left_start: Point,
    /// Left half, centre end
    pub left_end: Point,
    /// Right half, centre end
    pub right_start: Point,
    /// Right half, hottest end
    pub right_end: Point,
    /// Needle bitmap hot spot
    pub slider_center: Point,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            middle: 65,
            range: 35,
            left_start: Point::new(43, 126),
            left_end: Point::new(90, 120),
            right_start: Point::new(90, 120),
            right_end: Point::new(136, 126),
            slider_center: Point::new(5, 8),
        }
    }
}

impl GaugeConfig {
    /// Coldest temperature shown
    pub fn min(&self) -> i32 {
        self.middle.saturating_sub(self.range)
    }

    /// Hottest temperature shown
    pub fn max(&self) -> i32 {
        self.middle.saturating_add(self.range)
    }
}

/// Screen dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutConfig {
    pub screen_width: i32,
    pub screen_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen_width: FACE_SIZE,
            screen_height: FACE_SIZE,
        }
    }
}

impl LayoutConfig {
    /// Offset that centres the face artwork on the screen
    pub fn offset(&self) -> Point {
        Point::new(
            (self.screen_width - FACE_SIZE) / 2,
            (self.screen_height - FACE_SIZE) / 2,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// "14:05" rather than "02:05"
    pub use_24h: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { use_24h: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherConfig {
    /// Minutes between weather requests
    pub check_rate_min: u16,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { check_rate_min: 15 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    /// Width of the battery bar at 100 %
    pub bar_width: u8,
    /// Cell voltage shown as 0 %
    pub empty_mv: u16,
    /// Cell voltage shown as 100 %
    pub full_mv: u16,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            bar_width: 100,
            empty_mv: 3300,
            full_mv: 4200,
        }
    }
}

/// Complete face configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    pub gauge: GaugeConfig,
    pub layout: LayoutConfig,
    pub clock: ClockConfig,
    pub weather: WeatherConfig,
    pub battery: BatteryConfig,
}

impl FaceConfig {
    /// Check the invariants the watchface relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gauge.range <= 0 {
            return Err(ConfigError::InvalidGaugeRange);
        }
        if self.weather.check_rate_min == 0 {
            return Err(ConfigError::InvalidWeatherRate);
        }
        if self.battery.bar_width == 0 {
            return Err(ConfigError::InvalidBatteryWidth);
        }
        if self.battery.empty_mv >= self.battery.full_mv {
            return Err(ConfigError::InvalidBatteryVoltage);
        }
        if self.layout.screen_width < FACE_SIZE || self.layout.screen_height < FACE_SIZE {
            return Err(ConfigError::ScreenTooSmall);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FaceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.gauge.min(), 30);
        assert_eq!(config.gauge.max(), 100);
        assert_eq!(config.layout.offset(), Point::new(0, 0));
    }

    #[test]
    fn test_offset_centres_face() {
        let layout = LayoutConfig {
            screen_width: 200,
            screen_height: 228,
        };
        assert_eq!(layout.offset(), Point::new(10, 24));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FaceConfig::default();
        config.gauge.range = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidGaugeRange));

        let mut config = FaceConfig::default();
        config.weather.check_rate_min = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidWeatherRate));

        let mut config = FaceConfig::default();
        config.battery.bar_width = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBatteryWidth));

        let mut config = FaceConfig::default();
        config.battery.empty_mv = 4200;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBatteryVoltage));

        let mut config = FaceConfig::default();
        config.layout.screen_height = 168;
        assert_eq!(config.validate(), Err(ConfigError::ScreenTooSmall));
    }
}
