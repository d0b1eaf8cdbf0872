//! Projection of settings and status onto the face
//!
//! Everything on screen is derived here and recomputed on demand; none of
//! it is stored.

use ascent_protocol::BitmapId;

use super::clock::{format_date, format_time, DateText, LocalTime, TimeText};
use super::gauge::Gauge;
use crate::config::{Conditions, FaceConfig, Settings};
use crate::geometry::Point;
use crate::power::BatteryState;

/// Icon for each weather condition, indexed by ordinal
const WEATHER_ICONS: [BitmapId; 6] = [
    BitmapId::Sunny,
    BitmapId::PartlyCloudy,
    BitmapId::Cloudy,
    BitmapId::Rainy,
    BitmapId::Snowy,
    BitmapId::Stormy,
];

/// Everything the face shows
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Screen origin of the gauge needle
    pub needle: Point,
    pub weather_bitmap: BitmapId,
    pub time_text: TimeText,
    pub date_text: DateText,
    /// Visible width of the battery bar
    pub battery_width: u8,
    pub battery_bitmap: BitmapId,
    /// Entity figure shown while the companion is connected
    pub bluetooth_visible: bool,
}

/// Derives display state from settings, time and status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector {
    gauge: Gauge,
    use_24h: bool,
    bar_width: u8,
}

impl Projector {
    pub fn new(config: &FaceConfig) -> Self {
        Self {
            gauge: Gauge::new(config.gauge, config.layout.offset()),
            use_24h: config.clock.use_24h,
            bar_width: config.battery.bar_width,
        }
    }

    /// Full display state
    pub fn project(
        &self,
        settings: &Settings,
        now: &LocalTime,
        battery: BatteryState,
        connected: bool,
    ) -> DisplayState {
        let (battery_width, battery_bitmap) = self.battery(battery);
        DisplayState {
            needle: self.needle(settings.temperature),
            weather_bitmap: self.weather_bitmap(settings.conditions),
            time_text: self.time_text(now),
            date_text: self.date_text(now, settings),
            battery_width,
            battery_bitmap,
            bluetooth_visible: self.bluetooth_visible(connected),
        }
    }

    pub fn needle(&self, temperature: i32) -> Point {
        self.gauge.needle_origin(temperature)
    }

    pub fn weather_bitmap(&self, conditions: Conditions) -> BitmapId {
        WEATHER_ICONS[conditions.ordinal() as usize]
    }

    pub fn time_text(&self, now: &LocalTime) -> TimeText {
        format_time(now, self.use_24h)
    }

    pub fn date_text(&self, now: &LocalTime, settings: &Settings) -> DateText {
        format_date(now, settings.date_format)
    }

    /// Bar width and meter bitmap
    pub fn battery(&self, battery: BatteryState) -> (u8, BitmapId) {
        let percent = battery.percent.min(100) as u16;
        let width = (self.bar_width as u16 * percent / 100) as u8;
        let bitmap = if battery.charging {
            BitmapId::ChargingMeter
        } else {
            BitmapId::BatteryMeter
        };
        (width, bitmap)
    }

    pub fn bluetooth_visible(&self, connected: bool) -> bool {
        connected
    }
}
