//! Temperature gauge needle placement
//!
//! The track has two halves meeting at the middle temperature. Readings are
//! clamped to the track, then placed along the half they fall in.

use crate::config::GaugeConfig;
use crate::geometry::{point_lerp, unlerp, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauge {
    config: GaugeConfig,
    offset: Point,
}

impl Gauge {
    /// `offset` centres the face on the screen
    pub fn new(config: GaugeConfig, offset: Point) -> Self {
        Self { config, offset }
    }

    pub fn clamp(&self, temperature: i32) -> i32 {
        if temperature > self.config.max() {
            self.config.max()
        } else if temperature < self.config.min() {
            self.config.min()
        } else {
            temperature
        }
    }

    /// Point on the track for `temperature`, in face coordinates
    pub fn track_point(&self, temperature: i32) -> Point {
        let c = &self.config;
        let temperature = self.clamp(temperature);

        let (low, high, start, end) = if temperature > c.middle {
            (c.middle, c.max(), c.right_start, c.right_end)
        } else {
            (c.min(), c.middle, c.left_start, c.left_end)
        };

        // A validated config has a non-empty band
        let fraction = unlerp(low, high, temperature).unwrap_or(0.0);
        point_lerp(start, end, fraction)
    }

    /// Screen origin of the needle bitmap for `temperature`
    pub fn needle_origin(&self, temperature: i32) -> Point {
        self.track_point(temperature) - self.config.slider_center + self.offset
    }
}
