//! Integer points and linear interpolation
//!
//! Interpolation is evaluated in double precision from an `f32` fraction and
//! truncated toward zero, so endpoints come out exact.

use core::ops::{Add, Sub};

/// A point in face coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Interpolate between `a` and `b`
///
/// `fraction` is not bounds checked; values outside 0..=1 extrapolate.
pub fn lerp(a: i32, b: i32, fraction: f32) -> i32 {
    let fraction = fraction as f64;
    (a as f64 * (1.0 - fraction) + b as f64 * fraction) as i32
}

/// Interpolate both axes of two points
pub fn point_lerp(a: Point, b: Point, fraction: f32) -> Point {
    Point::new(lerp(a.x, b.x, fraction), lerp(a.y, b.y, fraction))
}

/// Position of `c` relative to the span `a..b`
///
/// Returns `None` for an empty span.
pub fn unlerp(a: i32, b: i32, c: i32) -> Option<f32> {
    if a == b {
        return None;
    }
    Some((c - a) as f32 / (b - a) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lerp_midpoint() {
        assert_eq!(lerp(0, 10, 0.5), 5);
        assert_eq!(lerp(43, 90, 0.5), 66); // 66.5 truncates
    }

    #[test]
    fn test_lerp_truncates_toward_zero() {
        assert_eq!(lerp(0, -3, 0.5), -1);
    }

    #[test]
    fn test_unlerp() {
        assert_eq!(unlerp(30, 65, 30), Some(0.0));
        assert_eq!(unlerp(30, 65, 65), Some(1.0));
        assert_eq!(unlerp(65, 100, 72), Some(7.0 / 35.0));
        assert_eq!(unlerp(5, 5, 5), None);
    }

    #[test]
    fn test_point_ops() {
        let p = Point::new(90, 120) - Point::new(5, 8) + Point::new(0, 0);
        assert_eq!(p, Point::new(85, 112));
    }

    proptest! {
        #[test]
        fn prop_point_lerp_endpoints(
            ax in -1000i32..1000, ay in -1000i32..1000,
            bx in -1000i32..1000, by in -1000i32..1000,
        ) {
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            prop_assert_eq!(point_lerp(a, b, 0.0), a);
            prop_assert_eq!(point_lerp(a, b, 1.0), b);
        }

        #[test]
        fn prop_lerp_stays_between_endpoints(a in -1000i32..1000, b in -1000i32..1000, f in 0.0f32..=1.0) {
            let v = lerp(a, b, f);
            prop_assert!(v >= a.min(b) && v <= a.max(b));
        }
    }
}
