//! Utilities for doing arithmetic on the hue circle. Hue is an angle, and angles wrap: 359 degrees
//! and 1 degree are 2 degrees apart, not 358, and rotating from one hue toward another should take
//! the short way around. Getting this wrong produces colors that are badly off rather than subtly
//! off, so the wrapping logic lives here in one place. Degrees are the unit at every public
//! boundary in this crate; the one radian helper exists for the gamut solver's trigonometry.

use std::f64::consts::PI;

/// Sanitizes a degree measure into the range [0, 360).
/// # Example
/// ```
/// # use huetone::angles::sanitize_degrees;
/// assert_eq!(sanitize_degrees(-30.0), 330.0);
/// assert_eq!(sanitize_degrees(360.0), 0.0);
/// ```
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let degrees = degrees % 360.0;
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Sanitizes an integral degree measure into the range [0, 360).
pub fn sanitize_degrees_int(degrees: i32) -> i32 {
    let degrees = degrees % 360;
    if degrees < 0 {
        degrees + 360
    } else {
        degrees
    }
}

/// Sanitizes a radian measure into the range [0, 2π). The input must be no more than 8π below
/// zero, which holds for anything that started life as a difference of sanitized angles.
pub fn sanitize_radians(angle: f64) -> f64 {
    (angle + PI * 8.0) % (PI * 2.0)
}

/// Distance between two hues, in degrees: always between 0 and 180, since past 180 the other way
/// around is shorter.
pub fn difference_degrees(a: f64, b: f64) -> f64 {
    180.0 - ((a - b).abs() - 180.0).abs()
}

/// Sign of the direction a hue should rotate from `from` to arrive at `to` the short way around:
/// 1.0 for clockwise (increasing degrees), -1.0 for counterclockwise. Ties at exactly 180 degrees
/// go clockwise.
pub fn rotation_direction(from: f64, to: f64) -> f64 {
    let increasing_difference = sanitize_degrees(to - from);
    if increasing_difference <= 180.0 {
        1.0
    } else {
        -1.0
    }
}
