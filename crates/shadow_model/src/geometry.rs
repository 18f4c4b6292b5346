//! Polar/Cartesian conversion for shadow offsets
//!
//! Angles are in degrees with 0 pointing down the positive y axis and 90 along
//! the positive x axis, so `x = sin(angle) * distance` and
//! `y = cos(angle) * distance`.

use serde::{Deserialize, Serialize};

/// A pixel offset as rendered in CSS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

/// An offset expressed as an angle (degrees, `0..360`) and a distance (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Polar {
    pub angle: i32,
    pub distance: u32,
}

/// Round half towards positive infinity.
///
/// Browsers round this way, and offsets produced here must agree with the ones
/// already embedded in shared links.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Project an angle and distance onto x/y pixel offsets
pub fn offset_from_polar(angle: i32, distance: u32) -> Offset {
    let radians = f64::from(angle).to_radians();
    let distance = f64::from(distance);
    Offset {
        x: round_half_up(radians.sin() * distance) as i32,
        y: round_half_up(radians.cos() * distance) as i32,
    }
}

/// Recover an angle and distance from x/y pixel offsets
pub fn polar_from_offset(x: i32, y: i32) -> Polar {
    let (fx, fy) = (f64::from(x), f64::from(y));
    let distance = round_half_up(fx.hypot(fy)) as u32;
    Polar {
        angle: normalize_angle(round_half_up(fx.atan2(fy).to_degrees()) as i32),
        distance,
    }
}

/// Wrap any angle into `0..360`
pub fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(360)
}
