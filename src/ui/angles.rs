//! Integer angle math on the face circle.
//!
//! Angles use a binary full-turn unit: [`TURN`] is one revolution,
//! angle 0 points at 12 o'clock and values increase clockwise. The
//! screen conversion applies the fixed quarter-turn rotation so that
//! angle 0 maps to "up" rather than "right".

use embedded_graphics::geometry::Point;
use libm::{cosf, roundf, sinf};

/// One full revolution in angle units.
pub const TURN: i32 = 0x1_0000;

/// Wrap an angle into `0..TURN`.
pub fn normalize(angle: i32) -> i32 {
    angle.rem_euclid(TURN)
}

/// Angle units → degrees.
pub fn to_degrees(angle: i32) -> f32 {
    angle as f32 * 360.0 / TURN as f32
}

/// Hour hand angle, sweeping continuously as the minute advances.
pub fn hour_angle(hour: u32, minute: u32) -> i32 {
    normalize(TURN * (hour as i32 % 12) / 12 + TURN * minute as i32 / 720)
}

/// Minute hand angle, sweeping continuously as the second advances.
pub fn minute_angle(minute: u32, second: u32) -> i32 {
    normalize(TURN * minute as i32 / 60 + TURN * second as i32 / 3_600)
}

/// Second indicator angle, quantized to the redraw interval.
///
/// Seconds between two redraws are never observed, so the indicator
/// only ever sits on interval multiples.
pub fn second_angle(second: u32, interval_secs: u32) -> i32 {
    let interval = interval_secs.max(1);
    let quantized = (second / interval) * interval;
    normalize(TURN * quantized as i32 / 60)
}

/// Point at `length` fractions of `radius` out from `center` along
/// `angle`.
pub fn tip_point(center: Point, radius: i32, angle: i32, length: f32) -> Point {
    let rad = to_radians(angle);
    let reach = radius as f32 * length;
    Point::new(
        center.x + roundf(reach * sinf(rad)) as i32,
        center.y - roundf(reach * cosf(rad)) as i32,
    )
}

fn to_radians(angle: i32) -> f32 {
    angle as f32 / TURN as f32 * 2.0 * core::f32::consts::PI
}
