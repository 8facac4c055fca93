//! Hue/saturation wheel used by the color picker.

use core::f32::consts::PI;

use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};
use crate::math::clamp_unit;

/// Pick a color from a hue/saturation wheel
///
/// `dx`/`dy` are the tap offset from the wheel center, `radius` is the wheel
/// radius in the same units. Hue follows the angle, saturation grows with the
/// distance from the center and value is always full.
///
/// Returns `None` if the tap is outside the wheel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wheel_color(dx: f32, dy: f32, radius: f32) -> Option<Rgb> {
    if radius.is_nan() || radius <= 0.0 {
        return None;
    }
    let distance = libm::sqrtf(dx * dx + dy * dy);
    if distance.is_nan() || distance > radius {
        return None;
    }

    let mut turns = libm::atan2f(dy, dx) / (2.0 * PI);
    if turns < 0.0 {
        turns += 1.0;
    }
    // 0-255 hue circle, matching `smart_leds::hsv::Hsv`
    let hue = (libm::floorf(turns * 256.0) as u32 % 256) as u8;
    let sat = libm::roundf(clamp_unit(distance / radius) * 255.0) as u8;

    Some(hsv2rgb(Hsv { hue, sat, val: 255 }))
}
