//! Small float helpers shared by the lamp, palette and timer.

use embassy_time::Duration;

/// Linear interpolation between two 8-bit channel values
///
/// `t` is clamped to `0.0..=1.0` and the result is rounded to nearest,
/// so `t == 0.0` gives exactly `a` and `t == 1.0` exactly `b`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lerp8(a: u8, b: u8, t: f32) -> u8 {
    let t = clamp_unit(t);
    let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
    libm::roundf(value).clamp(0.0, 255.0) as u8
}

/// Clamp a value to `0.0..=1.0`, mapping NaN to `0.0`
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Fraction of `part` in `whole` (0.0-1.0)
///
/// Returns `1.0` for an empty `whole`.
#[allow(clippy::cast_precision_loss)]
pub fn ratio(part: Duration, whole: Duration) -> f32 {
    let whole = whole.as_millis();
    if whole == 0 {
        return 1.0;
    }
    clamp_unit(part.as_millis() as f32 / whole as f32)
}

/// `a - b`, or zero if `b` is longer
#[inline]
pub fn saturating_sub(a: Duration, b: Duration) -> Duration {
    a.checked_sub(b).unwrap_or(Duration::from_ticks(0))
}
