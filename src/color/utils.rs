use crate::{color::Rgb, math::lerp8};

const WHITE: Rgb = rgb_from_u32(0xFF_FFFF);
const BLACK: Rgb = rgb_from_u32(0x00_0000);

/// Blend two RGB colors channel by channel
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `t` - Blend factor (0.0 = all a, 1.0 = all b), clamped
#[inline]
pub fn lerp_colors(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb {
        r: lerp8(a.r, b.r, t),
        g: lerp8(a.g, b.g, t),
        b: lerp8(a.b, b.b, t),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Text color for overlays drawn on top of the lamp surface
pub fn label_color(background: Rgb) -> Rgb {
    if background == WHITE { BLACK } else { WHITE }
}
