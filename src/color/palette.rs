//! Ordered palette used for drag-based tinting.
//!
//! A horizontal drag moves a continuous [`PalettePosition`] along the
//! palette; the lamp color is the linear blend of the two palette entries
//! bracketing that position.

use crate::color::{Rgb, lerp_colors, rgb_from_u32};

/// Named lamp colors
pub mod named {
    use super::{Rgb, rgb_from_u32};

    pub const WHITE: Rgb = rgb_from_u32(0xFF_FFFF);
    pub const RED: Rgb = rgb_from_u32(0xFF_0000);
    pub const ORANGE: Rgb = rgb_from_u32(0xFF_8000);
    pub const YELLOW: Rgb = rgb_from_u32(0xFF_FF00);
    pub const GREEN: Rgb = rgb_from_u32(0x00_FF00);
    pub const DARK_GREEN: Rgb = rgb_from_u32(0x00_8000);
    pub const CYAN: Rgb = rgb_from_u32(0x00_FFFF);
    pub const BLUE: Rgb = rgb_from_u32(0x00_00FF);
    pub const MAGENTA: Rgb = rgb_from_u32(0xFF_00FF);
    pub const PURPLE: Rgb = rgb_from_u32(0x80_0080);
    pub const PINK: Rgb = rgb_from_u32(0xFF_69B4);
}

/// Colors of the default palette, in drag order
pub const DEFAULT_PALETTE_COLORS: [Rgb; 10] = [
    named::WHITE,
    named::RED,
    named::ORANGE,
    named::YELLOW,
    named::GREEN,
    named::DARK_GREEN,
    named::CYAN,
    named::BLUE,
    named::PURPLE,
    named::PINK,
];

pub const DEFAULT_PALETTE: Palette = Palette::new(&DEFAULT_PALETTE_COLORS);

/// Fixed, non-empty, ordered list of colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [Rgb],
}

impl Palette {
    /// Create a palette
    ///
    /// # Panics
    /// Panics if `colors` is empty.
    pub const fn new(colors: &'static [Rgb]) -> Self {
        assert!(!colors.is_empty(), "palette must contain at least one color");
        Self { colors }
    }

    /// Number of colors, at least one
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        self.colors.len()
    }

    pub const fn last_index(self) -> usize {
        self.colors.len() - 1
    }

    pub const fn colors(self) -> &'static [Rgb] {
        self.colors
    }

    pub fn get(self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Index of the entry exactly equal to `color`
    pub fn index_of(self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|entry| *entry == color)
    }

    /// Interpolated color at a palette position
    pub fn color_at(self, position: PalettePosition) -> Rgb {
        let lower = position.lower_index().min(self.last_index());
        let upper = position.upper_index(self).min(self.last_index());
        if lower == upper {
            return self.colors[lower];
        }
        lerp_colors(self.colors[lower], self.colors[upper], position.fraction())
    }
}

/// Continuous position along a [`Palette`], always in `0.0..=len - 1`
///
/// The integer part indexes the lower bracketing color, the fractional part
/// is the blend weight toward the next color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PalettePosition(f32);

impl PalettePosition {
    /// Create a position clamped to the palette range
    ///
    /// NaN maps to the first entry.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(value: f32, palette: Palette) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, palette.last_index() as f32))
    }

    /// Position exactly on a palette entry
    ///
    /// # Panics
    /// Panics if `index` is outside the palette.
    #[allow(clippy::cast_precision_loss)]
    pub fn at_index(index: usize, palette: Palette) -> Self {
        assert!(index < palette.len(), "palette index out of range");
        Self(index as f32)
    }

    pub const fn value(self) -> f32 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lower_index(self) -> usize {
        libm::floorf(self.0) as usize
    }

    pub fn upper_index(self, palette: Palette) -> usize {
        (self.lower_index() + 1).min(palette.last_index())
    }

    /// Blend weight toward the upper entry (0.0-1.0)
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(self) -> f32 {
        (self.0 - self.lower_index() as f32).clamp(0.0, 1.0)
    }

    /// Move by `delta` palette steps, staying within the palette
    #[must_use]
    pub fn shifted(self, delta: f32, palette: Palette) -> Self {
        if delta.is_nan() {
            return self;
        }
        Self::new(self.0 + delta, palette)
    }
}
