//! Lamp state: current brightness and tint of the display surface.
//!
//! Every write is pushed to the [`DisplayOutput`], which is the single
//! observer of this state.

use crate::DisplayOutput;
use crate::color::{DEFAULT_PALETTE, Palette, PalettePosition, Rgb, label_color, named};
use crate::math::clamp_unit;

/// Lowest brightness the lamp may have. The display must stay visible.
pub const MIN_BRIGHTNESS: f32 = 0.01;

/// Highest brightness the lamp may have.
pub const MAX_BRIGHTNESS: f32 = 1.0;

/// Horizontal drag distance (in pixels) that moves one palette step
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 200.0;

pub const DEFAULT_LAMP_CONFIG: LampConfig = LampConfig {
    brightness: MAX_BRIGHTNESS,
    color: named::WHITE,
    palette: DEFAULT_PALETTE,
    drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
};

/// Clamp a brightness value to the allowed range
///
/// Returns `None` for NaN, which has no meaningful clamp.
pub fn clamp_brightness(value: f32) -> Option<f32> {
    if value.is_nan() {
        return None;
    }
    Some(value.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS))
}

/// Configuration for the lamp
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    /// Initial brightness
    pub brightness: f32,
    /// Initial color
    pub color: Rgb,
    /// Palette walked by horizontal drags
    pub palette: Palette,
    /// Horizontal pixels per palette step
    pub drag_sensitivity: f32,
}

impl Default for LampConfig {
    fn default() -> Self {
        DEFAULT_LAMP_CONFIG
    }
}

/// Drag delta reported by the gesture layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Horizontal delta in pixels
    pub dx: f32,
    /// Vertical delta in pixels (positive is downward)
    pub dy: f32,
    /// Height of the drag surface in pixels
    pub container_height: u32,
}

/// Lamp state
pub struct LampState<O: DisplayOutput> {
    output: O,
    palette: Palette,
    drag_sensitivity: f32,

    brightness: f32,
    color: Rgb,
    position: PalettePosition,
}

impl<O: DisplayOutput> LampState<O> {
    /// Create the lamp state and push the initial values to the output
    pub fn new(output: O, config: &LampConfig) -> Self {
        let mut lamp = Self {
            output,
            palette: config.palette,
            drag_sensitivity: config.drag_sensitivity,
            brightness: MAX_BRIGHTNESS,
            color: config.color,
            position: PalettePosition::default(),
        };
        lamp.set_brightness(config.brightness);
        lamp.set_color(config.color);
        lamp
    }

    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn palette(&self) -> Palette {
        self.palette
    }

    pub const fn palette_position(&self) -> PalettePosition {
        self.position
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Set brightness, clamped to `MIN_BRIGHTNESS..=MAX_BRIGHTNESS`
    ///
    /// NaN is ignored.
    pub fn set_brightness(&mut self, value: f32) {
        let Some(brightness) = clamp_brightness(value) else {
            return;
        };
        self.brightness = brightness;
        self.output.write_brightness(brightness);
    }

    /// Set color from a non-drag source (picker, scene)
    ///
    /// If the color is a palette entry, the palette position snaps to it.
    /// Otherwise the position is left where it was.
    pub fn set_color(&mut self, color: Rgb) {
        if let Some(index) = self.palette.index_of(color) {
            self.position = PalettePosition::at_index(index, self.palette);
        }
        self.store_color(color);
    }

    /// Apply a drag delta
    ///
    /// The dominant axis wins: horizontal drags walk the palette, vertical
    /// drags change brightness by the dragged fraction of the surface height.
    /// Dragging down dims.
    #[allow(clippy::cast_precision_loss)]
    pub fn apply_drag(&mut self, drag: Drag) {
        if drag.dx.is_nan() || drag.dy.is_nan() {
            return;
        }
        if libm::fabsf(drag.dx) > libm::fabsf(drag.dy) {
            let delta = -drag.dx / self.drag_sensitivity;
            self.position = self.position.shifted(delta, self.palette);
            self.store_color(self.palette.color_at(self.position));
        } else {
            if drag.container_height == 0 {
                return;
            }
            let dragged = drag.dy / drag.container_height as f32;
            self.set_brightness(self.brightness - dragged);
        }
    }

    /// Brightness as a whole percentage, truncated
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn brightness_percent(&self) -> u8 {
        (clamp_unit(self.brightness) * 100.0) as u8
    }

    /// The percentage overlay is only shown below full brightness
    pub fn shows_brightness_label(&self) -> bool {
        self.brightness < MAX_BRIGHTNESS
    }

    /// Color of text drawn over the lamp surface
    pub fn label_color(&self) -> Rgb {
        label_color(self.color)
    }

    /// End the lamp session
    ///
    /// Hands the display back to the system brightness and returns the output.
    pub fn release(mut self) -> O {
        self.output.restore();
        self.output
    }

    fn store_color(&mut self, color: Rgb) {
        self.color = color;
        self.output.write_color(color);
    }
}
