mod palette;
mod utils;
mod wheel;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use palette::{DEFAULT_PALETTE, DEFAULT_PALETTE_COLORS, Palette, PalettePosition, named};
pub use utils::{label_color, lerp_colors, rgb_from_u32};
pub use wheel::wheel_color;

pub type Rgb = RGB8;
pub type Hsv = HSV;
