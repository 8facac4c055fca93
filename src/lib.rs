#![no_std]

pub mod color;
pub mod intent;
pub mod lamp;
mod logging;
pub mod math;
pub mod preferences;
pub mod scene;
pub mod session;
pub mod task;
pub mod timer;

pub use intent::{IntentChannel, IntentReceiver, IntentSender, LampIntent};
pub use lamp::{Drag, LampConfig, LampState, MAX_BRIGHTNESS, MIN_BRIGHTNESS};
pub use preferences::{MemoryPreferences, PreferenceError, PreferenceStore, Tutorial};
pub use scene::{PRESET_SCENES, Scene, SceneEngine, SceneId};
pub use session::{DEFAULT_SESSION_CONFIG, LampSession, SessionConfig, SessionTick};
pub use task::{Epoch, TaskSlot};
pub use timer::{
    Countdown, CountdownTimer, ExpiryAction, TimerConfig, TimerEvent, TimerOption, TimerState,
};

pub use color::{DEFAULT_PALETTE, Hsv, Palette, PalettePosition, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract display trait
///
/// Implement this trait to drive the lamp surface on a platform.
/// The lamp state is generic over this trait and writes every change to it.
pub trait DisplayOutput {
    /// Apply a brightness (`MIN_BRIGHTNESS..=MAX_BRIGHTNESS`)
    fn write_brightness(&mut self, brightness: f32);

    /// Apply a surface tint
    fn write_color(&mut self, color: Rgb);

    /// Give control of the brightness back to the system
    fn restore(&mut self) {}
}

impl<D: DisplayOutput + ?Sized> DisplayOutput for &mut D {
    fn write_brightness(&mut self, brightness: f32) {
        (**self).write_brightness(brightness);
    }

    fn write_color(&mut self, color: Rgb) {
        (**self).write_color(color);
    }

    fn restore(&mut self) {
        (**self).restore();
    }
}
