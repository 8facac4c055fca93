//! Scene presets with compile-time known variants
//!
//! A scene bundles one or more colors with a brightness. Animated scenes
//! cycle through their colors, holding each for the transition duration.

mod engine;

use embassy_time::Duration;

pub use engine::SceneEngine;

use crate::color::{Rgb, named, rgb_from_u32};

const SCENE_NAME_READING: &str = "reading";
const SCENE_NAME_NIGHT: &str = "night";
const SCENE_NAME_WARM: &str = "warm";
const SCENE_NAME_RAINBOW: &str = "rainbow";
const SCENE_NAME_SUNSET: &str = "sunset";

const SCENE_ID_READING: u8 = 0;
const SCENE_ID_NIGHT: u8 = 1;
const SCENE_ID_WARM: u8 = 2;
const SCENE_ID_RAINBOW: u8 = 3;
const SCENE_ID_SUNSET: u8 = 4;

/// Default hold time of each color of an animated scene
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(2000);

/// Immutable scene definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Colors, applied in order
    pub colors: &'static [Rgb],
    /// Hold time of each color when animated
    pub transition_duration: Duration,
    /// Brightness applied with every color
    pub brightness: f32,
    /// Cycle through `colors` until stopped
    pub is_animated: bool,
}

impl Scene {
    /// Static single-color scene
    pub const fn solid(
        id: &'static str,
        name: &'static str,
        colors: &'static [Rgb],
        brightness: f32,
    ) -> Self {
        Self {
            id,
            name,
            colors,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            brightness,
            is_animated: false,
        }
    }

    /// Color cycle at full brightness
    pub const fn cycle(
        id: &'static str,
        name: &'static str,
        colors: &'static [Rgb],
        transition_duration: Duration,
    ) -> Self {
        Self {
            id,
            name,
            colors,
            transition_duration,
            brightness: 1.0,
            is_animated: true,
        }
    }
}

const READING_COLORS: [Rgb; 1] = [rgb_from_u32(0xFF_F4E5)];
const NIGHT_COLORS: [Rgb; 1] = [rgb_from_u32(0xFF_6B6B)];
const WARM_COLORS: [Rgb; 1] = [rgb_from_u32(0xFF_E4B5)];
const RAINBOW_COLORS: [Rgb; 6] = [
    named::RED,
    named::GREEN,
    named::BLUE,
    named::YELLOW,
    named::MAGENTA,
    named::CYAN,
];
const SUNSET_COLORS: [Rgb; 3] = [
    rgb_from_u32(0xFF_8C00),
    rgb_from_u32(0xFF_6B6B),
    rgb_from_u32(0x4A_90E2),
];

/// Built-in scenes, indexed by [`SceneId`]
pub static PRESET_SCENES: [Scene; 5] = [
    Scene::solid(SCENE_NAME_READING, "Reading Light", &READING_COLORS, 0.7),
    Scene::solid(SCENE_NAME_NIGHT, "Night Mode", &NIGHT_COLORS, 0.3),
    Scene::solid(SCENE_NAME_WARM, "Warm Light", &WARM_COLORS, 0.5),
    Scene::cycle(
        SCENE_NAME_RAINBOW,
        "Rainbow",
        &RAINBOW_COLORS,
        DEFAULT_TRANSITION_DURATION,
    ),
    Scene::cycle(
        SCENE_NAME_SUNSET,
        "Sunset",
        &SUNSET_COLORS,
        Duration::from_millis(5000),
    ),
];

/// Known scene ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SceneId {
    Reading = SCENE_ID_READING,
    Night = SCENE_ID_NIGHT,
    Warm = SCENE_ID_WARM,
    Rainbow = SCENE_ID_RAINBOW,
    Sunset = SCENE_ID_SUNSET,
}

impl SceneId {
    pub const ALL: [Self; 5] = [
        Self::Reading,
        Self::Night,
        Self::Warm,
        Self::Rainbow,
        Self::Sunset,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            SCENE_ID_READING => Self::Reading,
            SCENE_ID_NIGHT => Self::Night,
            SCENE_ID_WARM => Self::Warm,
            SCENE_ID_RAINBOW => Self::Rainbow,
            SCENE_ID_SUNSET => Self::Sunset,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reading => SCENE_NAME_READING,
            Self::Night => SCENE_NAME_NIGHT,
            Self::Warm => SCENE_NAME_WARM,
            Self::Rainbow => SCENE_NAME_RAINBOW,
            Self::Sunset => SCENE_NAME_SUNSET,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SCENE_NAME_READING => Some(Self::Reading),
            SCENE_NAME_NIGHT => Some(Self::Night),
            SCENE_NAME_WARM => Some(Self::Warm),
            SCENE_NAME_RAINBOW => Some(Self::Rainbow),
            SCENE_NAME_SUNSET => Some(Self::Sunset),
            _ => None,
        }
    }

    /// Scene definition for this id
    pub fn scene(self) -> &'static Scene {
        &PRESET_SCENES[self as usize]
    }
}
