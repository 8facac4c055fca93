#![allow(dead_code)]

use std::collections::HashMap;
use std::vec::Vec;

use screen_lamp::{DisplayOutput, PreferenceError, PreferenceStore, Rgb};

/// Display double that records every write
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub brightness: Vec<f32>,
    pub colors: Vec<Rgb>,
    pub restored: bool,
}

impl RecordingDisplay {
    pub fn last_brightness(&self) -> Option<f32> {
        self.brightness.last().copied()
    }

    pub fn last_color(&self) -> Option<Rgb> {
        self.colors.last().copied()
    }
}

impl DisplayOutput for RecordingDisplay {
    fn write_brightness(&mut self, brightness: f32) {
        self.brightness.push(brightness);
    }

    fn write_color(&mut self, color: Rgb) {
        self.colors.push(color);
    }

    fn restore(&mut self) {
        self.restored = true;
    }
}

/// Preference store backed by a `HashMap`
#[derive(Debug, Default)]
pub struct MapPreferences {
    pub values: HashMap<String, bool>,
}

impl PreferenceStore for MapPreferences {
    fn read_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError> {
        Ok(self.values.get(key).copied())
    }

    fn write_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preference store whose backend is always gone
#[derive(Debug, Default)]
pub struct BrokenPreferences {
    pub write_attempts: usize,
}

impl PreferenceStore for BrokenPreferences {
    fn read_bool(&self, _key: &str) -> Result<Option<bool>, PreferenceError> {
        Err(PreferenceError::Unavailable)
    }

    fn write_bool(&mut self, _key: &str, _value: bool) -> Result<(), PreferenceError> {
        self.write_attempts += 1;
        Err(PreferenceError::Unavailable)
    }
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
