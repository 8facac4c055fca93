//! Boolean preferences and the first-run tutorial flag.

use heapless::{LinearMap, String};

use crate::logging::debug_log;

/// Key of the "show tutorial" flag
pub const KEY_SHOW_TUTORIAL: &str = "show_tutorial";

/// Longest key [`MemoryPreferences`] can hold
pub const MAX_KEY_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceError {
    /// The backing store could not be reached
    Unavailable,
    /// No room left for a new key
    Full,
    /// Key is longer than the store supports
    KeyTooLong,
}

/// Key-value store for boolean preferences
pub trait PreferenceStore {
    /// Read a flag, `Ok(None)` if it was never written
    fn read_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError>;

    /// Write a flag
    fn write_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError>;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for &mut P {
    fn read_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError> {
        (**self).read_bool(key)
    }

    fn write_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError> {
        (**self).write_bool(key, value)
    }
}

/// Bounded in-memory preference store
///
/// N is the number of keys the store can hold
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences<const N: usize> {
    entries: LinearMap<String<MAX_KEY_LEN>, bool, N>,
}

impl<const N: usize> MemoryPreferences<N> {
    pub const fn new() -> Self {
        Self {
            entries: LinearMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> PreferenceStore for MemoryPreferences<N> {
    fn read_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError> {
        Ok(self
            .entries
            .iter()
            .find(|(stored, _)| stored.as_str() == key)
            .map(|(_, value)| *value))
    }

    fn write_bool(&mut self, key: &str, value: bool) -> Result<(), PreferenceError> {
        let key: String<MAX_KEY_LEN> =
            String::try_from(key).map_err(|()| PreferenceError::KeyTooLong)?;
        self.entries
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| PreferenceError::Full)
    }
}

/// First-run tutorial gate
///
/// The flag is read once at construction; a missing flag or a failed read
/// means the tutorial is shown.
#[derive(Debug)]
pub struct Tutorial<P: PreferenceStore> {
    store: P,
    show: bool,
}

impl<P: PreferenceStore> Tutorial<P> {
    #[cfg_attr(not(any(feature = "log", feature = "esp32-log")), allow(unused_variables))]
    pub fn new(store: P) -> Self {
        let show = match store.read_bool(KEY_SHOW_TUTORIAL) {
            Ok(value) => value.unwrap_or(true),
            Err(err) => {
                debug_log!("[Tutorial.new] read failed: {:?}", err);
                true
            }
        };
        Self { store, show }
    }

    pub const fn should_show(&self) -> bool {
        self.show
    }

    /// Mark the tutorial as done
    pub fn complete(&mut self) {
        self.set(false);
    }

    /// Show the tutorial again on next launch
    pub fn reset(&mut self) {
        self.set(true);
    }

    pub const fn store(&self) -> &P {
        &self.store
    }

    pub fn into_store(self) -> P {
        self.store
    }

    #[cfg_attr(not(any(feature = "log", feature = "esp32-log")), allow(unused_variables))]
    fn set(&mut self, show: bool) {
        self.show = show;
        if let Err(err) = self.store.write_bool(KEY_SHOW_TUTORIAL, show) {
            debug_log!("[Tutorial.set] write failed: {:?}", err);
        }
    }
}
