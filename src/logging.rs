//! Feature-gated debug logging.
//!
//! Nothing is emitted unless `esp32-log` or `log` is enabled.

macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    }};
}

pub(crate) use debug_log;
