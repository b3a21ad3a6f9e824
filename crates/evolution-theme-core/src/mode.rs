//! OS color mode detection.
//!
//! Used to resolve a `{ light, dark }` default theme when nothing has been
//! persisted yet. Detection goes through a process-wide detector so tests
//! can pin the mode with [`set_color_mode_detector`].
//!
//! ```rust
//! use evolution_theme_core::{detect_color_mode, set_color_mode_detector, ColorMode};
//!
//! set_color_mode_detector(|| ColorMode::Dark);
//! assert_eq!(detect_color_mode(), ColorMode::Dark);
//! ```

use dark_light::Mode as OsThemeMode;
use once_cell::sync::Lazy;
use std::sync::Mutex;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Light background, dark text.
    Light,
    /// Dark background, light text.
    Dark,
}

type ColorModeDetector = fn() -> ColorMode;

static COLOR_MODE_DETECTOR: Lazy<Mutex<ColorModeDetector>> =
    Lazy::new(|| Mutex::new(os_color_mode_detector));

/// Overrides the detector used by [`detect_color_mode`].
pub fn set_color_mode_detector(detector: ColorModeDetector) {
    let mut guard = COLOR_MODE_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores OS-based detection.
pub fn reset_color_mode_detector() {
    set_color_mode_detector(os_color_mode_detector);
}

/// Detects the preferred color mode.
///
/// Queries the OS through `dark-light` unless a detector override is
/// installed. An unspecified or undetectable preference reads as
/// [`ColorMode::Light`].
pub fn detect_color_mode() -> ColorMode {
    let detector = COLOR_MODE_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_color_mode_detector() -> ColorMode {
    match dark_light::detect() {
        Ok(OsThemeMode::Dark) => ColorMode::Dark,
        Ok(OsThemeMode::Light) | Ok(OsThemeMode::Unspecified) => ColorMode::Light,
        Err(err) => {
            tracing::debug!(error = %err, "color mode detection failed, assuming light");
            ColorMode::Light
        }
    }
}
