//! Color mode detection for adaptive label styles.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The display mode label colors are derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light background, dark text.
    #[default]
    Light,
    /// Dark background, light text.
    Dark,
}

impl ColorMode {
    /// Maps a theme provider's color-scheme name to a mode.
    pub fn from_scheme(scheme: &str) -> Self {
        if scheme.trim().to_ascii_lowercase().starts_with("dark") {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(format!("unknown color mode '{}' (expected light or dark)", other)),
        }
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used by [`detect_color_mode`].
///
/// ```rust
/// use labelkit::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
///
/// set_theme_detector(|| ColorMode::Dark);
/// assert_eq!(detect_color_mode(), ColorMode::Dark);
/// reset_theme_detector();
/// ```
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores OS-based detection.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Detects the user's preferred color mode.
///
/// Falls back to [`ColorMode::Light`] when the OS does not report a preference.
pub fn detect_color_mode() -> ColorMode {
    let detector = *THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    detector()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        Ok(OsThemeMode::Dark) => ColorMode::Dark,
        Ok(OsThemeMode::Light) => ColorMode::Light,
        Ok(OsThemeMode::Unspecified) => ColorMode::Light,
        Err(err) => {
            tracing::warn!(error = %err, "could not detect OS color mode, using light");
            ColorMode::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_from_scheme() {
        assert_eq!(ColorMode::from_scheme("dark"), ColorMode::Dark);
        assert_eq!(ColorMode::from_scheme("dark_high_contrast"), ColorMode::Dark);
        assert_eq!(ColorMode::from_scheme("light"), ColorMode::Light);
        assert_eq!(ColorMode::from_scheme(""), ColorMode::Light);
        assert_eq!(ColorMode::from_scheme("night"), ColorMode::Light);
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for mode in [ColorMode::Light, ColorMode::Dark] {
            assert_eq!(mode.to_string().parse::<ColorMode>().unwrap(), mode);
        }
        assert!("dim".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ColorMode::Dark).unwrap(), "\"dark\"");
        let mode: ColorMode = serde_yaml::from_str("light").unwrap();
        assert_eq!(mode, ColorMode::Light);
    }

    #[test]
    #[serial]
    fn test_detector_override() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        set_theme_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);

        reset_theme_detector();
    }
}
