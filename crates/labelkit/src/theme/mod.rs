//! Light/dark color mode.
//!
//! The adapter never reads the mode from ambient state: callers pass a
//! [`ColorMode`] explicitly. This module only helps the calling layer obtain
//! one, either from a color-scheme name or from the operating system.
//!
//! ## Scheme Names
//!
//! Theme providers usually expose a scheme name such as `light`,
//! `light_high_contrast`, `dark` or `dark_dimmed`. Any scheme beginning with
//! `dark` maps to [`ColorMode::Dark`]; everything else is light:
//!
//! ```rust
//! use labelkit::ColorMode;
//!
//! assert_eq!(ColorMode::from_scheme("dark_dimmed"), ColorMode::Dark);
//! assert_eq!(ColorMode::from_scheme("light_colorblind"), ColorMode::Light);
//! ```
//!
//! ## OS Detection
//!
//! [`detect_color_mode`] queries the OS. Override it for testing with
//! [`set_theme_detector`]:
//!
//! ```rust,ignore
//! labelkit::set_theme_detector(|| ColorMode::Dark);
//! ```

mod adaptive;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
