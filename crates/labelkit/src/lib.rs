//! # Labelkit - Adaptive Label Colors and Style Composition
//!
//! `labelkit` derives legible label styling from a single user-chosen fill
//! color, and merges style layers into the final style a component renders
//! with.
//!
//! ## Core Concepts
//!
//! - [`derive`]: Compute background, text and border colors for a fill color
//!   in a [`ColorMode`]
//! - [`DerivedStyle`]: The derived colors plus the published intermediate
//!   quantities (`--label-r`, `--lightness-switch`, ...)
//! - [`StyleLayer`]: A mapping of properties, custom properties and nested
//!   selectors that merges key by key
//! - [`compose`]: Stack structural defaults, derived values and a caller
//!   override, or delegate to a style class
//! - [`StylingStrategy`]: Inline or class-delegated styling, picked once from a
//!   feature flag
//! - [`LabelToken`], [`Description`] and [`Radio`]: Components built on the above
//!
//! ## Quick Start
//!
//! ```rust
//! use labelkit::{derive, ColorMode};
//!
//! let dark_fill = derive("#000000", ColorMode::Light, false).unwrap();
//! assert_eq!(dark_fill.lightness_switch, 1.0);
//! assert_eq!(dark_fill.text.to_string(), "hsl(0,0%,100%)");
//!
//! let on_dark_page = derive("#000000", ColorMode::Dark, false).unwrap();
//! assert_eq!(on_dark_page.background.to_string(), "rgba(0,0,0,0.18)");
//! assert_eq!(on_dark_page.text.to_string(), "hsl(0,0%,60%)");
//! ```
//!
//! ## Composing a Component Style
//!
//! ```rust
//! use labelkit::{ColorMode, DeriveCache, FeatureFlags, LabelToken, Property, StyleLayer};
//!
//! let flags = FeatureFlags::from_yaml("css_modules_ga: false").unwrap();
//! let strategy = LabelToken::select_strategy(&flags);
//! let caller = StyleLayer::from_yaml("zIndex: 2").unwrap();
//!
//! let mut cache = DeriveCache::new();
//! let composed = LabelToken::new("enhancement")
//!     .fill_color("#a2eeef")
//!     .style(ColorMode::Light, &strategy, Some(&caller), &mut cache)
//!     .unwrap();
//!
//! assert_eq!(composed.class_name, None);
//! assert_eq!(composed.style.get(Property::ZIndex), Some(&2.into()));
//! assert_eq!(composed.style.get(Property::BorderStyle), Some(&"solid".into()));
//! ```
//!
//! ## Light & Dark
//!
//! [`detect_color_mode`] asks the OS for its appearance. Tests and embedders
//! can swap the detector with [`set_theme_detector`].

pub mod adapter;
pub mod color;
pub mod components;
pub mod compose;
mod error;
pub mod flags;
pub mod style;
pub mod theme;

// Error types
pub use error::{InvalidColorError, LabelError, LoadError, Result};

// Color exports
pub use color::{parse_rgba, Color, CssColor, Hsl, Rgba};

// Adapter exports
pub use adapter::{
    derive, derive_color, threshold, CacheStats, DeriveCache, DerivedStyle, Selection,
    BORDER_THRESHOLD, DARK_BACKGROUND_ALPHA, DARK_BORDER_ALPHA, DARK_LIGHTNESS_THRESHOLD,
    LIGHT_LIGHTNESS_THRESHOLD, TOKEN_BORDER_WIDTH_PX,
};

// Theme exports
pub use theme::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};

// Style exports
pub use style::{Property, StyleKey, StyleLayer, StyleValue};

// Composition exports
pub use compose::{class_names, compose, ClassVariant, ComposedStyle, StylingStrategy};

// Flag exports
pub use flags::{FeatureFlags, FlagLookup, CSS_MODULES_GA, CSS_MODULES_TEAM};

// Component exports
pub use components::{
    Description, DescriptionVariant, LabelToken, Radio, DEFAULT_FILL_COLOR, DESCRIPTION_CLASS,
    DESCRIPTION_DATA_COMPONENT, INPUT_CLASS, LABEL_TOKEN_CLASS, LABEL_TOKEN_SELECTED_CLASS,
    RADIO_CLASS,
};
