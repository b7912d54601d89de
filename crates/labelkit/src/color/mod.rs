//! Color parsing and the color model used by the label adapter.
//!
//! A [`Color`] is parsed once from any CSS notation (hex, `rgb()`, `hsl()`,
//! named) and then exposes both representations the adapter needs:
//!
//! - [`Color::rgb`]: the 8-bit `(r, g, b)` triple
//! - [`Color::hsl`]: hue, saturation and lightness rounded to whole units,
//!   derived from the RGB channels
//! - [`Color::perceived_lightness`]: luminance-weighted brightness in `[0, 1]`
//!
//! ```rust
//! use labelkit::color::Color;
//!
//! let gray: Color = "#999".parse().unwrap();
//! assert_eq!(gray.rgb(), (153, 153, 153));
//! assert_eq!(gray.hsl().l, 60.0);
//! assert_eq!(gray.perceived_lightness(), 0.6);
//! ```

mod model;
mod named;
mod parse;

use std::fmt;
use std::str::FromStr;

pub use model::{fmt_number, CssColor, Hsl, Rgba, LUMINANCE_WEIGHTS};
pub use parse::parse_rgba;

use crate::error::InvalidColorError;

/// A parsed, immutable color.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    source: String,
    rgba: Rgba,
    hsl: Hsl,
}

impl Color {
    /// Parses a color from any supported CSS notation.
    pub fn parse(input: &str) -> Result<Self, InvalidColorError> {
        let rgba = parse_rgba(input)?;
        Ok(Self {
            source: input.to_string(),
            hsl: rgba.to_hsl().rounded(),
            rgba,
        })
    }

    /// The string this color was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rgba(&self) -> Rgba {
        self.rgba
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgba.rgb()
    }

    /// HSL with whole-number components.
    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn perceived_lightness(&self) -> f64 {
        self.rgba.perceived_lightness()
    }
}

impl FromStr for Color {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_keeps_source() {
        let c = Color::parse("rgb(215, 58, 74)").unwrap();
        assert_eq!(c.source(), "rgb(215, 58, 74)");
        assert_eq!(c.to_string(), "rgb(215, 58, 74)");
    }

    #[test]
    fn test_hsl_derived_from_rgb() {
        let from_hex = Color::parse("#d73a4a").unwrap();
        let from_hsl = Color::parse("hsl(354, 66%, 54%)").unwrap();
        assert_eq!(from_hex.hsl(), Hsl::new(354.0, 66.0, 54.0));
        // Both notations publish the same rounded HSL.
        assert_eq!(from_hsl.hsl().h, 354.0);
        assert_eq!(from_hsl.hsl().s, 66.0);
        assert_eq!(from_hsl.hsl().l, 54.0);
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<Color>().unwrap_err();
        assert_eq!(err.input, "nope");
    }
}
