//! Color adaptation for label tokens.
//!
//! # Motivation
//!
//! Labels carry arbitrary user-chosen colors. Rendering the label text in a
//! fixed color would make it unreadable on half of them, and a solid fill that
//! looks right on a light page glares on a dark one. The adapter derives, from
//! a single fill color and the current [`ColorMode`], the background, text and
//! border colors that keep the label legible.
//!
//! # Algorithm
//!
//! 1. Parse the color into RGB and (rounded) HSL.
//! 2. `perceived = (0.2126 r + 0.7152 g + 0.0722 b) / 255`
//! 3. `switch = clamp((perceived - threshold(mode)) * -1000, 0, 1)`.
//!    The steep slope makes this a step function: `1` for colors darker than
//!    the threshold, `0` for lighter ones, with a partial value only inside a
//!    band 0.001 wide just below the threshold.
//! 4. Per mode:
//!
//! | | Light (threshold 0.453) | Dark (threshold 0.6) |
//! |---|---|---|
//! | background | solid fill | fill at alpha 0.18 |
//! | text | black or white, `hsl(0, 0%, switch * 100%)` | fill hue, lightness raised by `lighten_by` |
//! | border | fill lightness − 25, alpha `clamp((perceived − 0.96) * 100, 0, 1)` | text color at alpha 0.3 |
//!
//! where `lighten_by = (threshold - perceived) * 100 * switch` (dark only).
//!
//! 5. When selected, the background darkens by 5 lightness points (light mode
//!    only), focus outlines are suppressed, and a 2px halo ring in the fill
//!    color (light) or text color (dark) is drawn around the token.
//!
//! ```rust
//! use labelkit::{derive, ColorMode};
//!
//! let style = derive("#999", ColorMode::Light, false).unwrap();
//! assert_eq!(style.lightness_switch, 0.0);
//! assert_eq!(style.text.to_string(), "hsl(0,0%,0%)");
//! assert_eq!(style.background.to_string(), "rgb(153,153,153)");
//! ```

mod cache;

pub use cache::{CacheStats, DeriveCache};

use serde::Serialize;

use crate::color::{fmt_number, Color, CssColor, Hsl};
use crate::error::InvalidColorError;
use crate::style::{Property, StyleLayer};
use crate::theme::ColorMode;

/// Perceived lightness above which light-mode labels get dark text.
pub const LIGHT_LIGHTNESS_THRESHOLD: f64 = 0.453;
/// Perceived lightness above which dark-mode labels are not lightened.
pub const DARK_LIGHTNESS_THRESHOLD: f64 = 0.6;
/// Perceived lightness above which light-mode labels start showing a border.
pub const BORDER_THRESHOLD: f64 = 0.96;
pub const DARK_BACKGROUND_ALPHA: f64 = 0.18;
pub const DARK_BORDER_ALPHA: f64 = 0.3;

const SWITCH_SLOPE: f64 = -1000.0;
const BORDER_ALPHA_SLOPE: f64 = 100.0;
const BORDER_DARKEN: f64 = 25.0;
const SELECTED_DARKEN: f64 = 5.0;

/// Border width of a label token, in pixels. The selection halo is twice this.
pub const TOKEN_BORDER_WIDTH_PX: f64 = 1.0;
const HALO_RADIUS: &str = "999px";

/// The lightness threshold for a mode.
pub fn threshold(mode: ColorMode) -> f64 {
    match mode {
        ColorMode::Light => LIGHT_LIGHTNESS_THRESHOLD,
        ColorMode::Dark => DARK_LIGHTNESS_THRESHOLD,
    }
}

/// Styles derived from a fill color for one mode and selection state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStyle {
    pub mode: ColorMode,
    pub selected: bool,
    pub rgb: (u8, u8, u8),
    /// Whole-number HSL of the fill color.
    #[serde(serialize_with = "serialize_hsl")]
    pub hsl: Hsl,
    pub perceived_lightness: f64,
    pub lightness_threshold: f64,
    /// `1` for fills darker than the threshold, `0` for lighter ones.
    pub lightness_switch: f64,
    pub border_alpha: f64,
    /// `1` in light mode.
    pub background_alpha: f64,
    /// Lightness points added to the fill for text and border. Always `0` in light mode.
    pub lighten_by: f64,
    #[serde(serialize_with = "serialize_css")]
    pub background: CssColor,
    #[serde(serialize_with = "serialize_css")]
    pub text: CssColor,
    #[serde(serialize_with = "serialize_css")]
    pub border: CssColor,
    pub selection: Option<Selection>,
}

/// The overlay applied to a selected token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    #[serde(serialize_with = "serialize_css")]
    pub background: CssColor,
    #[serde(serialize_with = "serialize_css")]
    pub halo_color: CssColor,
    /// Halo ring width, also used as the outward offset on all four sides.
    pub halo_width_px: f64,
}

/// Parses `color` and derives the label styles for `mode`.
///
/// # Errors
///
/// Returns [`InvalidColorError`] when `color` cannot be parsed. No fallback
/// color is substituted.
pub fn derive(color: &str, mode: ColorMode, selected: bool) -> Result<DerivedStyle, InvalidColorError> {
    let parsed = Color::parse(color)?;
    Ok(derive_color(&parsed, mode, selected))
}

/// Derives the label styles for an already parsed color.
pub fn derive_color(color: &Color, mode: ColorMode, selected: bool) -> DerivedStyle {
    let (r, g, b) = color.rgb();
    let hsl = color.hsl();
    let perceived = color.perceived_lightness();
    let threshold = threshold(mode);
    let switch = unit_clamp((perceived - threshold) * SWITCH_SLOPE);

    tracing::trace!(
        color = color.source(),
        %mode,
        selected,
        perceived,
        switch,
        "deriving label style"
    );

    let (background, text, border, border_alpha, background_alpha, lighten_by) = match mode {
        ColorMode::Light => {
            let border_alpha = unit_clamp((perceived - BORDER_THRESHOLD) * BORDER_ALPHA_SLOPE);
            (
                CssColor::Rgb { r, g, b },
                CssColor::Hsl {
                    h: 0.0,
                    s: 0.0,
                    l: switch * 100.0,
                },
                CssColor::Hsla {
                    h: hsl.h,
                    s: hsl.s,
                    l: hsl.l - BORDER_DARKEN,
                    a: border_alpha,
                },
                border_alpha,
                1.0,
                0.0,
            )
        }
        ColorMode::Dark => {
            let lighten_by = (threshold - perceived) * 100.0 * switch + 0.0;
            (
                CssColor::Rgba {
                    r,
                    g,
                    b,
                    a: DARK_BACKGROUND_ALPHA,
                },
                CssColor::Hsl {
                    h: hsl.h,
                    s: hsl.s,
                    l: hsl.l + lighten_by,
                },
                CssColor::Hsla {
                    h: hsl.h,
                    s: hsl.s,
                    l: hsl.l + lighten_by,
                    a: DARK_BORDER_ALPHA,
                },
                DARK_BORDER_ALPHA,
                DARK_BACKGROUND_ALPHA,
                lighten_by,
            )
        }
    };

    let selection = selected.then(|| match mode {
        ColorMode::Light => Selection {
            background: CssColor::Hsl {
                h: hsl.h,
                s: hsl.s,
                l: hsl.l - SELECTED_DARKEN,
            },
            halo_color: CssColor::Rgb { r, g, b },
            halo_width_px: TOKEN_BORDER_WIDTH_PX * 2.0,
        },
        ColorMode::Dark => Selection {
            background,
            halo_color: text,
            halo_width_px: TOKEN_BORDER_WIDTH_PX * 2.0,
        },
    });

    DerivedStyle {
        mode,
        selected,
        rgb: (r, g, b),
        hsl,
        perceived_lightness: perceived,
        lightness_threshold: threshold,
        lightness_switch: switch,
        border_alpha,
        background_alpha,
        lighten_by,
        background,
        text,
        border,
        selection,
    }
}

impl DerivedStyle {
    /// The background actually shown: the selected variant when selected.
    pub fn effective_background(&self) -> CssColor {
        self.selection
            .as_ref()
            .map(|s| s.background)
            .unwrap_or(self.background)
    }

    /// Publishes the derived values as a style layer.
    ///
    /// The layer carries the `--label-*` custom properties and intermediate
    /// quantities, the resolved `background`, `color` and `borderColor`, and,
    /// when selected, the `:focus` and `:after` sub-layers. It never sets
    /// layout, sizing or typography properties.
    pub fn to_layer(&self) -> StyleLayer {
        let (r, g, b) = self.rgb;
        let mut layer = StyleLayer::named("derived")
            .set_custom("--label-r", r.to_string())
            .set_custom("--label-g", g.to_string())
            .set_custom("--label-b", b.to_string())
            .set_custom("--label-h", fmt_number(self.hsl.h))
            .set_custom("--label-s", fmt_number(self.hsl.s))
            .set_custom("--label-l", fmt_number(self.hsl.l))
            .set_custom("--perceived-lightness", fmt_number(self.perceived_lightness))
            .set_custom("--lightness-threshold", fmt_number(self.lightness_threshold))
            .set_custom("--lightness-switch", fmt_number(self.lightness_switch))
            .set_custom("--border-alpha", fmt_number(self.border_alpha));

        match self.mode {
            ColorMode::Light => {
                layer.insert_custom("--border-threshold", fmt_number(BORDER_THRESHOLD));
            }
            ColorMode::Dark => {
                layer.insert_custom("--background-alpha", fmt_number(self.background_alpha));
                layer.insert_custom("--lighten-by", fmt_number(self.lighten_by));
            }
        }

        layer.insert(Property::Background, self.effective_background());
        layer.insert(Property::Color, self.text);
        layer.insert(Property::BorderColor, self.border);

        if let Some(selection) = &self.selection {
            layer.insert_nested(":focus", StyleLayer::new().set(Property::Outline, "none"));
            layer.insert_nested(":after", halo_layer(selection));
        }

        layer
    }
}

fn halo_layer(selection: &Selection) -> StyleLayer {
    let offset = format!("-{}px", fmt_number(selection.halo_width_px));
    StyleLayer::new()
        .set(Property::Content, "\"\"")
        .set(Property::Position, "absolute")
        .set(Property::ZIndex, 1)
        .set(Property::Top, offset.clone())
        .set(Property::Right, offset.clone())
        .set(Property::Bottom, offset.clone())
        .set(Property::Left, offset)
        .set(Property::Display, "block")
        .set(Property::PointerEvents, "none")
        .set(
            Property::BoxShadow,
            format!(
                "0 0 0 {}px {}",
                fmt_number(selection.halo_width_px),
                selection.halo_color
            ),
        )
        .set(Property::BorderRadius, HALO_RADIUS)
}

/// Clamps to `[0, 1]`, normalizing negative zero.
fn unit_clamp(value: f64) -> f64 {
    value.clamp(0.0, 1.0) + 0.0
}

fn serialize_css<S: serde::Serializer>(color: &CssColor, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(color)
}

fn serialize_hsl<S: serde::Serializer>(hsl: &Hsl, serializer: S) -> Result<S::Ok, S::Error> {
    (hsl.h, hsl.s, hsl.l).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Light mode
    // =========================================================================

    #[test]
    fn test_light_mid_gray() {
        let style = derive("#999", ColorMode::Light, false).unwrap();
        assert_eq!(style.rgb, (153, 153, 153));
        assert!((style.perceived_lightness - 0.6).abs() < 1e-9);
        assert_eq!(style.lightness_switch, 0.0);
        assert_eq!(style.text.to_string(), "hsl(0,0%,0%)");
        assert_eq!(style.background.to_string(), "rgb(153,153,153)");
        assert_eq!(style.border_alpha, 0.0);
        assert_eq!(style.border.to_string(), "hsla(0,0%,35%,0)");
        assert!(style.selection.is_none());
    }

    #[test]
    fn test_light_dark_fill_gets_white_text() {
        let style = derive("#d73a4a", ColorMode::Light, false).unwrap();
        assert!(style.perceived_lightness < LIGHT_LIGHTNESS_THRESHOLD);
        assert_eq!(style.lightness_switch, 1.0);
        assert_eq!(style.text.to_string(), "hsl(0,0%,100%)");
        assert_eq!(style.border.to_string(), "hsla(354,66%,29%,0)");
    }

    #[test]
    fn test_light_near_white_gets_border() {
        let style = derive("#ffffff", ColorMode::Light, false).unwrap();
        assert_eq!(style.border_alpha, 1.0);
        assert_eq!(style.border.to_string(), "hsla(0,0%,75%,1)");

        let almost = derive("#f6f6f6", ColorMode::Light, false).unwrap();
        assert!(almost.border_alpha > 0.0 && almost.border_alpha < 1.0);
    }

    #[test]
    fn test_light_mode_never_lightens() {
        let style = derive("#000", ColorMode::Light, false).unwrap();
        assert_eq!(style.lighten_by, 0.0);
        assert_eq!(style.background_alpha, 1.0);
    }

    // =========================================================================
    // Dark mode
    // =========================================================================

    #[test]
    fn test_dark_mid_gray_not_lightened() {
        let style = derive("#999", ColorMode::Dark, false).unwrap();
        assert_eq!(style.background_alpha, 0.18);
        assert_eq!(style.border_alpha, 0.3);
        assert_eq!(style.lighten_by, 0.0);
        assert_eq!(style.background.to_string(), "rgba(153,153,153,0.18)");
        assert_eq!(style.text.to_string(), "hsl(0,0%,60%)");
        assert_eq!(style.border.to_string(), "hsla(0,0%,60%,0.3)");
    }

    #[test]
    fn test_dark_lightens_dark_fills() {
        let style = derive("#d73a4a", ColorMode::Dark, false).unwrap();
        assert_eq!(style.lightness_switch, 1.0);
        let expected = (DARK_LIGHTNESS_THRESHOLD - style.perceived_lightness) * 100.0;
        assert!((style.lighten_by - expected).abs() < 1e-9);
        assert!(style.lighten_by > 0.0);
        match style.text {
            CssColor::Hsl { l, .. } => assert!((l - (54.0 + expected)).abs() < 1e-9),
            other => panic!("expected hsl text, got {:?}", other),
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn test_selected_light() {
        let style = derive("#d73a4a", ColorMode::Light, true).unwrap();
        let selection = style.selection.as_ref().unwrap();
        assert_eq!(selection.background.to_string(), "hsl(354,66%,49%)");
        assert_eq!(selection.halo_color.to_string(), "rgb(215,58,74)");
        assert_eq!(selection.halo_width_px, 2.0);
        assert_eq!(style.effective_background(), selection.background);
    }

    #[test]
    fn test_selected_dark_keeps_background() {
        let unselected = derive("#d73a4a", ColorMode::Dark, false).unwrap();
        let selected = derive("#d73a4a", ColorMode::Dark, true).unwrap();
        let selection = selected.selection.as_ref().unwrap();
        assert_eq!(selection.background, unselected.background);
        assert_eq!(selection.halo_color, unselected.text);
    }

    // =========================================================================
    // Published layer
    // =========================================================================

    #[test]
    fn test_layer_variables_light() {
        let layer = derive("#999", ColorMode::Light, false).unwrap().to_layer();
        assert_eq!(layer.custom("--label-r"), Some("153"));
        assert_eq!(layer.custom("--label-h"), Some("0"));
        assert_eq!(layer.custom("--label-l"), Some("60"));
        assert_eq!(layer.custom("--perceived-lightness"), Some("0.6"));
        assert_eq!(layer.custom("--lightness-threshold"), Some("0.453"));
        assert_eq!(layer.custom("--border-threshold"), Some("0.96"));
        assert_eq!(layer.custom("--lighten-by"), None);
        assert_eq!(layer.get(Property::Background), Some(&"rgb(153,153,153)".into()));
        assert_eq!(layer.get(Property::BorderWidth), None);
        assert!(layer.nested(":after").is_none());
    }

    #[test]
    fn test_layer_variables_dark() {
        let layer = derive("#999", ColorMode::Dark, false).unwrap().to_layer();
        assert_eq!(layer.custom("--background-alpha"), Some("0.18"));
        assert_eq!(layer.custom("--border-alpha"), Some("0.3"));
        assert_eq!(layer.custom("--lighten-by"), Some("0"));
        assert_eq!(layer.custom("--border-threshold"), None);
    }

    #[test]
    fn test_layer_selected_halo() {
        let layer = derive("#999", ColorMode::Light, true).unwrap().to_layer();
        let focus = layer.nested(":focus").unwrap();
        assert_eq!(focus.get(Property::Outline), Some(&"none".into()));

        let after = layer.nested(":after").unwrap();
        assert_eq!(after.get(Property::Top), Some(&"-2px".into()));
        assert_eq!(after.get(Property::Left), Some(&"-2px".into()));
        assert_eq!(
            after.get(Property::BoxShadow),
            Some(&"0 0 0 2px rgb(153,153,153)".into())
        );
        assert_eq!(after.get(Property::BorderRadius), Some(&"999px".into()));
        assert_eq!(layer.get(Property::Background), Some(&"hsl(0,0%,55%)".into()));
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_invalid_color_propagates() {
        let err = derive("not-a-color", ColorMode::Light, false).unwrap_err();
        assert_eq!(err.input, "not-a-color");
    }

    #[test]
    fn test_threshold_per_mode() {
        assert_eq!(threshold(ColorMode::Light), 0.453);
        assert_eq!(threshold(ColorMode::Dark), 0.6);
    }
}
