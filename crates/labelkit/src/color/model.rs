//! Color model types: RGB, HSL and formatted CSS color values.

use std::fmt;

/// Luminance weights applied to the red, green and blue channels.
pub const LUMINANCE_WEIGHTS: (f64, f64, f64) = (0.2126, 0.7152, 0.0722);

/// An sRGB color with 8-bit channels and a unit alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// Creates an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns the `(r, g, b)` triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Luminance-weighted brightness in `[0, 1]`.
    ///
    /// ```rust
    /// use labelkit::color::Rgba;
    ///
    /// assert_eq!(Rgba::opaque(153, 153, 153).perceived_lightness(), 0.6);
    /// assert_eq!(Rgba::opaque(255, 255, 255).perceived_lightness(), 1.0);
    /// ```
    pub fn perceived_lightness(&self) -> f64 {
        let (wr, wg, wb) = LUMINANCE_WEIGHTS;
        let weighted = wr * f64::from(self.r) + wg * f64::from(self.g) + wb * f64::from(self.b);
        // Snap float noise so gray channels land exactly on their lightness.
        round_to(weighted / 255.0, 9)
    }

    /// Converts to HSL with fractional components.
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h * 60.0, s * 100.0, l * 100.0)
    }
}

/// A hue/saturation/lightness triple.
///
/// Hue is in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Creates a triple, wrapping the hue and clamping the percentages.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Rounds every component to a whole number.
    ///
    /// A hue that rounds up to 360 wraps to 0.
    pub fn rounded(&self) -> Self {
        Self::new(self.h.round(), self.s.round(), self.l.round())
    }

    /// Converts to 8-bit RGB channels.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = self.h / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        if s == 0.0 {
            let v = to_channel(l);
            return (v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A color value as handed to the rendering layer.
///
/// Lightness is clamped to `[0, 100]` and alpha to `[0, 1]` when formatted, so
/// adjustments like "25 points darker" never produce out-of-range CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssColor {
    Rgb { r: u8, g: u8, b: u8 },
    Rgba { r: u8, g: u8, b: u8, a: f64 },
    Hsl { h: f64, s: f64, l: f64 },
    Hsla { h: f64, s: f64, l: f64, a: f64 },
}

impl CssColor {
    /// The alpha channel (1 for the opaque forms).
    pub fn alpha(&self) -> f64 {
        match self {
            CssColor::Rgb { .. } | CssColor::Hsl { .. } => 1.0,
            CssColor::Rgba { a, .. } | CssColor::Hsla { a, .. } => *a,
        }
    }

    /// Resolves to 8-bit RGB, e.g. for terminal previews.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match *self {
            CssColor::Rgb { r, g, b } | CssColor::Rgba { r, g, b, .. } => (r, g, b),
            CssColor::Hsl { h, s, l } | CssColor::Hsla { h, s, l, .. } => Hsl::new(h, s, l).to_rgb(),
        }
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CssColor::Rgb { r, g, b } => write!(f, "rgb({},{},{})", r, g, b),
            CssColor::Rgba { r, g, b, a } => {
                write!(f, "rgba({},{},{},{})", r, g, b, fmt_number(a.clamp(0.0, 1.0)))
            }
            CssColor::Hsl { h, s, l } => write!(
                f,
                "hsl({},{}%,{}%)",
                fmt_number(h),
                fmt_number(s),
                fmt_number(l.clamp(0.0, 100.0))
            ),
            CssColor::Hsla { h, s, l, a } => write!(
                f,
                "hsla({},{}%,{}%,{})",
                fmt_number(h),
                fmt_number(s),
                fmt_number(l.clamp(0.0, 100.0)),
                fmt_number(a.clamp(0.0, 1.0))
            ),
        }
    }
}

/// Formats a number with at most four decimals and no trailing zeros.
///
/// ```rust
/// use labelkit::color::fmt_number;
///
/// assert_eq!(fmt_number(0.18), "0.18");
/// assert_eq!(fmt_number(153.0), "153");
/// assert_eq!(fmt_number(-0.0), "0");
/// ```
pub fn fmt_number(value: f64) -> String {
    let rounded = round_to(value, 4);
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.4}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
