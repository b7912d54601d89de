//! Style values.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::color::{fmt_number, CssColor};

/// The value of a single style property.
///
/// Numbers are kept numeric so the rendering layer can apply its own unit
/// and scale conventions (`borderWidth: 1`, `zIndex: 1`).
///
/// ```rust
/// use labelkit::StyleValue;
///
/// let keyword: StyleValue = "relative".into();
/// let width: StyleValue = 1.into();
/// assert_eq!(keyword.to_string(), "relative");
/// assert_eq!(width.to_string(), "1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A keyword, color, length or any other textual value.
    Text(String),
    /// A bare number.
    Number(f64),
}

impl StyleValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Number(n) => f.write_str(&fmt_number(*n)),
        }
    }
}

impl StyleValue {
    /// The JSON form handed to the rendering layer. Whole numbers become integers.
    pub fn to_json(&self) -> JsonValue {
        match self {
            StyleValue::Text(s) => JsonValue::String(s.clone()),
            StyleValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                JsonValue::from(*n as i64)
            }
            StyleValue::Number(n) => JsonValue::from(*n),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(f64::from(n))
    }
}

impl From<CssColor> for StyleValue {
    fn from(color: CssColor) -> Self {
        StyleValue::Text(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_value_from_str() {
        let value: StyleValue = "solid".into();
        assert_eq!(value.as_text(), Some("solid"));
        assert_eq!(value.as_number(), None);
    }

    #[test]
    fn test_style_value_from_color() {
        let value: StyleValue = CssColor::Rgb { r: 1, g: 2, b: 3 }.into();
        assert_eq!(value, StyleValue::Text("rgb(1,2,3)".to_string()));
    }

    #[test]
    fn test_to_json_matches_serialize() {
        for value in [StyleValue::from(2), StyleValue::from(0.25), StyleValue::from("auto")] {
            assert_eq!(serde_json::to_value(&value).unwrap(), value.to_json());
        }
        assert_eq!(StyleValue::from(-3).to_json(), serde_json::json!(-3));
    }

    #[test]
    fn test_serialize_whole_numbers_as_integers() {
        assert_eq!(serde_json::to_string(&StyleValue::from(1)).unwrap(), "1");
        assert_eq!(serde_json::to_string(&StyleValue::from(0.5)).unwrap(), "0.5");
        assert_eq!(
            serde_json::to_string(&StyleValue::from("none")).unwrap(),
            "\"none\""
        );
    }
}
