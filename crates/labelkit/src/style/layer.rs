//! Style layers and key-by-key merging.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use super::property::Property;
use super::value::StyleValue;
use crate::error::LoadError;

/// Addresses one entry of a [`StyleLayer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    /// A known property.
    Property(Property),
    /// A custom property, stored with its leading `--`.
    Custom(String),
    /// A nested selector such as `:focus` or `:after`.
    Selector(String),
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKey::Property(p) => f.write_str(p.name()),
            StyleKey::Custom(name) | StyleKey::Selector(name) => f.write_str(name),
        }
    }
}

/// A mapping of style keys to values, composed in priority order.
///
/// A layer has three key spaces:
///
/// - known [`Property`] values
/// - custom properties (`--label-r`), an open extension map
/// - nested selector sub-layers (`:focus`, `:after`, `&:hover`)
///
/// [`merge`](StyleLayer::merge) replaces key by key. Nested sub-layers are leaf
/// values: a sub-layer present in the later layer replaces the earlier one
/// wholesale rather than being merged into it.
///
/// ```rust
/// use labelkit::{Property, StyleLayer};
///
/// let base = StyleLayer::new()
///     .set(Property::Position, "relative")
///     .set(Property::BorderWidth, 1);
/// let over = StyleLayer::new().set(Property::BorderWidth, 2);
///
/// let merged = base.merge(&over);
/// assert_eq!(merged.get(Property::BorderWidth), Some(&2.into()));
/// assert_eq!(merged.get(Property::Position), Some(&"relative".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleLayer {
    name: Option<String>,
    properties: BTreeMap<Property, StyleValue>,
    custom: BTreeMap<String, String>,
    nested: BTreeMap<String, StyleLayer>,
}

impl StyleLayer {
    /// Creates an empty, unnamed layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty layer with a name (used in logs and diagnostics).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets a property, consuming and returning the layer.
    pub fn set(mut self, property: Property, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Sets a custom property. The `--` prefix is added when missing.
    pub fn set_custom(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_custom(name, value);
        self
    }

    /// Sets a nested selector sub-layer.
    pub fn nest(mut self, selector: impl Into<String>, layer: StyleLayer) -> Self {
        self.insert_nested(selector, layer);
        self
    }

    pub fn insert(&mut self, property: Property, value: impl Into<StyleValue>) {
        self.properties.insert(property, value.into());
    }

    pub fn insert_custom(&mut self, name: &str, value: impl Into<String>) {
        self.custom.insert(custom_name(name), value.into());
    }

    pub fn insert_nested(&mut self, selector: impl Into<String>, layer: StyleLayer) {
        self.nested.insert(selector.into(), layer);
    }

    /// Removes a key, returning whether it was present.
    pub fn remove(&mut self, key: &StyleKey) -> bool {
        match key {
            StyleKey::Property(p) => self.properties.remove(p).is_some(),
            StyleKey::Custom(name) => self.custom.remove(name).is_some(),
            StyleKey::Selector(sel) => self.nested.remove(sel).is_some(),
        }
    }

    pub fn get(&self, property: Property) -> Option<&StyleValue> {
        self.properties.get(&property)
    }

    /// Looks up a custom property, with or without its `--` prefix.
    pub fn custom(&self, name: &str) -> Option<&str> {
        self.custom.get(&custom_name(name)).map(String::as_str)
    }

    pub fn nested(&self, selector: &str) -> Option<&StyleLayer> {
        self.nested.get(selector)
    }

    pub fn contains_key(&self, key: &StyleKey) -> bool {
        match key {
            StyleKey::Property(p) => self.properties.contains_key(p),
            StyleKey::Custom(name) => self.custom.contains_key(name),
            StyleKey::Selector(sel) => self.nested.contains_key(sel),
        }
    }

    /// All keys: properties, then custom properties, then selectors.
    pub fn keys(&self) -> impl Iterator<Item = StyleKey> + '_ {
        self.properties
            .keys()
            .map(|p| StyleKey::Property(*p))
            .chain(self.custom.keys().map(|k| StyleKey::Custom(k.clone())))
            .chain(self.nested.keys().map(|k| StyleKey::Selector(k.clone())))
    }

    pub fn len(&self) -> usize {
        self.properties.len() + self.custom.len() + self.nested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy holding only the custom properties.
    pub fn custom_only(&self) -> StyleLayer {
        StyleLayer {
            name: self.name.clone(),
            custom: self.custom.clone(),
            ..StyleLayer::default()
        }
    }

    /// Returns a new layer with `other` applied on top of `self`.
    ///
    /// The result keeps `self`'s name unless it has none.
    pub fn merge(&self, other: &StyleLayer) -> StyleLayer {
        let mut merged = self.clone();
        merged.apply(other);
        merged
    }

    /// Applies `other` on top of `self` in place.
    pub fn apply(&mut self, other: &StyleLayer) {
        for (property, value) in &other.properties {
            self.properties.insert(*property, value.clone());
        }
        for (name, value) in &other.custom {
            self.custom.insert(name.clone(), value.clone());
        }
        for (selector, layer) in &other.nested {
            self.nested.insert(selector.clone(), layer.clone());
        }
        if self.name.is_none() {
            self.name = other.name.clone();
        }
    }

    /// Converts to a JSON object as consumed by the rendering layer.
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (property, value) in &self.properties {
            map.insert(property.name().to_string(), value.to_json());
        }
        for (name, value) in &self.custom {
            map.insert(name.clone(), JsonValue::String(value.clone()));
        }
        for (selector, layer) in &self.nested {
            map.insert(selector.clone(), layer.to_json());
        }
        JsonValue::Object(map)
    }

    /// Parses a layer from YAML.
    ///
    /// Keys are known properties (camelCase or kebab-case), custom properties
    /// (`--name`) or nested selectors whose value is a mapping:
    ///
    /// ```rust
    /// use labelkit::{Property, StyleLayer};
    ///
    /// let layer = StyleLayer::from_yaml(r##"
    /// border-radius: 999px
    /// paddingRight: 0
    /// --accent: "#0969da"
    /// ":focus":
    ///   outline: none
    /// "##).unwrap();
    ///
    /// assert_eq!(layer.get(Property::BorderRadius), Some(&"999px".into()));
    /// assert_eq!(layer.custom("accent"), Some("#0969da"));
    /// assert!(layer.nested(":focus").is_some());
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| LoadError::Parse {
                path: None,
                message: e.to_string(),
            })?;
        match value {
            serde_yaml::Value::Null => Ok(StyleLayer::new()),
            serde_yaml::Value::Mapping(map) => parse_mapping(&map),
            other => Err(LoadError::Parse {
                path: None,
                message: format!("expected a mapping of style keys, got {:?}", other),
            }),
        }
    }

    /// Reads a YAML layer from disk, naming it after the file stem.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut layer = Self::from_yaml(&content).map_err(|e| e.with_path(path))?;
        layer.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        Ok(layer)
    }
}

impl Serialize for StyleLayer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn custom_name(name: &str) -> String {
    if name.starts_with("--") {
        name.to_string()
    } else {
        format!("--{}", name)
    }
}

/// Selector keys start with `:` or contain characters no property name has.
fn is_selector(key: &str) -> bool {
    key.starts_with(':') || key.contains(['&', ' ', '[', '>', '.', '#'])
}

fn parse_mapping(map: &serde_yaml::Mapping) -> Result<StyleLayer, LoadError> {
    let mut layer = StyleLayer::new();

    for (key, value) in map {
        let key = key.as_str().ok_or_else(|| LoadError::Parse {
            path: None,
            message: format!("style keys must be strings, got {:?}", key),
        })?;

        if value.is_null() {
            continue;
        }

        if key.starts_with("--") {
            layer.insert_custom(key, scalar_text(key, value)?);
        } else if is_selector(key) {
            let nested = value.as_mapping().ok_or_else(|| LoadError::InvalidValue {
                key: key.to_string(),
                message: "selector blocks must be mappings".to_string(),
            })?;
            layer.insert_nested(key, parse_mapping(nested)?);
        } else {
            let property = Property::from_name(key).ok_or_else(|| LoadError::UnknownProperty {
                key: key.to_string(),
            })?;
            if layer.properties.contains_key(&property) {
                return Err(LoadError::InvalidValue {
                    key: key.to_string(),
                    message: format!("'{}' is already set in this block", property.name()),
                });
            }
            let style_value = match value {
                serde_yaml::Value::Number(n) => match n.as_f64() {
                    Some(f) => StyleValue::Number(f),
                    None => StyleValue::Text(n.to_string()),
                },
                _ => StyleValue::Text(scalar_text(key, value)?),
            };
            layer.insert(property, style_value);
        }
    }

    Ok(layer)
}

fn scalar_text(key: &str, value: &serde_yaml::Value) -> Result<String, LoadError> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(LoadError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a string or number, got {:?}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // =========================================================================
    // Merge semantics
    // =========================================================================

    #[test]
    fn test_merge_later_wins_key_by_key() {
        let defaults = StyleLayer::new()
            .set_custom("a", "1")
            .set_custom("b", "1");
        let derived = StyleLayer::new()
            .set_custom("b", "2")
            .set_custom("c", "2");

        let merged = defaults.merge(&derived);
        assert_eq!(merged.custom("a"), Some("1"));
        assert_eq!(merged.custom("b"), Some("2"));
        assert_eq!(merged.custom("c"), Some("2"));
    }

    #[test]
    fn test_merge_replaces_nested_wholesale() {
        let earlier = StyleLayer::new().nest(
            ":after",
            StyleLayer::new()
                .set(Property::Content, "\"\"")
                .set(Property::Display, "block"),
        );
        let later = StyleLayer::new().nest(
            ":after",
            StyleLayer::new().set(Property::Display, "none"),
        );

        let merged = earlier.merge(&later);
        let after = merged.nested(":after").unwrap();
        assert_eq!(after.get(Property::Display), Some(&"none".into()));
        assert_eq!(after.get(Property::Content), None);
    }

    #[test]
    fn test_merge_keeps_first_name() {
        let a = StyleLayer::named("defaults");
        let b = StyleLayer::named("override");
        assert_eq!(a.merge(&b).name(), Some("defaults"));
        assert_eq!(StyleLayer::new().merge(&b).name(), Some("override"));
    }

    #[test]
    fn test_custom_only() {
        let layer = StyleLayer::named("derived")
            .set(Property::Color, "red")
            .set_custom("label-r", "1")
            .nest(":focus", StyleLayer::new());
        let custom = layer.custom_only();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.custom("label-r"), Some("1"));
        assert_eq!(custom.name(), Some("derived"));
    }

    #[test]
    fn test_keys_and_remove() {
        let mut layer = StyleLayer::new()
            .set(Property::Color, "red")
            .set_custom("--x", "1")
            .nest(":focus", StyleLayer::new());
        assert_eq!(layer.len(), 3);
        let keys: Vec<String> = layer.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["color", "--x", ":focus"]);

        assert!(layer.remove(&StyleKey::Custom("--x".to_string())));
        assert!(!layer.contains_key(&StyleKey::Custom("--x".to_string())));
        assert_eq!(layer.len(), 2);
    }

    // =========================================================================
    // JSON output
    // =========================================================================

    #[test]
    fn test_to_json_shape() {
        let layer = StyleLayer::new()
            .set(Property::BorderWidth, 1)
            .set(Property::BorderStyle, "solid")
            .set_custom("label-r", "153")
            .nest(":focus", StyleLayer::new().set(Property::Outline, "none"));

        assert_eq!(
            layer.to_json(),
            serde_json::json!({
                "borderWidth": 1,
                "borderStyle": "solid",
                "--label-r": "153",
                ":focus": { "outline": "none" }
            })
        );
    }

    // =========================================================================
    // YAML loading
    // =========================================================================

    #[test]
    fn test_from_yaml_rejects_kebab_and_camel_repeat() {
        let err = StyleLayer::from_yaml("border-color: red\nborderColor: blue\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { ref key, .. } if key == "borderColor"));
        assert!(err.to_string().contains("borderColor"));
    }

    #[test]
    fn test_from_yaml_same_property_in_separate_blocks() {
        let layer = StyleLayer::from_yaml("color: red\n':focus':\n  color: blue\n").unwrap();
        assert_eq!(layer.get(Property::Color), Some(&"red".into()));
        assert_eq!(layer.nested(":focus").unwrap().get(Property::Color), Some(&"blue".into()));
    }

    #[test]
    fn test_from_yaml_nested_selector() {
        let yaml = r#"
color: fg.muted
'li[aria-disabled="true"] &':
  color: inherit
"#;
        let layer = StyleLayer::from_yaml(yaml).unwrap();
        let nested = layer.nested(r#"li[aria-disabled="true"] &"#).unwrap();
        assert_eq!(nested.get(Property::Color), Some(&"inherit".into()));
    }

    #[test]
    fn test_from_yaml_unknown_property() {
        let err = StyleLayer::from_yaml("colour: red").unwrap_err();
        assert!(matches!(err, LoadError::UnknownProperty { ref key } if key == "colour"));
    }

    #[test]
    fn test_from_yaml_selector_needs_mapping() {
        let err = StyleLayer::from_yaml("':focus': none").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_yaml_not_a_mapping() {
        assert!(matches!(
            StyleLayer::from_yaml("- a\n- b").unwrap_err(),
            LoadError::Parse { .. }
        ));
        assert!(StyleLayer::from_yaml("").unwrap().is_empty());
    }

    #[test]
    fn test_from_yaml_skips_nulls() {
        let layer = StyleLayer::from_yaml("paddingRight: ~\nposition: relative").unwrap();
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_from_file_names_layer() {
        let mut file = tempfile::Builder::new()
            .prefix("override")
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(file, "zIndex: 2").unwrap();

        let layer = StyleLayer::from_file(file.path()).unwrap();
        assert_eq!(layer.get(Property::ZIndex), Some(&2.into()));
        assert!(layer.name().unwrap().starts_with("override"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = StyleLayer::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
