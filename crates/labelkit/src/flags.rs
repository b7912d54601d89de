//! Feature-flag lookup.
//!
//! Components ask a [`FlagLookup`] whether a flag is on exactly once per style
//! computation; the answer selects a styling strategy (see
//! [`StylingStrategy::select`](crate::StylingStrategy::select)). How flags are
//! stored is up to the caller. [`FeatureFlags`] is a simple set that can be
//! built in code or loaded from YAML:
//!
//! ```yaml
//! css_modules_ga: true
//! css_modules_team: false
//! ```
//!
//! Closures work too:
//!
//! ```rust
//! use labelkit::FlagLookup;
//!
//! let all_on = |_: &str| true;
//! assert!(all_on.is_enabled("css_modules_ga"));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::LoadError;

/// Moves generally-available components onto class-based styling.
pub const CSS_MODULES_GA: &str = "css_modules_ga";
/// Moves team-owned components (list item descriptions) onto class-based styling.
pub const CSS_MODULES_TEAM: &str = "css_modules_team";

/// Answers whether a named feature flag is enabled.
pub trait FlagLookup {
    fn is_enabled(&self, flag: &str) -> bool;
}

impl<F> FlagLookup for F
where
    F: Fn(&str) -> bool,
{
    fn is_enabled(&self, flag: &str) -> bool {
        self(flag)
    }
}

/// A set of flag values. Unknown flags are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    flags: BTreeMap<String, bool>,
}

impl FeatureFlags {
    /// Creates a set with every flag disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a flag, consuming and returning the set.
    pub fn with(mut self, flag: impl Into<String>, enabled: bool) -> Self {
        self.set(flag, enabled);
        self
    }

    pub fn set(&mut self, flag: impl Into<String>, enabled: bool) {
        self.flags.insert(flag.into(), enabled);
    }

    /// Iterates flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, on)| (name.as_str(), *on))
    }

    /// Parses a YAML mapping of flag names to booleans.
    ///
    /// ```rust
    /// use labelkit::{FeatureFlags, FlagLookup};
    ///
    /// let flags = FeatureFlags::from_yaml("css_modules_ga: true").unwrap();
    /// assert!(flags.is_enabled("css_modules_ga"));
    /// assert!(!flags.is_enabled("css_modules_team"));
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| LoadError::Parse {
                path: None,
                message: e.to_string(),
            })?;

        let map = match value {
            serde_yaml::Value::Null => return Ok(Self::new()),
            serde_yaml::Value::Mapping(map) => map,
            other => {
                return Err(LoadError::Parse {
                    path: None,
                    message: format!("expected a mapping of flag names, got {:?}", other),
                })
            }
        };

        let mut flags = Self::new();
        for (key, value) in map {
            let name = key.as_str().ok_or_else(|| LoadError::Parse {
                path: None,
                message: format!("flag names must be strings, got {:?}", key),
            })?;
            let enabled = value.as_bool().ok_or_else(|| LoadError::InvalidValue {
                key: name.to_string(),
                message: format!("expected true or false, got {:?}", value),
            })?;
            flags.set(name, enabled);
        }
        Ok(flags)
    }

    /// Reads a YAML flag file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| e.with_path(path))
    }
}

impl FlagLookup for FeatureFlags {
    fn is_enabled(&self, flag: &str) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }
}
