//! Style composition.
//!
//! # Precedence
//!
//! Inline composition stacks three layers, later winning key by key:
//!
//! ```text
//! structural defaults  <  derived  <  caller override
//! ```
//!
//! # Two Strategies
//!
//! A component can be styled either inline (every value computed and handed
//! to the rendering layer) or by delegating to a pre-defined style class. The
//! choice is a runtime feature flag evaluated once, turned into a
//! [`StylingStrategy`], and each strategy has its own code path:
//!
//! - [`StylingStrategy::Inline`]: defaults, then derived, then the caller override.
//! - [`StylingStrategy::ClassDelegated`]: the class name plus the variant's own
//!   layer, which holds only what the class cannot know (per-instance custom
//!   properties, prop-dependent tweaks). Defaults, derived and caller-override
//!   keys are dropped unless the variant layer carries them itself.
//!
//! Both paths accept the same inputs, so components keep one public contract
//! whichever backend is active.
//!
//! ```rust
//! use labelkit::{compose, ClassVariant, Property, StyleLayer};
//!
//! let defaults = StyleLayer::new().set(Property::Position, "relative");
//! let derived = StyleLayer::new().set(Property::Color, "white");
//! let caller = StyleLayer::new().set(Property::ZIndex, 2);
//!
//! let inline = compose(&defaults, &derived, None, Some(&caller));
//! assert_eq!(inline.class_name, None);
//! assert_eq!(inline.style.len(), 3);
//!
//! let variant = ClassVariant::new("Token");
//! let classed = compose(&defaults, &derived, Some(&variant), Some(&caller));
//! assert_eq!(classed.class_name.as_deref(), Some("Token"));
//! assert_eq!(classed.style.get(Property::Color), None);
//! ```

use serde::Serialize;

use crate::flags::FlagLookup;
use crate::style::StyleLayer;

/// A named, pre-defined style class plus any inline values it still needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassVariant {
    class_name: String,
    layer: StyleLayer,
}

impl ClassVariant {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            layer: StyleLayer::named("variant"),
        }
    }

    /// Sets the inline values that accompany the class.
    pub fn with_layer(mut self, layer: StyleLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn layer(&self) -> &StyleLayer {
        &self.layer
    }
}

/// How a component's final style is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StylingStrategy {
    /// Compute every value inline.
    Inline,
    /// Delegate to a style class.
    ClassDelegated(ClassVariant),
}

impl StylingStrategy {
    /// Evaluates `flag` once and picks the matching strategy.
    pub fn select<F>(flags: &F, flag: &str, variant: ClassVariant) -> Self
    where
        F: FlagLookup + ?Sized,
    {
        let enabled = flags.is_enabled(flag);
        tracing::debug!(
            flag,
            enabled,
            class = variant.class_name(),
            "selected styling strategy"
        );
        if enabled {
            StylingStrategy::ClassDelegated(variant)
        } else {
            StylingStrategy::Inline
        }
    }

    pub fn variant(&self) -> Option<&ClassVariant> {
        match self {
            StylingStrategy::Inline => None,
            StylingStrategy::ClassDelegated(variant) => Some(variant),
        }
    }

    pub fn is_class_delegated(&self) -> bool {
        matches!(self, StylingStrategy::ClassDelegated(_))
    }

    /// Composes with this strategy.
    pub fn compose(
        &self,
        defaults: &StyleLayer,
        derived: &StyleLayer,
        caller: Option<&StyleLayer>,
    ) -> ComposedStyle {
        compose(defaults, derived, self.variant(), caller)
    }
}

/// The final style handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedStyle {
    /// Present when styling was delegated to a class.
    pub class_name: Option<String>,
    pub style: StyleLayer,
}

impl ComposedStyle {
    /// Prepends a caller-supplied class name.
    pub fn with_class(mut self, extra: Option<&str>) -> Self {
        self.class_name = class_names([extra, self.class_name.as_deref()]);
        self
    }
}

/// Merges the layers into a final style.
///
/// With `variant` absent the result is `defaults < derived < caller`. With a
/// variant present, styling is delegated: the result is the variant's class
/// name and its layer, and none of `defaults`, `derived` or `caller` is
/// applied.
pub fn compose(
    defaults: &StyleLayer,
    derived: &StyleLayer,
    variant: Option<&ClassVariant>,
    caller: Option<&StyleLayer>,
) -> ComposedStyle {
    match variant {
        None => compose_inline(defaults, derived, caller),
        Some(variant) => compose_delegated(variant),
    }
}

fn compose_inline(
    defaults: &StyleLayer,
    derived: &StyleLayer,
    caller: Option<&StyleLayer>,
) -> ComposedStyle {
    let mut style = defaults.merge(derived);
    if let Some(caller) = caller {
        style.apply(caller);
    }
    tracing::debug!(
        defaults = defaults.name().unwrap_or("-"),
        keys = style.len(),
        "composed inline style"
    );
    ComposedStyle {
        class_name: None,
        style,
    }
}

fn compose_delegated(variant: &ClassVariant) -> ComposedStyle {
    let style = variant.layer().clone();
    tracing::debug!(
        class = variant.class_name(),
        keys = style.len(),
        "delegated style to class"
    );
    ComposedStyle {
        class_name: Some(variant.class_name().to_string()),
        style,
    }
}

/// Joins the present, non-empty class names with single spaces.
///
/// ```rust
/// use labelkit::class_names;
///
/// assert_eq!(class_names([Some("custom"), None, Some("Radio")]).as_deref(), Some("custom Radio"));
/// assert_eq!(class_names([None, Some("  ")]), None);
/// ```
pub fn class_names<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let joined = names
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}
