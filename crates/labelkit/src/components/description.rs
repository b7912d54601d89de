//! Secondary text inside a list item.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compose::{ClassVariant, ComposedStyle, StylingStrategy};
use crate::flags::{FlagLookup, CSS_MODULES_TEAM};
use crate::style::{Property, StyleLayer};

/// Style class used when description styling is delegated.
pub const DESCRIPTION_CLASS: &str = "Description";

/// Value of the `data-component` attribute the nested selectors target.
pub const DESCRIPTION_DATA_COMPONENT: &str = "ListItem.Description";

/// Where the description sits relative to the item label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionVariant {
    /// Beside the label, on the same line.
    #[default]
    Inline,
    /// Below the label.
    Block,
}

impl DescriptionVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptionVariant::Inline => "inline",
            DescriptionVariant::Block => "block",
        }
    }
}

impl fmt::Display for DescriptionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DescriptionVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inline" => Ok(DescriptionVariant::Inline),
            "block" => Ok(DescriptionVariant::Block),
            other => Err(format!("unknown description variant '{}'", other)),
        }
    }
}

/// A muted description. It has no derived colors: everything is structural.
///
/// ```rust
/// use labelkit::{Description, DescriptionVariant, FeatureFlags, Property};
///
/// let desc = Description::new(DescriptionVariant::Block);
/// let composed = desc.style(&FeatureFlags::new(), None, None);
/// assert_eq!(composed.style.get(Property::MarginLeft), Some(&0.into()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Description {
    variant: DescriptionVariant,
}

impl Description {
    pub fn new(variant: DescriptionVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> DescriptionVariant {
        self.variant
    }

    pub fn structural_defaults(&self) -> StyleLayer {
        let margin_left = match self.variant {
            DescriptionVariant::Inline => 2,
            DescriptionVariant::Block => 0,
        };
        let inherit = || StyleLayer::new().set(Property::Color, "inherit");
        let target = format!("&[data-component=\"{}\"]", DESCRIPTION_DATA_COMPONENT);

        StyleLayer::named("description")
            .set(Property::FontSize, 0)
            .set(Property::LineHeight, "16px")
            .set(Property::FlexGrow, 1)
            .set(Property::FlexBasis, 0)
            .set(Property::MinWidth, 0)
            .set(Property::MarginLeft, margin_left)
            .set(Property::Color, "fg.muted")
            .nest(format!("li[aria-disabled=\"true\"] {}", target), inherit())
            .nest(
                format!(
                    "li[data-variant=\"danger\"]:hover {t}, li[data-variant=\"danger\"]:active {t}",
                    t = target
                ),
                inherit(),
            )
    }

    /// Picks inline or class-delegated styling from the team flag.
    pub fn select_strategy<F>(flags: &F) -> StylingStrategy
    where
        F: FlagLookup + ?Sized,
    {
        StylingStrategy::select(flags, CSS_MODULES_TEAM, ClassVariant::new(DESCRIPTION_CLASS))
    }

    /// Composes the final style. `class_name` is prepended to the variant class
    /// when styling is delegated, and passed through otherwise.
    pub fn style<F>(&self, flags: &F, caller: Option<&StyleLayer>, class_name: Option<&str>) -> ComposedStyle
    where
        F: FlagLookup + ?Sized,
    {
        Self::select_strategy(flags)
            .compose(&self.structural_defaults(), &StyleLayer::new(), caller)
            .with_class(class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FeatureFlags;

    #[test]
    fn test_variant_margin() {
        let inline = Description::new(DescriptionVariant::Inline).structural_defaults();
        let block = Description::new(DescriptionVariant::Block).structural_defaults();
        assert_eq!(inline.get(Property::MarginLeft), Some(&2.into()));
        assert_eq!(block.get(Property::MarginLeft), Some(&0.into()));
        assert_eq!(Description::default().variant(), DescriptionVariant::Inline);
    }

    #[test]
    fn test_nested_selectors_inherit_color() {
        let defaults = Description::default().structural_defaults();
        let disabled = defaults
            .nested("li[aria-disabled=\"true\"] &[data-component=\"ListItem.Description\"]")
            .unwrap();
        assert_eq!(disabled.get(Property::Color), Some(&"inherit".into()));
        assert_eq!(defaults.len(), 9);
    }

    #[test]
    fn test_inline_caller_override() {
        let caller = StyleLayer::new().set(Property::Color, "red");
        let composed = Description::default().style(&FeatureFlags::new(), Some(&caller), Some("mine"));
        assert_eq!(composed.class_name.as_deref(), Some("mine"));
        assert_eq!(composed.style.get(Property::Color), Some(&"red".into()));
        assert_eq!(composed.style.get(Property::LineHeight), Some(&"16px".into()));
    }

    #[test]
    fn test_team_flag_delegates() {
        let flags = FeatureFlags::new().with(CSS_MODULES_TEAM, true);
        let caller = StyleLayer::new().set(Property::Color, "red");
        let composed = Description::default().style(&flags, Some(&caller), Some("mine"));
        assert_eq!(composed.class_name.as_deref(), Some("mine Description"));
        assert!(composed.style.is_empty());
    }

    #[test]
    fn test_ga_flag_alone_does_not_delegate() {
        let flags = FeatureFlags::new().with(crate::flags::CSS_MODULES_GA, true);
        assert_eq!(Description::select_strategy(&flags), StylingStrategy::Inline);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Block".parse::<DescriptionVariant>(), Ok(DescriptionVariant::Block));
        assert!("grid".parse::<DescriptionVariant>().is_err());
    }
}
