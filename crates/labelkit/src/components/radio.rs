//! Radio inputs.
//!
//! Only styling lives here. Name resolution, change handling and ARIA state
//! belong to the form layer.

use crate::compose::{class_names, ClassVariant, ComposedStyle, StylingStrategy};
use crate::flags::{FlagLookup, CSS_MODULES_GA};
use crate::style::{Property, StyleLayer};

/// Class shared by checkbox and radio inputs.
pub const INPUT_CLASS: &str = "Input";

/// Class specific to radio inputs.
pub const RADIO_CLASS: &str = "Radio";

const CHECKED_TRANSITION: &str = "background-color, border-color 80ms cubic-bezier(0.33, 1, 0.68, 1)";

/// A native radio input.
///
/// Unlike [`Description`](crate::Description), a radio keeps the caller's
/// inline override when its styling is delegated to classes:
///
/// ```rust
/// use labelkit::{FeatureFlags, Property, Radio, StyleLayer, CSS_MODULES_GA};
///
/// let flags = FeatureFlags::new().with(CSS_MODULES_GA, true);
/// let sx = StyleLayer::new().set(Property::MarginLeft, 4);
/// let composed = Radio::new().style(&flags, Some(&sx), Some("choice"));
///
/// assert_eq!(composed.class_name.as_deref(), Some("choice Input Radio"));
/// assert_eq!(composed.style.get(Property::MarginLeft), Some(&4.into()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Radio;

impl Radio {
    pub fn new() -> Self {
        Radio
    }

    /// Round control plus the checked, checked-disabled and forced-colors states.
    pub fn structural_defaults(&self) -> StyleLayer {
        let checked_disabled = StyleLayer::new()
            .set(Property::Cursor, "not-allowed")
            .set(Property::BorderColor, "fg.muted")
            .set(Property::BackgroundColor, "fg.muted");
        let checked = StyleLayer::new()
            .set(Property::BorderWidth, "var(--base-size-4, 4px)")
            .set(Property::BorderColor, "var(--control-checked-bgColor-rest, accent.fg)")
            .set(
                Property::BackgroundColor,
                "var(--control-checked-fgColor-rest, fg.onEmphasis)",
            )
            .nest("&:disabled", checked_disabled);
        let forced_colors = StyleLayer::new()
            .set(Property::BackgroundColor, "canvastext")
            .set(Property::BorderColor, "canvastext");

        StyleLayer::named("radio")
            .set(Property::BorderRadius, "var(--borderRadius-full, 100vh)")
            .set(Property::Transition, CHECKED_TRANSITION)
            .nest("&:checked", checked)
            .nest("@media (forced-colors: active)", forced_colors)
    }

    /// Picks inline or class-delegated styling from the GA flag.
    pub fn select_strategy<F>(flags: &F) -> StylingStrategy
    where
        F: FlagLookup + ?Sized,
    {
        let classes = class_names([Some(INPUT_CLASS), Some(RADIO_CLASS)]).unwrap_or_default();
        StylingStrategy::select(flags, CSS_MODULES_GA, ClassVariant::new(classes))
    }

    /// Composes the final style.
    ///
    /// Inline, the result is `structural defaults < caller`. When delegated,
    /// the classes replace the defaults and `caller` still applies inline.
    /// `class_name` is prepended either way.
    pub fn style<F>(&self, flags: &F, caller: Option<&StyleLayer>, class_name: Option<&str>) -> ComposedStyle
    where
        F: FlagLookup + ?Sized,
    {
        let strategy = match Self::select_strategy(flags) {
            StylingStrategy::ClassDelegated(variant) => {
                let layer = caller.cloned().unwrap_or_else(|| StyleLayer::named("variant"));
                StylingStrategy::ClassDelegated(variant.with_layer(layer))
            }
            inline => inline,
        };
        strategy
            .compose(&self.structural_defaults(), &StyleLayer::new(), caller)
            .with_class(class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{FeatureFlags, CSS_MODULES_TEAM};

    #[test]
    fn test_inline_defaults_and_override() {
        let sx = StyleLayer::new().set(Property::BorderRadius, "2px");
        let composed = Radio::new().style(&FeatureFlags::new(), Some(&sx), Some("choice"));

        assert_eq!(composed.class_name.as_deref(), Some("choice"));
        assert_eq!(composed.style.get(Property::BorderRadius), Some(&"2px".into()));
        let checked = composed.style.nested("&:checked").unwrap();
        assert_eq!(
            checked.nested("&:disabled").and_then(|d| d.get(Property::Cursor)),
            Some(&"not-allowed".into())
        );
        assert!(composed.style.nested("@media (forced-colors: active)").is_some());
    }

    #[test]
    fn test_inline_without_class_name() {
        let composed = Radio::new().style(&FeatureFlags::new(), None, None);
        assert_eq!(composed.class_name, None);
        assert_eq!(composed.style.len(), 4);
    }

    #[test]
    fn test_ga_flag_joins_both_classes() {
        let flags = FeatureFlags::new().with(CSS_MODULES_GA, true);
        let composed = Radio::new().style(&flags, None, None);

        assert_eq!(composed.class_name.as_deref(), Some("Input Radio"));
        assert!(composed.style.is_empty());
    }

    #[test]
    fn test_delegated_keeps_caller_override_only() {
        let flags = FeatureFlags::new().with(CSS_MODULES_GA, true);
        let sx = StyleLayer::new().set(Property::ZIndex, 2);
        let composed = Radio::new().style(&flags, Some(&sx), Some("custom"));

        assert_eq!(composed.class_name.as_deref(), Some("custom Input Radio"));
        assert_eq!(composed.style.get(Property::ZIndex), Some(&2.into()));
        assert_eq!(composed.style.get(Property::Transition), None);
        assert_eq!(composed.style.len(), 1);
    }

    #[test]
    fn test_team_flag_alone_stays_inline() {
        let flags = FeatureFlags::new().with(CSS_MODULES_TEAM, true);
        assert_eq!(Radio::select_strategy(&flags), StylingStrategy::Inline);
    }
}
