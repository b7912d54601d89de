//! Colored label tokens.

use crate::adapter::{DeriveCache, DerivedStyle, TOKEN_BORDER_WIDTH_PX};
use crate::compose::{class_names, ClassVariant, ComposedStyle, StylingStrategy};
use crate::error::Result;
use crate::flags::{FlagLookup, CSS_MODULES_GA};
use crate::style::{Property, StyleLayer};
use crate::theme::ColorMode;

/// Fill used when a token has no color of its own.
pub const DEFAULT_FILL_COLOR: &str = "#999";

/// Style class used when token styling is delegated.
pub const LABEL_TOKEN_CLASS: &str = "LabelToken";

/// Modifier class added to [`LABEL_TOKEN_CLASS`] for a selected token.
pub const LABEL_TOKEN_SELECTED_CLASS: &str = "LabelToken--selected";

/// A pill-shaped label whose colors follow its fill.
///
/// ```rust
/// use labelkit::{ColorMode, DeriveCache, LabelToken, Property, StylingStrategy};
///
/// let mut cache = DeriveCache::new();
/// let token = LabelToken::new("bug").fill_color("#d73a4a");
/// let composed = token
///     .style(ColorMode::Light, &StylingStrategy::Inline, None, &mut cache)
///     .unwrap();
///
/// assert_eq!(composed.class_name, None);
/// assert_eq!(composed.style.get(Property::Position), Some(&"relative".into()));
/// assert_eq!(composed.style.get(Property::Background), Some(&"rgb(215,58,74)".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelToken {
    text: String,
    fill_color: Option<String>,
    selected: bool,
    removable: bool,
}

impl LabelToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Marks the token as carrying a visible remove action.
    pub fn removable(mut self, removable: bool) -> Self {
        self.removable = removable;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The fill color, falling back to [`DEFAULT_FILL_COLOR`].
    pub fn color(&self) -> &str {
        self.fill_color.as_deref().unwrap_or(DEFAULT_FILL_COLOR)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_removable(&self) -> bool {
        self.removable
    }

    /// Layout that holds whatever the fill color is.
    pub fn structural_defaults(&self) -> StyleLayer {
        let layer = StyleLayer::named("label-token")
            .set(Property::Position, "relative")
            .set(Property::BorderWidth, TOKEN_BORDER_WIDTH_PX)
            .set(Property::BorderStyle, "solid");
        self.with_removable_padding(layer)
    }

    /// Picks inline or class-delegated styling from the GA flag.
    pub fn select_strategy<F>(flags: &F) -> StylingStrategy
    where
        F: FlagLookup + ?Sized,
    {
        StylingStrategy::select(flags, CSS_MODULES_GA, ClassVariant::new(LABEL_TOKEN_CLASS))
    }

    /// Derives the token colors for `mode`, going through `cache`.
    pub fn derive(&self, mode: ColorMode, cache: &mut DeriveCache) -> Result<DerivedStyle> {
        Ok(cache.derive(self.color(), mode, self.selected)?)
    }

    /// Derives colors and composes the final style.
    ///
    /// Inline, the result is `structural defaults < derived < caller`. When
    /// delegated, the class carries the layout and reads the token's colors
    /// from the `--label-*` custom properties, so the inline layer holds only
    /// those properties plus the removable padding. A selected token also gets
    /// [`LABEL_TOKEN_SELECTED_CLASS`], which draws the focus ring and halo.
    pub fn style(
        &self,
        mode: ColorMode,
        strategy: &StylingStrategy,
        caller: Option<&StyleLayer>,
        cache: &mut DeriveCache,
    ) -> Result<ComposedStyle> {
        let derived = self.derive(mode, cache)?;
        tracing::trace!(
            text = %self.text,
            color = self.color(),
            %mode,
            selected = self.selected,
            "styling label token"
        );

        let derived_layer = derived.to_layer();
        let defaults = self.structural_defaults();
        let composed = match strategy {
            StylingStrategy::Inline => strategy.compose(&defaults, &derived_layer, caller),
            StylingStrategy::ClassDelegated(variant) => {
                let class_name = class_names([
                    Some(variant.class_name()),
                    self.selected.then_some(LABEL_TOKEN_SELECTED_CLASS),
                ])
                .unwrap_or_else(|| variant.class_name().to_string());
                let layer = variant.layer().merge(&derived_layer.custom_only());
                let instance =
                    ClassVariant::new(class_name).with_layer(self.with_removable_padding(layer));
                StylingStrategy::ClassDelegated(instance).compose(&defaults, &derived_layer, caller)
            }
        };
        Ok(composed)
    }

    fn with_removable_padding(&self, layer: StyleLayer) -> StyleLayer {
        if self.removable {
            layer.set(Property::PaddingRight, 0)
        } else {
            layer
        }
    }
}
