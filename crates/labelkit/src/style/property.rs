//! Known style property names.

use std::fmt;

macro_rules! properties {
    ($($variant:ident => $camel:literal, $kebab:literal;)*) => {
        /// A style property the rendering layer understands.
        ///
        /// Properties are addressed by their camelCase name (`borderColor`) or
        /// their CSS kebab-case name (`border-color`); both spellings resolve to
        /// the same variant, so two layers can never set the same property under
        /// different keys.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Property {
            $($variant,)*
        }

        impl Property {
            /// Every known property, in declaration order.
            pub const ALL: &'static [Property] = &[$(Property::$variant,)*];

            /// The camelCase name used in style objects.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Property::$variant => $camel,)*
                }
            }

            /// The CSS declaration name.
            pub fn css_name(&self) -> &'static str {
                match self {
                    $(Property::$variant => $kebab,)*
                }
            }

            /// Resolves either spelling of a property name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|prop| prop.name() == name || prop.css_name() == name)
            }
        }
    };
}

properties! {
    Background => "background", "background";
    BackgroundColor => "backgroundColor", "background-color";
    Color => "color", "color";
    BorderColor => "borderColor", "border-color";
    BorderWidth => "borderWidth", "border-width";
    BorderStyle => "borderStyle", "border-style";
    BorderRadius => "borderRadius", "border-radius";
    BoxShadow => "boxShadow", "box-shadow";
    Outline => "outline", "outline";
    Content => "content", "content";
    Position => "position", "position";
    ZIndex => "zIndex", "z-index";
    Top => "top", "top";
    Right => "right", "right";
    Bottom => "bottom", "bottom";
    Left => "left", "left";
    Display => "display", "display";
    PointerEvents => "pointerEvents", "pointer-events";
    PaddingRight => "paddingRight", "padding-right";
    MarginLeft => "marginLeft", "margin-left";
    FontSize => "fontSize", "font-size";
    LineHeight => "lineHeight", "line-height";
    FlexGrow => "flexGrow", "flex-grow";
    FlexBasis => "flexBasis", "flex-basis";
    MinWidth => "minWidth", "min-width";
    Cursor => "cursor", "cursor";
    Transition => "transition", "transition";
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
