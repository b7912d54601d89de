//! Components built on the color adapter and the style composer.
//!
//! Each component owns its structural defaults and picks a styling strategy
//! from a feature flag. The rest (deriving colors, merging layers) is shared.

mod description;
mod label_token;
mod radio;

pub use description::{Description, DescriptionVariant, DESCRIPTION_CLASS, DESCRIPTION_DATA_COMPONENT};
pub use label_token::{LabelToken, DEFAULT_FILL_COLOR, LABEL_TOKEN_CLASS, LABEL_TOKEN_SELECTED_CLASS};
pub use radio::{Radio, INPUT_CLASS, RADIO_CLASS};
