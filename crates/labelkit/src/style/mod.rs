//! Typed style layers.
//!
//! Style objects handed to the rendering layer are built from [`StyleLayer`]s:
//! ordered mappings from keys to values, merged with later layers winning key
//! by key.
//!
//! ## Key Spaces
//!
//! | Key | Example | Stored as |
//! |-----|---------|-----------|
//! | Known property | `borderColor`, `border-color` | [`Property`] |
//! | Custom property | `--label-r` | open extension map |
//! | Nested selector | `:focus`, `:after`, `li[aria-disabled] &` | sub-layer |
//!
//! Known properties accept both camelCase and kebab-case spellings and resolve
//! to a single [`Property`], so layers cannot silently set the same property
//! twice under different names.
//!
//! ## Loading
//!
//! Layers load from YAML with [`StyleLayer::from_yaml`] and
//! [`StyleLayer::from_file`]; unknown plain keys are rejected.
//!
//! ## See Also
//!
//! - [`crate::compose`]: how layers are stacked into a final style

mod layer;
mod property;
mod value;

pub use layer::{StyleKey, StyleLayer};
pub use property::Property;
pub use value::StyleValue;
