//! Error types for color parsing, configuration loading and component styling.
//!
//! [`InvalidColorError`] is the only failure the color adapter can produce. It is
//! always surfaced to the caller: no fallback color is substituted.

use std::path::PathBuf;

use thiserror::Error;

/// A color string that could not be parsed as hex, `rgb()`, `hsl()` or a named color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': {reason}")]
pub struct InvalidColorError {
    /// The input exactly as supplied.
    pub input: String,
    /// What the parser tripped over.
    pub reason: String,
}

impl InvalidColorError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading flag sets or style layers from YAML.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or has the wrong shape.
    #[error("failed to parse {}: {message}", path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<inline>".to_string()))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A plain key that is neither a known property, a custom property nor a selector.
    #[error("unknown style property '{key}'")]
    UnknownProperty { key: String },

    /// A key whose value has an unsupported type.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl LoadError {
    pub(crate) fn with_path(self, file: &std::path::Path) -> Self {
        match self {
            LoadError::Parse { path: None, message } => LoadError::Parse {
                path: Some(file.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}

/// Umbrella error for component-level operations.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error(transparent)]
    Color(#[from] InvalidColorError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result type for component-level operations.
pub type Result<T> = std::result::Result<T, LabelError>;
