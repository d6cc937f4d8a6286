//! Error types for the theme system.

use std::path::PathBuf;

/// Result type alias for theme operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or overriding themes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A theme override could not be parsed into a typed value.
    #[error("Invalid value for theme key '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// A theme key is not of the form `<WidgetType>.<property>`.
    #[error("Malformed theme key '{0}', expected '<WidgetType>.<property>'")]
    MalformedKey(String),

    /// The override document is not valid TOML.
    #[error("Failed to parse theme overrides: {0}")]
    Toml(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read theme file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
