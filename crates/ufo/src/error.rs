//! Error types for the UFO widget toolkit.

use std::fmt;
use std::path::PathBuf;

use crate::widget::{WidgetId, WidgetKind};

/// Result type alias for toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors raised by [`WidgetTree`](crate::widget::WidgetTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The widget id is invalid or the widget has been destroyed.
    InvalidWidget(WidgetId),
    /// Adding the child would make a widget its own ancestor.
    CircularParentage {
        parent: WidgetId,
        child: WidgetId,
    },
    /// A layered-pane operation was applied to a widget that is not in a
    /// layered pane.
    NotLayered(WidgetId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidget(id) => write!(f, "Invalid or destroyed widget: {id:?}"),
            Self::CircularParentage { parent, child } => write!(
                f,
                "Adding {child:?} to {parent:?} would create a circular parent-child relationship"
            ),
            Self::NotLayered(id) => write!(f, "Widget {id:?} is not a child of a layered pane"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type alias for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;

/// Errors that can occur in the widget toolkit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structural tree error.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The active look-and-feel has no UI delegate for a widget kind.
    #[error("Look-and-feel '{laf}' has no UI delegate for widget kind {kind}")]
    NoUiDelegate { laf: String, kind: WidgetKind },

    /// No look-and-feel is registered under the requested name.
    #[error("Unknown look-and-feel '{0}'")]
    UnknownLookAndFeel(String),

    /// The session has no root pane yet.
    #[error("The UI session has no root pane")]
    NoRootPane,

    /// A key stroke string could not be parsed.
    #[error("Invalid key stroke '{0}'")]
    InvalidKeyStroke(String),

    /// XUL loading or building failed.
    #[error("XUL error: {0}")]
    Xul(String),

    /// Theme error.
    #[error(transparent)]
    Style(#[from] ufo_style::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a missing-delegate error.
    pub fn no_ui_delegate(laf: impl Into<String>, kind: WidgetKind) -> Self {
        Self::NoUiDelegate {
            laf: laf.into(),
            kind,
        }
    }

    /// Create a XUL error.
    pub fn xul(message: impl Into<String>) -> Self {
        Self::Xul(message.into())
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
