//! Error types for the UFO core crate.

use std::fmt;

use crate::property::PropertyError;

/// The main error type for core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A tree node id did not refer to a live node.
    InvalidNode(String),
    /// Property-related error.
    Property(PropertyError),
    /// Formatting debug output failed.
    Format,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode(id) => write!(f, "Invalid or destroyed node: {id}"),
            Self::Property(err) => write!(f, "Property error: {err}"),
            Self::Format => write!(f, "Failed to format debug output"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Property(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PropertyError> for CoreError {
    fn from(err: PropertyError) -> Self {
        Self::Property(err)
    }
}

impl From<fmt::Error> for CoreError {
    fn from(_: fmt::Error) -> Self {
        Self::Format
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
