//! Named, dynamically typed property storage.
//!
//! Every widget carries a [`PropertyBag`]. Layout constraints, layered pane
//! layers and desktop frame state are all stored here under well-known keys,
//! next to arbitrary application data.
//!
//! # Example
//!
//! ```
//! use ufo_core::PropertyBag;
//!
//! let mut props = PropertyBag::new();
//! props.put("frame_title", String::from("Editor"));
//! assert_eq!(props.get::<String>("frame_title").map(String::as_str), Some("Editor"));
//! assert_eq!(props.get::<i32>("frame_title"), None);
//! ```

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;

/// Errors raised by typed property lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The property was not found.
    NotFound {
        /// The name of the property that was not found.
        name: String,
    },
    /// The property exists but holds a different type.
    TypeMismatch {
        /// The name of the property.
        name: String,
        /// The requested type name.
        expected: &'static str,
    },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "Property '{}' not found", name),
            Self::TypeMismatch { name, expected } => {
                write!(f, "Property '{}' is not of type {}", name, expected)
            }
        }
    }
}

impl std::error::Error for PropertyError {}

/// A bag of named values of arbitrary `'static` types.
#[derive(Default)]
pub struct PropertyBag {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any previous value under the same key.
    pub fn put<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.values.insert(name.into(), Box::new(value));
    }

    /// Get a value if present and of type `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(name).and_then(|v| v.downcast_ref::<T>())
    }

    /// Get a mutable reference to a value if present and of type `T`.
    pub fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.values.get_mut(name).and_then(|v| v.downcast_mut::<T>())
    }

    /// Get a value, distinguishing a missing key from a type mismatch.
    pub fn get_checked<T: Any>(&self, name: &str) -> Result<&T, PropertyError> {
        let value = self.values.get(name).ok_or_else(|| PropertyError::NotFound {
            name: name.to_string(),
        })?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Get a string property, or the empty string.
    pub fn get_string(&self, name: &str) -> &str {
        self.get::<String>(name).map(String::as_str).unwrap_or("")
    }

    /// Remove a value. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    /// Check whether a key is present (regardless of type).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// All keys, sorted for stable output.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}
