//! Look-and-feel theme data for UFO.
//!
//! This crate holds everything a UI delegate reads when it installs itself
//! into a widget:
//!
//! - **Types**: colors, border types and font descriptions
//! - **Palettes**: preset color sets for passive, control, input, menu and
//!   window widgets
//! - **Theme maps**: typed `"<WidgetType>.<property>"` defaults with safe
//!   fallbacks and TOML overrides
//! - **Basic theme**: the defaults of the built-in "basic" look-and-feel
//!
//! # Example
//!
//! ```
//! use ufo_style::prelude::*;
//!
//! let mut theme = basic_theme();
//! assert_eq!(theme.border("UButton.border"), BorderType::Ui);
//!
//! theme.merge(&ThemeMap::from_toml_str("\"UButton.border\" = \"line\"").unwrap());
//! assert_eq!(theme.border("UButton.border"), BorderType::Line);
//! ```

pub mod basic;
pub mod palette;
pub mod theme;
pub mod types;

mod error;

pub use basic::{BASIC_LAF_NAME, basic_theme};
pub use error::{Error, Result};
pub use palette::Palette;
pub use theme::{ThemeMap, ThemeValue};
pub use types::{BorderType, Color, FixedFontMetrics, FontFamily, FontMetrics, FontSpec};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::basic::basic_theme;
    pub use crate::palette::Palette;
    pub use crate::theme::{ThemeMap, ThemeValue};
    pub use crate::types::{BorderType, Color, FixedFontMetrics, FontMetrics, FontSpec};
}
