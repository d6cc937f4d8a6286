//! Toolkit settings.
//!
//! A [`ToolkitConfig`] is read from TOML and selects the look-and-feel,
//! an optional global font, the initial session bounds and theme
//! overrides:
//!
//! ```toml
//! look_and_feel = "basic"
//! font = "sans-serif 14"
//!
//! [bounds]
//! x = 0
//! y = 0
//! width = 640
//! height = 480
//!
//! [theme]
//! "UButton.margin" = [4, 8, 4, 8]
//! UWidget.palette = "window"
//! ```
//!
//! Unset fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use ufo_core::Rect;
use ufo_style::BASIC_LAF_NAME;

use crate::error::{Error, Result};
use crate::laf::LookAndFeel;
use crate::session::UiSession;
use crate::widget::WidgetKind;

/// Initial placement of the session's root pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBounds {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<SessionBounds> for Rect {
    fn from(b: SessionBounds) -> Self {
        Rect::new(b.x, b.y, b.width, b.height)
    }
}

/// Settings applied to a [`UiSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Name of the look-and-feel, see [`LookAndFeel::by_name`].
    pub look_and_feel: String,
    /// Font used by every widget kind, e.g. `"monospace 12 bold"`.
    pub font: Option<String>,
    pub bounds: Option<SessionBounds>,
    /// Theme overrides, keyed like the theme (`"UButton.margin"`).
    pub theme: toml::Table,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            look_and_feel: BASIC_LAF_NAME.to_string(),
            font: None,
            bounds: None,
            theme: toml::Table::new(),
        }
    }
}

impl ToolkitConfig {
    /// Parse settings from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: "ufo::session", path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Build the configured look-and-feel with the font and theme
    /// overrides applied.
    pub fn look_and_feel(&self) -> Result<LookAndFeel> {
        let mut laf = LookAndFeel::by_name(&self.look_and_feel)?;
        if let Some(font) = &self.font {
            let mut fonts = toml::Table::new();
            for kind in WidgetKind::ALL {
                fonts.insert(
                    format!("{}.font", kind.theme_prefix()),
                    toml::Value::String(font.clone()),
                );
            }
            laf.theme_mut().apply_overrides(&fonts)?;
        }
        laf.theme_mut().apply_overrides(&self.theme)?;
        Ok(laf)
    }

    /// Install the configured look-and-feel into a session and resize it.
    pub fn apply(&self, session: &mut UiSession) -> Result<()> {
        session.set_look_and_feel(self.look_and_feel()?)?;
        if let Some(bounds) = self.bounds {
            session.set_bounds(bounds.into())?;
        }
        Ok(())
    }
}
