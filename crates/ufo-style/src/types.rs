//! Value types stored in theme maps: colors, borders and fonts.

use std::fmt;
use std::str::FromStr;

use ufo_core::{Dimension, Insets};

use crate::error::Error;

/// An RGBA color with components in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ))
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Self = Self::from_rgb(0.86, 0.86, 0.86);
}

/// Border types a widget can carry.
///
/// [`BorderType::Ui`] defers the border geometry to the widget's UI delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    #[default]
    NoBorder,
    Line,
    BottomLine,
    RaisedBevel,
    LoweredBevel,
    Titled,
    Ui,
}

impl BorderType {
    /// Fixed insets of this border. `Ui` borders report zero here; the
    /// delegate supplies the real value.
    pub fn insets(self) -> Insets {
        match self {
            Self::NoBorder | Self::Ui => Insets::ZERO,
            Self::Line | Self::Titled => Insets::uniform(1),
            Self::BottomLine => Insets::new(0, 0, 1, 0),
            Self::RaisedBevel | Self::LoweredBevel => Insets::uniform(2),
        }
    }
}

impl FromStr for BorderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "noborder" => Ok(Self::NoBorder),
            "line" => Ok(Self::Line),
            "bottomline" | "bottom-line" => Ok(Self::BottomLine),
            "raised" | "raisedbevel" => Ok(Self::RaisedBevel),
            "lowered" | "loweredbevel" => Ok(Self::LoweredBevel),
            "titled" => Ok(Self::Titled),
            "ui" => Ok(Self::Ui),
            other => Err(Error::invalid_value("border", format!("unknown border '{other}'"))),
        }
    }
}

/// Generic font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
}

/// A font request. Rasterization is an external concern; widgets only need
/// the description and a [`FontMetrics`] to size text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: FontFamily,
    pub point_size: u32,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::control()
    }
}

impl FontSpec {
    /// Create a plain font of the given family and size.
    pub const fn new(family: FontFamily, point_size: u32) -> Self {
        Self {
            family,
            point_size,
            bold: false,
            italic: false,
        }
    }

    /// The font used for controls: sans serif at 14 points.
    pub const fn control() -> Self {
        Self::new(FontFamily::SansSerif, 14)
    }

    /// Return a bold copy of this font.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.family {
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
        };
        write!(f, "{family} {}", self.point_size)?;
        if self.bold {
            write!(f, " bold")?;
        }
        if self.italic {
            write!(f, " italic")?;
        }
        Ok(())
    }
}

/// Text measurement supplied by the rendering backend.
pub trait FontMetrics: Send + Sync {
    /// Width in pixels of a single line of text.
    fn string_width(&self, font: &FontSpec, text: &str) -> i32;

    /// Height of one line of text.
    fn line_height(&self, font: &FontSpec) -> i32;

    /// Size of a possibly multi-line text block.
    fn text_size(&self, font: &FontSpec, text: &str) -> Dimension {
        let mut w = 0;
        let mut lines = 0;
        for line in text.lines() {
            w = w.max(self.string_width(font, line));
            lines += 1;
        }
        Dimension::new(w, lines.max(1) * self.line_height(font))
    }
}

/// Metrics for a fixed-advance font: every character is `0.6 * size` wide.
///
/// Used as the default when no backend metrics are installed, which keeps
/// layout deterministic in headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedFontMetrics;

impl FontMetrics for FixedFontMetrics {
    fn string_width(&self, font: &FontSpec, text: &str) -> i32 {
        let advance = (font.point_size * 6).div_ceil(10) as i32;
        text.chars().count() as i32 * advance
    }

    fn line_height(&self, font: &FontSpec) -> i32 {
        font.point_size as i32 + 4
    }
}
