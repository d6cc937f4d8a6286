//! Theme maps: typed look-and-feel defaults keyed by `"<WidgetType>.<property>"`.
//!
//! Typed accessors never fail. An absent key, or a key holding a value of
//! another type, yields the documented default for that accessor.
//!
//! # Overrides
//!
//! Theme values can be overridden from TOML, either with quoted full keys or
//! with one table per widget type:
//!
//! ```
//! use ufo_style::{BorderType, ThemeMap};
//!
//! let theme = ThemeMap::from_toml_str(r##"
//!     "UButton.border" = "line"
//!
//!     [ULabel]
//!     margin = [1, 2, 1, 2]
//!     textIconGap = 6
//! "##).unwrap();
//!
//! assert_eq!(theme.border("UButton.border"), BorderType::Line);
//! assert_eq!(theme.integer("ULabel.textIconGap"), 6);
//! ```

use std::collections::HashMap;
use std::path::Path;

use ufo_core::Insets;

use crate::error::{Error, Result};
use crate::palette::Palette;
use crate::types::{BorderType, Color, FontFamily, FontSpec};

/// A single theme entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValue {
    Color(Color),
    Palette(Palette),
    Font(FontSpec),
    Border(BorderType),
    Insets(Insets),
    Integer(i32),
    /// Name of an icon resource.
    Icon(String),
    Text(String),
}

/// Look-and-feel theme defaults.
#[derive(Debug, Clone, Default)]
pub struct ThemeMap {
    values: HashMap<String, ThemeValue>,
}

impl ThemeMap {
    /// Create an empty theme map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&ThemeValue> {
        self.values.get(key)
    }

    /// Insert or replace a value.
    pub fn put(&mut self, key: impl Into<String>, value: ThemeValue) {
        self.values.insert(key.into(), value);
    }

    /// Remove a value, returning it.
    pub fn remove(&mut self, key: &str) -> Option<ThemeValue> {
        self.values.remove(key)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy every entry of `other` into this map, replacing duplicates.
    pub fn merge(&mut self, other: &ThemeMap) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Border for `key`. Defaults to [`BorderType::NoBorder`].
    pub fn border(&self, key: &str) -> BorderType {
        match self.get(key) {
            Some(ThemeValue::Border(border)) => *border,
            _ => BorderType::NoBorder,
        }
    }

    /// Insets for `key`. Defaults to zero insets.
    pub fn insets(&self, key: &str) -> Insets {
        match self.get(key) {
            Some(ThemeValue::Insets(insets)) => *insets,
            _ => Insets::ZERO,
        }
    }

    /// Font for `key`. Defaults to [`FontSpec::control`].
    pub fn font(&self, key: &str) -> FontSpec {
        match self.get(key) {
            Some(ThemeValue::Font(font)) => font.clone(),
            _ => FontSpec::control(),
        }
    }

    /// Palette for `key`. Defaults to [`Palette::passive`].
    pub fn palette(&self, key: &str) -> Palette {
        match self.get(key) {
            Some(ThemeValue::Palette(palette)) => *palette,
            _ => Palette::passive(),
        }
    }

    /// Color for `key`. Defaults to black.
    pub fn color(&self, key: &str) -> Color {
        match self.get(key) {
            Some(ThemeValue::Color(color)) => *color,
            _ => Color::BLACK,
        }
    }

    /// Integer for `key`. Defaults to 0.
    pub fn integer(&self, key: &str) -> i32 {
        match self.get(key) {
            Some(ThemeValue::Integer(value)) => *value,
            _ => 0,
        }
    }

    /// Icon name for `key`, if any.
    pub fn icon(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(ThemeValue::Icon(name)) => Some(name),
            _ => None,
        }
    }

    /// Text for `key`. Defaults to the empty string.
    pub fn text(&self, key: &str) -> &str {
        match self.get(key) {
            Some(ThemeValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Parse a TOML override document into a new theme map.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::Table = source.parse()?;
        let mut theme = Self::new();
        theme.apply_overrides(&table)?;
        Ok(theme)
    }

    /// Load a TOML override document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&source)
    }

    /// Apply overrides from a TOML table.
    ///
    /// A value's type is taken from the entry it replaces when one exists,
    /// otherwise from the property name and the shape of the TOML value.
    pub fn apply_overrides(&mut self, table: &toml::Table) -> Result<()> {
        self.apply_table("", table)
    }

    fn apply_table(&mut self, prefix: &str, table: &toml::Table) -> Result<()> {
        for (name, value) in table {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };

            if let toml::Value::Table(nested) = value {
                self.apply_table(&key, nested)?;
                continue;
            }

            let Some((_, property)) = key.rsplit_once('.') else {
                return Err(Error::MalformedKey(key));
            };
            let parsed = parse_theme_value(&key, property, self.get(&key), value)?;
            tracing::debug!(target: "ufo::laf", key = %key, "theme override applied");
            self.values.insert(key, parsed);
        }
        Ok(())
    }
}

fn parse_theme_value(
    key: &str,
    property: &str,
    existing: Option<&ThemeValue>,
    value: &toml::Value,
) -> Result<ThemeValue> {
    let expect_str = || {
        value
            .as_str()
            .ok_or_else(|| Error::invalid_value(key, "expected a string"))
    };

    let kind = match existing {
        Some(ThemeValue::Color(_)) => "color",
        Some(ThemeValue::Palette(_)) => "palette",
        Some(ThemeValue::Font(_)) => "font",
        Some(ThemeValue::Border(_)) => "border",
        Some(ThemeValue::Insets(_)) => "insets",
        Some(ThemeValue::Integer(_)) => "integer",
        Some(ThemeValue::Icon(_)) => "icon",
        Some(ThemeValue::Text(_)) => "text",
        None => infer_kind(property, value),
    };

    match kind {
        "color" => {
            let text = expect_str()?;
            Color::from_hex(text)
                .map(ThemeValue::Color)
                .ok_or_else(|| Error::invalid_value(key, format!("invalid color '{text}'")))
        }
        "palette" => {
            let text = expect_str()?;
            Palette::by_name(text)
                .map(ThemeValue::Palette)
                .ok_or_else(|| Error::invalid_value(key, format!("unknown palette '{text}'")))
        }
        "font" => parse_font(key, expect_str()?).map(ThemeValue::Font),
        "border" => {
            let text = expect_str()?;
            text.parse::<BorderType>()
                .map(ThemeValue::Border)
                .map_err(|_| Error::invalid_value(key, format!("unknown border '{text}'")))
        }
        "insets" => parse_insets(key, value).map(ThemeValue::Insets),
        "integer" => value
            .as_integer()
            .and_then(|n| i32::try_from(n).ok())
            .map(ThemeValue::Integer)
            .ok_or_else(|| Error::invalid_value(key, "expected a 32-bit integer")),
        "icon" => expect_str().map(|s| ThemeValue::Icon(s.to_string())),
        _ => expect_str().map(|s| ThemeValue::Text(s.to_string())),
    }
}

fn infer_kind(property: &str, value: &toml::Value) -> &'static str {
    let lower = property.to_ascii_lowercase();
    if lower.ends_with("border") {
        "border"
    } else if lower.ends_with("palette") {
        "palette"
    } else if lower.ends_with("font") {
        "font"
    } else if lower.ends_with("icon") {
        "icon"
    } else if lower.ends_with("margin") || lower.ends_with("insets") || value.is_array() {
        "insets"
    } else if value.is_integer() {
        "integer"
    } else if value.as_str().is_some_and(|s| s.starts_with('#')) {
        "color"
    } else {
        "text"
    }
}

/// Parse `"<family> <size> [bold] [italic]"`, e.g. `"monospace 12 bold"`.
fn parse_font(key: &str, text: &str) -> Result<FontSpec> {
    let mut parts = text.split_whitespace();
    let family = match parts.next() {
        Some("sans-serif" | "sans") => FontFamily::SansSerif,
        Some("serif") => FontFamily::Serif,
        Some("monospace" | "mono") => FontFamily::Monospace,
        _ => return Err(Error::invalid_value(key, format!("invalid font '{text}'"))),
    };
    let size = parts
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| Error::invalid_value(key, "font size missing"))?;

    let mut font = FontSpec::new(family, size);
    for flag in parts {
        match flag {
            "bold" => font.bold = true,
            "italic" => font.italic = true,
            other => {
                return Err(Error::invalid_value(key, format!("unknown font flag '{other}'")));
            }
        }
    }
    Ok(font)
}

/// Parse `[top, left, bottom, right]` or a single uniform integer.
fn parse_insets(key: &str, value: &toml::Value) -> Result<Insets> {
    if let Some(n) = value.as_integer() {
        let n = i32::try_from(n).map_err(|_| Error::invalid_value(key, "inset out of range"))?;
        return Ok(Insets::uniform(n));
    }
    let items: Vec<i32> = value
        .as_array()
        .ok_or_else(|| Error::invalid_value(key, "expected an array of four integers"))?
        .iter()
        .map(|v| v.as_integer().and_then(|n| i32::try_from(n).ok()))
        .collect::<Option<_>>()
        .ok_or_else(|| Error::invalid_value(key, "insets must be integers"))?;
    match items.as_slice() {
        [top, left, bottom, right] => Ok(Insets::new(*top, *left, *bottom, *right)),
        _ => Err(Error::invalid_value(key, "expected an array of four integers")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_defaults_on_missing_keys() {
        let theme = ThemeMap::new();
        assert_eq!(theme.border("UButton.border"), BorderType::NoBorder);
        assert_eq!(theme.insets("UButton.margin"), Insets::ZERO);
        assert_eq!(theme.font("UButton.font"), FontSpec::control());
        assert_eq!(theme.palette("UButton.palette"), Palette::passive());
        assert_eq!(theme.integer("UButton.textIconGap"), 0);
        assert_eq!(theme.icon("UCheckBox.icon"), None);
        assert_eq!(theme.text("UButton.anything"), "");
    }

    #[test]
    fn test_typed_default_on_mistyped_value() {
        let mut theme = ThemeMap::new();
        theme.put("UButton.border", ThemeValue::Integer(3));
        assert_eq!(theme.border("UButton.border"), BorderType::NoBorder);
        assert_eq!(theme.integer("UButton.border"), 3);
    }

    #[test]
    fn test_override_keeps_existing_type() {
        let mut theme = ThemeMap::new();
        theme.put("UButton.gap", ThemeValue::Insets(Insets::ZERO));

        let table: toml::Table = "\"UButton.gap\" = 3".parse().unwrap();
        theme.apply_overrides(&table).unwrap();
        assert_eq!(theme.insets("UButton.gap"), Insets::uniform(3));
    }

    #[test]
    fn test_override_tables_and_inference() {
        let theme = ThemeMap::from_toml_str(
            r##"
            [UTextEdit]
            border = "lowered"
            palette = "input"
            font = "monospace 12 bold"
            background = "#FF0000"
            "##,
        )
        .unwrap();

        assert_eq!(theme.border("UTextEdit.border"), BorderType::LoweredBevel);
        assert_eq!(theme.palette("UTextEdit.palette"), Palette::input());
        let font = theme.font("UTextEdit.font");
        assert_eq!(font.family, FontFamily::Monospace);
        assert_eq!(font.point_size, 12);
        assert!(font.bold);
        assert_eq!(theme.color("UTextEdit.background"), Color::from_rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_override_errors() {
        assert!(matches!(
            ThemeMap::from_toml_str("border = \"line\""),
            Err(Error::MalformedKey(_))
        ));
        assert!(matches!(
            ThemeMap::from_toml_str("\"UButton.palette\" = \"neon\""),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            ThemeMap::from_toml_str("\"UButton.margin\" = [1, 2]"),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(ThemeMap::from_toml_str("= broken"), Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        std::fs::write(&path, "\"UWidget.border\" = \"line\"\n").unwrap();

        let theme = ThemeMap::load(&path).unwrap();
        assert_eq!(theme.border("UWidget.border"), BorderType::Line);

        let missing = ThemeMap::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }

    #[test]
    fn test_merge_replaces() {
        let mut base = ThemeMap::new();
        base.put("UButton.border", ThemeValue::Border(BorderType::Ui));
        base.put("ULabel.border", ThemeValue::Border(BorderType::NoBorder));

        let mut overrides = ThemeMap::new();
        overrides.put("UButton.border", ThemeValue::Border(BorderType::Line));
        base.merge(&overrides);

        assert_eq!(base.border("UButton.border"), BorderType::Line);
        assert_eq!(base.len(), 2);
    }
}
