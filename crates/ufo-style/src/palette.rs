//! Widget color palettes.

use crate::types::Color;

/// The colors a widget paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Widget background.
    pub background: Color,
    /// Widget foreground (lines, icons).
    pub foreground: Color,
    /// Text color.
    pub text: Color,
    /// Lighter shade for bevels.
    pub light: Color,
    /// Darker shade for bevels.
    pub dark: Color,
    /// Background of selected items.
    pub highlight: Color,
    /// Text on selected items.
    pub highlighted_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::passive()
    }
}

impl Palette {
    /// Palette for non-interactive widgets (labels, plain containers).
    pub fn passive() -> Self {
        Self {
            background: Color::from_rgb(0.86, 0.86, 0.86),
            foreground: Color::BLACK,
            text: Color::BLACK,
            light: Color::from_rgb(0.71, 0.76, 0.83),
            dark: Color::from_rgb(0.4, 0.52, 0.68),
            highlight: Color::from_rgb(0.5, 0.62, 0.78),
            highlighted_text: Color::WHITE,
        }
    }

    /// Palette for buttons and other clickable controls.
    pub fn control() -> Self {
        Self {
            background: Color::from_rgb(0.93, 0.93, 0.90),
            light: Color::from_rgb(0.7, 0.82, 0.98),
            dark: Color::from_rgb(0.3, 0.42, 0.58),
            ..Self::passive()
        }
    }

    /// Palette for text entry and list widgets.
    pub fn input() -> Self {
        Self {
            background: Color::WHITE,
            light: Color::from_rgb(0.05, 0.50, 0.70),
            dark: Color::from_rgb(0.05, 0.50, 0.70),
            ..Self::passive()
        }
    }

    /// Palette for menus and popups.
    pub fn menu() -> Self {
        Self {
            background: Color::from_rgb(0.86, 0.86, 0.86),
            highlight: Color::from_rgb(0.25, 0.55, 0.86),
            highlighted_text: Color::WHITE,
            ..Self::input()
        }
    }

    /// Palette for internal frames.
    pub fn window() -> Self {
        Self {
            background: Color::WHITE,
            highlight: Color::from_rgb(0.04, 0.37, 0.53),
            ..Self::passive()
        }
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "passive" => Some(Self::passive()),
            "control" => Some(Self::control()),
            "input" => Some(Self::input()),
            "menu" => Some(Self::menu()),
            "window" => Some(Self::window()),
            _ => None,
        }
    }
}
