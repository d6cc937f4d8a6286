//! Widget kinds and their capability sets.
//!
//! UFO has a single widget node type. What a widget *is* (button, label,
//! layered pane, ...) is a [`WidgetKind`], and the behaviors shared between
//! kinds are described by a [`Capabilities`] set instead of a class hierarchy.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Behaviors a widget kind supports.
///
/// Capabilities can be combined using bitwise OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u16);

impl Capabilities {
    /// No special behavior.
    pub const NONE: Self = Self(0);
    /// Paints a text label together with an optional icon.
    pub const TEXT_ICON: Self = Self(1 << 0);
    /// Has a selected state that a click toggles.
    pub const TOGGLEABLE: Self = Self(1 << 1);
    /// Fires `action_performed` when clicked.
    pub const ACTIVATABLE: Self = Self(1 << 2);
    /// Opens a popup menu.
    pub const HOSTS_POPUP: Self = Self(1 << 3);
    /// Keeps its children ordered by layer.
    pub const LAYERED: Self = Self(1 << 4);
    /// Takes keyboard focus when pressed.
    pub const FOCUS_ON_PRESS: Self = Self(1 << 5);
    /// Holds an integer value within a range.
    pub const RANGED: Self = Self(1 << 6);
    /// Holds a list of text items.
    pub const ITEMS: Self = Self(1 << 7);
    /// Accepts text input.
    pub const TEXT_INPUT: Self = Self(1 << 8);

    /// Check if these capabilities contain all of the given ones.
    #[inline]
    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if no capability is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Capabilities {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Capabilities {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

/// The kind of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetKind {
    /// Plain container or custom widget.
    Widget,
    RootPane,
    LayeredPane,
    DesktopPane,
    InternalFrame,
    Button,
    CheckBox,
    RadioButton,
    Label,
    TextEdit,
    Slider,
    ScrollBar,
    ScrollPane,
    ListBox,
    ComboBox,
    MenuBar,
    Menu,
    MenuItem,
    CheckBoxMenuItem,
    PopupMenu,
    Separator,
    TabWidget,
    GroupBox,
    ProgressBar,
    /// Shows one child at a time.
    Stack,
}

impl WidgetKind {
    /// Every widget kind.
    pub const ALL: [WidgetKind; 25] = [
        Self::Widget,
        Self::RootPane,
        Self::LayeredPane,
        Self::DesktopPane,
        Self::InternalFrame,
        Self::Button,
        Self::CheckBox,
        Self::RadioButton,
        Self::Label,
        Self::TextEdit,
        Self::Slider,
        Self::ScrollBar,
        Self::ScrollPane,
        Self::ListBox,
        Self::ComboBox,
        Self::MenuBar,
        Self::Menu,
        Self::MenuItem,
        Self::CheckBoxMenuItem,
        Self::PopupMenu,
        Self::Separator,
        Self::TabWidget,
        Self::GroupBox,
        Self::ProgressBar,
        Self::Stack,
    ];

    /// Prefix of this kind's theme keys, e.g. `"UButton"` in `"UButton.border"`.
    pub fn theme_prefix(self) -> &'static str {
        match self {
            Self::Widget => "UWidget",
            Self::RootPane => "URootPane",
            Self::LayeredPane => "ULayeredPane",
            Self::DesktopPane => "UDesktopPane",
            Self::InternalFrame => "UInternalFrame",
            Self::Button => "UButton",
            Self::CheckBox => "UCheckBox",
            Self::RadioButton => "URadioButton",
            Self::Label => "ULabel",
            Self::TextEdit => "UTextEdit",
            Self::Slider => "USlider",
            Self::ScrollBar => "UScrollBar",
            Self::ScrollPane => "UScrollPane",
            Self::ListBox => "UListBox",
            Self::ComboBox => "UComboBox",
            Self::MenuBar => "UMenuBar",
            Self::Menu => "UMenu",
            Self::MenuItem => "UMenuItem",
            Self::CheckBoxMenuItem => "UCheckBoxMenuItem",
            Self::PopupMenu => "UPopupMenu",
            Self::Separator => "USeparator",
            Self::TabWidget => "UTabWidget",
            Self::GroupBox => "UGroupBox",
            Self::ProgressBar => "UProgressBar",
            Self::Stack => "UStackWidget",
        }
    }

    /// Behaviors of this kind.
    pub fn capabilities(self) -> Capabilities {
        use Capabilities as C;
        match self {
            Self::Button | Self::MenuItem => C::TEXT_ICON | C::ACTIVATABLE | C::FOCUS_ON_PRESS,
            Self::CheckBox | Self::RadioButton | Self::CheckBoxMenuItem => {
                C::TEXT_ICON | C::ACTIVATABLE | C::TOGGLEABLE | C::FOCUS_ON_PRESS
            }
            Self::Menu => C::TEXT_ICON | C::ACTIVATABLE | C::HOSTS_POPUP,
            Self::ComboBox => C::ITEMS | C::HOSTS_POPUP | C::FOCUS_ON_PRESS,
            Self::Label => C::TEXT_ICON,
            Self::TextEdit => C::TEXT_INPUT | C::FOCUS_ON_PRESS,
            Self::Slider | Self::ScrollBar => C::RANGED | C::FOCUS_ON_PRESS,
            Self::ProgressBar => C::RANGED,
            Self::ListBox => C::ITEMS | C::FOCUS_ON_PRESS,
            Self::RootPane | Self::LayeredPane | Self::DesktopPane => C::LAYERED,
            Self::Widget
            | Self::InternalFrame
            | Self::ScrollPane
            | Self::MenuBar
            | Self::PopupMenu
            | Self::Separator
            | Self::TabWidget
            | Self::GroupBox
            | Self::Stack => C::NONE,
        }
    }

    /// Shorthand for `self.capabilities().contains(capability)`.
    #[inline]
    pub fn has(self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.theme_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_ops() {
        let mut caps = Capabilities::TEXT_ICON | Capabilities::ACTIVATABLE;
        assert!(caps.contains(Capabilities::TEXT_ICON));
        assert!(!caps.contains(Capabilities::TOGGLEABLE));

        caps |= Capabilities::TOGGLEABLE;
        assert!(caps.contains(Capabilities::TOGGLEABLE | Capabilities::ACTIVATABLE));

        caps &= Capabilities::TOGGLEABLE;
        assert_eq!(caps, Capabilities::TOGGLEABLE);
        assert!(Capabilities::NONE.is_empty());
    }

    #[test]
    fn test_kind_capabilities() {
        assert!(WidgetKind::CheckBox.has(Capabilities::TOGGLEABLE));
        assert!(WidgetKind::Button.has(Capabilities::ACTIVATABLE));
        assert!(!WidgetKind::Button.has(Capabilities::TOGGLEABLE));
        assert!(WidgetKind::DesktopPane.has(Capabilities::LAYERED));
        assert!(!WidgetKind::Widget.has(Capabilities::LAYERED));
    }

    #[test]
    fn test_theme_prefixes_unique() {
        let mut prefixes: Vec<_> = WidgetKind::ALL.iter().map(|k| k.theme_prefix()).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), WidgetKind::ALL.len());
    }
}
