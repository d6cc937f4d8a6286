//! Theme defaults of the "basic" look-and-feel.

use ufo_core::Insets;

use crate::palette::Palette;
use crate::theme::{ThemeMap, ThemeValue};
use crate::types::{BorderType, FontSpec};

/// Name of the basic look-and-feel.
pub const BASIC_LAF_NAME: &str = "basic";

/// Build the theme map of the basic look-and-feel.
///
/// Every widget type gets at least a palette, a font and a border.
pub fn basic_theme() -> ThemeMap {
    let mut theme = ThemeMap::new();
    let control_font = FontSpec::control();
    let title_font = FontSpec::control();
    let user_font = FontSpec::control();

    let mut widget = |name: &str, palette: Palette, font: &FontSpec, border: BorderType| {
        theme.put(format!("{name}.palette"), ThemeValue::Palette(palette));
        theme.put(format!("{name}.font"), ThemeValue::Font(font.clone()));
        theme.put(format!("{name}.border"), ThemeValue::Border(border));
    };

    widget("UButton", Palette::control(), &control_font, BorderType::Ui);
    widget("UCheckBox", Palette::control(), &control_font, BorderType::NoBorder);
    widget("URadioButton", Palette::control(), &control_font, BorderType::NoBorder);
    widget("UComboBox", Palette::input(), &control_font, BorderType::Line);
    widget("UInternalFrame", Palette::window(), &title_font, BorderType::Ui);
    widget("ULabel", Palette::passive(), &control_font, BorderType::NoBorder);
    widget("UMenuBar", Palette::menu(), &control_font, BorderType::Ui);
    widget("UMenu", Palette::menu(), &control_font, BorderType::Ui);
    widget("UMenuItem", Palette::menu(), &control_font, BorderType::Ui);
    widget("UCheckBoxMenuItem", Palette::control(), &control_font, BorderType::Ui);
    widget("UPopupMenu", Palette::menu(), &control_font, BorderType::RaisedBevel);
    widget("USeparator", Palette::menu(), &control_font, BorderType::NoBorder);
    widget("UTextEdit", Palette::input(), &user_font, BorderType::Line);
    widget("UListBox", Palette::input(), &control_font, BorderType::Line);
    widget("UScrollBar", Palette::passive(), &control_font, BorderType::Line);
    widget("USlider", Palette::passive(), &control_font, BorderType::NoBorder);
    widget("UProgressBar", Palette::input(), &control_font, BorderType::LoweredBevel);
    widget("UGroupBox", Palette::passive(), &control_font, BorderType::Titled);
    widget("UWidget", Palette::passive(), &control_font, BorderType::NoBorder);

    theme.put("UButton.margin", ThemeValue::Insets(Insets::new(2, 4, 2, 4)));

    for name in ["UButton", "UCheckBox", "URadioButton", "UCheckBoxMenuItem"] {
        theme.put(format!("{name}.textIconGap"), ThemeValue::Integer(4));
    }

    let toggle_icons = [
        ("UCheckBox", "checkbox"),
        ("UCheckBoxMenuItem", "checkbox"),
        ("URadioButton", "radiobutton"),
    ];
    for (name, icon) in toggle_icons {
        theme.put(format!("{name}.icon"), ThemeValue::Icon(icon.to_string()));
        theme.put(format!("{name}.selectedIcon"), ThemeValue::Icon(format!("{icon}-selected")));
        theme.put(format!("{name}.inactiveIcon"), ThemeValue::Icon(format!("{icon}-inactive")));
    }

    theme.put("UInternalFrame.icon", ThemeValue::Icon("frame".into()));
    theme.put("UInternalFrame.maximizeIcon", ThemeValue::Icon("frame-maximize".into()));
    theme.put("UInternalFrame.minimizeIcon", ThemeValue::Icon("frame-minimize".into()));
    theme.put("UInternalFrame.closeIcon", ThemeValue::Icon("frame-close".into()));

    theme
}
