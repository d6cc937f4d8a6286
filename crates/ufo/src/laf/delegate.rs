//! The UI delegate trait.

use std::fmt;

use ufo_core::{Dimension, Insets, Point, Rect};
use ufo_style::{BorderType, FontSpec, Palette, ThemeMap};

use crate::widget::{Graphics, UiAttributes, WidgetId, WidgetNode, WidgetTree};

/// Theme prefix consulted when a widget type has no entry of its own.
const FALLBACK_PREFIX: &str = "UWidget";

/// Look-and-feel specific behavior of one widget kind.
///
/// A delegate is shared by every widget of its kind. It installs theme
/// defaults into a widget, reports sizes that depend on content (text,
/// icons, items), and paints the widget.
pub trait UiDelegate: fmt::Debug + Send + Sync {
    /// Apply theme defaults to a widget that just received this delegate.
    ///
    /// Attributes the application set explicitly are left alone.
    fn install_ui(&self, node: &mut WidgetNode, theme: &ThemeMap) {
        install_theme_defaults(node, theme);
    }

    /// Undo [`install_ui`](Self::install_ui) before another delegate takes
    /// over.
    fn uninstall_ui(&self, node: &mut WidgetNode) {
        uninstall_theme_defaults(node);
    }

    /// Content-based preferred size, including insets, or `None` to let the
    /// layout manager decide.
    fn preferred_size(&self, _tree: &WidgetTree, _id: WidgetId, _max: Dimension) -> Option<Dimension> {
        None
    }

    /// Insets of a [`BorderType::Ui`] border.
    fn border_insets(&self, _node: &WidgetNode) -> Insets {
        Insets::ZERO
    }

    /// Paint the widget's content in its own coordinates.
    fn paint(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        paint_background(tree, id, g);
    }

    /// Paint a [`BorderType::Ui`] border.
    fn paint_border(&self, _tree: &WidgetTree, _id: WidgetId, _g: &mut dyn Graphics) {}
}

fn theme_key(theme: &ThemeMap, prefix: &str, property: &str) -> String {
    let key = format!("{prefix}.{property}");
    if theme.contains(&key) {
        key
    } else {
        format!("{FALLBACK_PREFIX}.{property}")
    }
}

/// Copy border, margin, font and palette from the theme into a widget.
///
/// Keys are `"<prefix>.border"` and so on, with the prefix of the widget's
/// kind. Missing keys fall back to the `UWidget` entry, then to the theme
/// map defaults.
pub fn install_theme_defaults(node: &mut WidgetNode, theme: &ThemeMap) {
    let prefix = node.kind.theme_prefix();
    let explicit = node.explicit_attributes;
    if !explicit.contains(UiAttributes::BORDER) {
        node.border = theme.border(&theme_key(theme, prefix, "border"));
    }
    if !explicit.contains(UiAttributes::MARGIN) {
        node.margin = theme.insets(&theme_key(theme, prefix, "margin"));
    }
    if !explicit.contains(UiAttributes::FONT) {
        node.font = theme.font(&theme_key(theme, prefix, "font"));
    }
    if !explicit.contains(UiAttributes::PALETTE) {
        node.palette = theme.palette(&theme_key(theme, prefix, "palette"));
    }
    tracing::trace!(target: "ufo::laf", kind = %node.kind, "installed theme defaults");
}

/// Reset the attributes [`install_theme_defaults`] may have set.
pub fn uninstall_theme_defaults(node: &mut WidgetNode) {
    let explicit = node.explicit_attributes;
    if !explicit.contains(UiAttributes::BORDER) {
        node.border = BorderType::NoBorder;
    }
    if !explicit.contains(UiAttributes::MARGIN) {
        node.margin = Insets::ZERO;
    }
    if !explicit.contains(UiAttributes::FONT) {
        node.font = FontSpec::control();
    }
    if !explicit.contains(UiAttributes::PALETTE) {
        node.palette = Palette::passive();
    }
}

/// Fill the widget with its background color if it is opaque.
pub fn paint_background(tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if node.is_opaque() {
        g.set_color(node.palette().background);
        g.fill_rect(Rect::from_parts(Point::ZERO, node.bounds().size()));
    }
}
