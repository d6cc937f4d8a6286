//! Delegates of the "basic" look-and-feel.

use std::sync::Arc;

use ufo_core::{Dimension, Insets, Point, Rect};
use ufo_style::{BorderType, FontMetrics, ThemeMap};

use super::LookAndFeel;
use super::delegate::{UiDelegate, paint_background};
use crate::widget::layout::Orientation;
use crate::widget::{
    Graphics, HAlignment, VAlignment, WidgetId, WidgetKind, WidgetNode, WidgetTree, paint_border,
};

/// Widget property: visible text columns of a text edit (`i32`).
pub const COLUMNS_KEY: &str = "columns";
/// Widget property: visible rows of a text edit or list box (`i32`).
pub const ROWS_KEY: &str = "rows";
/// Widget property: [`Orientation`] of sliders, scroll bars and separators.
pub const ORIENTATION_KEY: &str = "orientation";

/// Size of application icons.
const ICON_SIZE: i32 = 16;
/// Size of check box and radio button indicators.
const TOGGLE_ICON_SIZE: i32 = 13;
/// Width of the combo box arrow button.
const ARROW_WIDTH: i32 = 16;
/// Default extent of ranged widgets along their orientation.
const RANGE_LENGTH: i32 = 100;
/// Default extent of ranged widgets across their orientation.
const RANGE_THICKNESS: i32 = 16;

fn local_bounds(node: &WidgetNode) -> Rect {
    Rect::from_parts(Point::ZERO, node.bounds().size())
}

fn orientation(tree: &WidgetTree, id: WidgetId, default: Orientation) -> Orientation {
    tree.property::<Orientation>(id, ORIENTATION_KEY)
        .copied()
        .unwrap_or(default)
}

fn draw_lines(
    g: &mut dyn Graphics,
    metrics: &dyn FontMetrics,
    node: &WidgetNode,
    text: &str,
    origin: Point,
) {
    let line_height = metrics.line_height(node.font());
    for (i, line) in text.lines().enumerate() {
        g.draw_text(line, origin.offset(0, i as i32 * line_height), node.font());
    }
}

// ============================================================================
// Panels
// ============================================================================

/// Delegate of plain containers, panes, bars and frames.
///
/// Containers take their preferred size from their layout manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPanelUi {
    ui_border: BorderType,
}

impl BasicPanelUi {
    /// A delegate whose `Ui` border is empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// A delegate that draws `border` for a `Ui` border.
    pub fn with_ui_border(border: BorderType) -> Self {
        Self { ui_border: border }
    }
}

impl UiDelegate for BasicPanelUi {
    fn border_insets(&self, _node: &WidgetNode) -> Insets {
        self.ui_border.insets()
    }

    fn paint_border(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        if let Some(node) = tree.get(id) {
            paint_border(g, self.ui_border, node.palette(), local_bounds(node));
        }
    }
}

// ============================================================================
// Text and Icon
// ============================================================================

/// Delegate of labels, buttons, toggles and menu items.
///
/// The preferred size fits the icon and the text side by side, separated
/// by the theme's `textIconGap`.
#[derive(Debug, Clone, Default)]
pub struct BasicTextIconUi {
    text_icon_gap: i32,
    icon: Option<String>,
    selected_icon: Option<String>,
    ui_border: BorderType,
}

impl BasicTextIconUi {
    /// Read the gap and default icons of `kind` from the theme.
    pub fn from_theme(theme: &ThemeMap, kind: WidgetKind, ui_border: BorderType) -> Self {
        let prefix = kind.theme_prefix();
        Self {
            text_icon_gap: theme.integer(&format!("{prefix}.textIconGap")),
            icon: theme.icon(&format!("{prefix}.icon")).map(str::to_string),
            selected_icon: theme
                .icon(&format!("{prefix}.selectedIcon"))
                .map(str::to_string),
            ui_border,
        }
    }

    fn icon<'a>(&'a self, node: &'a WidgetNode) -> Option<&'a str> {
        node.icon().or_else(|| {
            if node.is_selected() {
                self.selected_icon.as_deref().or(self.icon.as_deref())
            } else {
                self.icon.as_deref()
            }
        })
    }

    fn icon_size(&self, node: &WidgetNode) -> Dimension {
        if node.icon().is_some() {
            Dimension::new(ICON_SIZE, ICON_SIZE)
        } else if self.icon.is_some() {
            Dimension::new(TOGGLE_ICON_SIZE, TOGGLE_ICON_SIZE)
        } else {
            Dimension::ZERO
        }
    }

    fn content_size(&self, metrics: &dyn FontMetrics, node: &WidgetNode) -> (Dimension, Dimension, i32) {
        let text = if node.text().is_empty() {
            Dimension::ZERO
        } else {
            metrics.text_size(node.font(), node.text())
        };
        let icon = self.icon_size(node);
        let gap = if text.is_empty() || icon.is_empty() {
            0
        } else {
            self.text_icon_gap
        };
        (text, icon, gap)
    }
}

impl UiDelegate for BasicTextIconUi {
    fn preferred_size(&self, tree: &WidgetTree, id: WidgetId, _max: Dimension) -> Option<Dimension> {
        let node = tree.get(id)?;
        let (text, icon, gap) = self.content_size(tree.font_metrics(), node);
        let size = Dimension::new(text.w + gap + icon.w, text.h.max(icon.h));
        Some(size.grow(tree.insets(id)))
    }

    fn border_insets(&self, _node: &WidgetNode) -> Insets {
        self.ui_border.insets()
    }

    fn paint(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        let Some(node) = tree.get(id) else {
            return;
        };
        let highlighted = node.is_selected()
            && matches!(node.kind(), WidgetKind::Menu | WidgetKind::MenuItem);
        if highlighted {
            g.set_color(node.palette().highlight);
            g.fill_rect(local_bounds(node));
        } else {
            paint_background(tree, id, g);
        }

        let inner = tree.inner_bounds(id);
        let (text, icon, gap) = self.content_size(tree.font_metrics(), node);
        let width = text.w + gap + icon.w;
        let mut x = inner.x
            + match node.h_alignment() {
                HAlignment::Left => 0,
                HAlignment::Center => (inner.w - width) / 2,
                HAlignment::Right => inner.w - width,
            };
        let center_y = |h: i32| {
            inner.y
                + match node.v_alignment() {
                    VAlignment::Top => 0,
                    VAlignment::Center => (inner.h - h) / 2,
                    VAlignment::Bottom => inner.h - h,
                }
        };

        if let Some(name) = self.icon(node) {
            g.draw_icon(name, Point::new(x, center_y(icon.h)));
            x += icon.w + gap;
        }
        if !text.is_empty() {
            let palette = node.palette();
            g.set_color(match (node.is_enabled(), highlighted) {
                (false, _) => palette.dark,
                (true, true) => palette.highlighted_text,
                (true, false) => palette.text,
            });
            draw_lines(
                g,
                tree.font_metrics(),
                node,
                node.text(),
                Point::new(x, center_y(text.h)),
            );
        }
    }

    fn paint_border(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        let Some(node) = tree.get(id) else {
            return;
        };
        let border = match self.ui_border {
            BorderType::RaisedBevel if node.is_selected() => BorderType::LoweredBevel,
            border => border,
        };
        paint_border(g, border, node.palette(), local_bounds(node));
    }
}

// ============================================================================
// Text Edit
// ============================================================================

/// Delegate of text edits.
///
/// The preferred size follows the [`COLUMNS_KEY`] and [`ROWS_KEY`]
/// properties when set, the text otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTextEditUi;

impl UiDelegate for BasicTextEditUi {
    fn preferred_size(&self, tree: &WidgetTree, id: WidgetId, _max: Dimension) -> Option<Dimension> {
        let node = tree.get(id)?;
        let metrics = tree.font_metrics();
        let char_width = metrics.string_width(node.font(), "m");
        let line_height = metrics.line_height(node.font());
        let text = metrics.text_size(node.font(), node.text());

        let w = tree
            .property::<i32>(id, COLUMNS_KEY)
            .map_or(text.w + char_width, |&columns| columns.max(1) * char_width);
        let h = tree
            .property::<i32>(id, ROWS_KEY)
            .map_or(text.h, |&rows| rows.max(1) * line_height);
        Some(Dimension::new(w, h).grow(tree.insets(id)))
    }

    fn paint(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        paint_background(tree, id, g);
        let Some(node) = tree.get(id) else {
            return;
        };
        g.set_color(node.palette().text);
        draw_lines(
            g,
            tree.font_metrics(),
            node,
            node.text(),
            tree.inner_bounds(id).location(),
        );
    }
}

// ============================================================================
// Ranged Widgets
// ============================================================================

/// Delegate of sliders, scroll bars and progress bars.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRangeUi {
    default_orientation: Orientation,
}

impl BasicRangeUi {
    /// A delegate for widgets that are `orientation` unless their
    /// [`ORIENTATION_KEY`] property says otherwise.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            default_orientation: orientation,
        }
    }
}

impl UiDelegate for BasicRangeUi {
    fn preferred_size(&self, tree: &WidgetTree, id: WidgetId, _max: Dimension) -> Option<Dimension> {
        let size = match orientation(tree, id, self.default_orientation) {
            Orientation::Horizontal => Dimension::new(RANGE_LENGTH, RANGE_THICKNESS),
            Orientation::Vertical => Dimension::new(RANGE_THICKNESS, RANGE_LENGTH),
        };
        Some(size.grow(tree.insets(id)))
    }

    fn paint(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        paint_background(tree, id, g);
        let Some(node) = tree.get(id) else {
            return;
        };
        let inner = tree.inner_bounds(id);
        let (minimum, maximum) = node.range();
        let span = i64::from(maximum - minimum).max(1);
        let offset = i64::from(node.value() - minimum);
        let horizontal = orientation(tree, id, self.default_orientation) == Orientation::Horizontal;
        let length = if horizontal { inner.w } else { inner.h };

        let rect = if node.kind() == WidgetKind::ProgressBar {
            let filled = (i64::from(length) * offset / span) as i32;
            g.set_color(node.palette().highlight);
            if horizontal {
                Rect::new(inner.x, inner.y, filled, inner.h)
            } else {
                Rect::new(inner.x, inner.bottom() - filled, inner.w, filled)
            }
        } else {
            let thumb = RANGE_THICKNESS.min(length);
            let position = (i64::from(length - thumb) * offset / span) as i32;
            g.set_color(node.palette().dark);
            if horizontal {
                Rect::new(inner.x + position, inner.y, thumb, inner.h)
            } else {
                Rect::new(inner.x, inner.y + position, inner.w, thumb)
            }
        };
        if !rect.is_empty() {
            g.fill_rect(rect);
        }
    }
}

// ============================================================================
// Item Widgets
// ============================================================================

/// Delegate of list boxes and combo boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicItemsUi {
    popup: bool,
}

impl BasicItemsUi {
    /// Delegate of a list box showing its items.
    pub fn list() -> Self {
        Self { popup: false }
    }

    /// Delegate of a combo box showing one line and an arrow button.
    pub fn combo() -> Self {
        Self { popup: true }
    }
}

impl UiDelegate for BasicItemsUi {
    fn preferred_size(&self, tree: &WidgetTree, id: WidgetId, _max: Dimension) -> Option<Dimension> {
        let node = tree.get(id)?;
        let metrics = tree.font_metrics();
        let line_height = metrics.line_height(node.font());
        let widest = node
            .items()
            .iter()
            .map(|item| metrics.string_width(node.font(), item))
            .chain(std::iter::once(metrics.string_width(node.font(), node.text())))
            .max()
            .unwrap_or(0);

        let size = if self.popup {
            Dimension::new(widest + ARROW_WIDTH, line_height)
        } else {
            let rows = tree
                .property::<i32>(id, ROWS_KEY)
                .copied()
                .unwrap_or(node.items().len() as i32);
            Dimension::new(widest, rows.max(1) * line_height)
        };
        Some(size.grow(tree.insets(id)))
    }

    fn paint(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        paint_background(tree, id, g);
        let Some(node) = tree.get(id) else {
            return;
        };
        let inner = tree.inner_bounds(id);
        let line_height = tree.font_metrics().line_height(node.font());
        g.set_color(node.palette().text);

        if self.popup {
            g.draw_text(node.text(), inner.location(), node.font());
            let x = inner.right() - ARROW_WIDTH / 2;
            let y = inner.y + inner.h / 2;
            g.draw_line(Point::new(x - 4, y - 2), Point::new(x + 4, y - 2));
            g.draw_line(Point::new(x - 4, y - 2), Point::new(x, y + 2));
            g.draw_line(Point::new(x + 4, y - 2), Point::new(x, y + 2));
        } else {
            for (i, item) in node.items().iter().enumerate() {
                let y = inner.y + i as i32 * line_height;
                if y >= inner.bottom() {
                    break;
                }
                g.draw_text(item, Point::new(inner.x, y), node.font());
            }
        }
    }
}

// ============================================================================
// Separator
// ============================================================================

/// Delegate of separators: a dark and a light line.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSeparatorUi;

impl UiDelegate for BasicSeparatorUi {
    fn preferred_size(&self, tree: &WidgetTree, id: WidgetId, _max: Dimension) -> Option<Dimension> {
        let size = match orientation(tree, id, Orientation::Horizontal) {
            Orientation::Horizontal => Dimension::new(0, 2),
            Orientation::Vertical => Dimension::new(2, 0),
        };
        Some(size.grow(tree.insets(id)))
    }

    fn paint(&self, tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
        let Some(node) = tree.get(id) else {
            return;
        };
        let inner = tree.inner_bounds(id);
        let horizontal = orientation(tree, id, Orientation::Horizontal) == Orientation::Horizontal;
        for (i, color) in [node.palette().dark, node.palette().light].into_iter().enumerate() {
            let i = i as i32;
            g.set_color(color);
            if horizontal {
                g.draw_line(
                    Point::new(inner.x, inner.y + i),
                    Point::new(inner.right() - 1, inner.y + i),
                );
            } else {
                g.draw_line(
                    Point::new(inner.x + i, inner.y),
                    Point::new(inner.x + i, inner.bottom() - 1),
                );
            }
        }
    }
}

/// Register a basic delegate for every widget kind.
pub(crate) fn register_basic_delegates(laf: &mut LookAndFeel) {
    use WidgetKind as K;

    for kind in [
        K::Widget,
        K::RootPane,
        K::LayeredPane,
        K::DesktopPane,
        K::ScrollPane,
        K::TabWidget,
        K::Stack,
        K::GroupBox,
        K::PopupMenu,
    ] {
        laf.register(kind, |_| Arc::new(BasicPanelUi::new()));
    }
    laf.register(K::MenuBar, |_| {
        Arc::new(BasicPanelUi::with_ui_border(BorderType::BottomLine))
    });
    laf.register(K::InternalFrame, |_| {
        Arc::new(BasicPanelUi::with_ui_border(BorderType::RaisedBevel))
    });

    laf.register(K::Button, |theme| {
        Arc::new(BasicTextIconUi::from_theme(theme, K::Button, BorderType::RaisedBevel))
    });
    for kind in [
        K::Label,
        K::CheckBox,
        K::RadioButton,
        K::Menu,
        K::MenuItem,
        K::CheckBoxMenuItem,
    ] {
        laf.register(kind, move |theme| {
            Arc::new(BasicTextIconUi::from_theme(theme, kind, BorderType::NoBorder))
        });
    }

    laf.register(K::TextEdit, |_| Arc::new(BasicTextEditUi));
    laf.register(K::Slider, |_| Arc::new(BasicRangeUi::new(Orientation::Horizontal)));
    laf.register(K::ProgressBar, |_| {
        Arc::new(BasicRangeUi::new(Orientation::Horizontal))
    });
    laf.register(K::ScrollBar, |_| Arc::new(BasicRangeUi::new(Orientation::Vertical)));
    laf.register(K::ListBox, |_| Arc::new(BasicItemsUi::list()));
    laf.register(K::ComboBox, |_| Arc::new(BasicItemsUi::combo()));
    laf.register(K::Separator, |_| Arc::new(BasicSeparatorUi));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::tests::RecordingGraphics;

    fn installed(kind: WidgetKind) -> (WidgetTree, WidgetId, LookAndFeel) {
        let laf = LookAndFeel::basic();
        let mut tree = WidgetTree::new();
        let id = tree.create(kind);
        laf.install_ui(&mut tree, id).unwrap();
        (tree, id, laf)
    }

    #[test]
    fn test_every_kind_has_a_delegate() {
        let laf = LookAndFeel::basic();
        for kind in WidgetKind::ALL {
            assert!(laf.get_ui(kind).is_ok(), "no delegate for {kind}");
        }
    }

    #[test]
    fn test_label_preferred_size_from_text() {
        let (mut tree, label, _laf) = installed(WidgetKind::Label);
        tree.set_text(label, "Hello").unwrap();
        // 5 chars * ceil(0.6 * 14) = 45 wide, 14 + 4 high
        assert_eq!(tree.preferred_size(label), Dimension::new(45, 18));
    }

    #[test]
    fn test_button_includes_margin_and_bevel() {
        let (mut tree, button, _laf) = installed(WidgetKind::Button);
        tree.set_text(button, "OK").unwrap();
        let insets = tree.insets(button);
        assert_eq!(insets, Insets::new(4, 6, 4, 6));
        assert_eq!(tree.preferred_size(button), Dimension::new(18 + 12, 18 + 8));
    }

    #[test]
    fn test_check_box_reserves_indicator() {
        let (mut tree, check, _laf) = installed(WidgetKind::CheckBox);
        tree.set_text(check, "A").unwrap();
        assert_eq!(
            tree.preferred_size(check),
            Dimension::new(9 + 4 + TOGGLE_ICON_SIZE, 18)
        );
    }

    #[test]
    fn test_text_edit_columns_and_rows() {
        let (mut tree, edit, _laf) = installed(WidgetKind::TextEdit);
        tree.put_property(edit, COLUMNS_KEY, 10).unwrap();
        tree.put_property(edit, ROWS_KEY, 3).unwrap();
        tree.invalidate(edit);
        // line border adds 1 on each side
        assert_eq!(tree.preferred_size(edit), Dimension::new(90 + 2, 54 + 2));
    }

    #[test]
    fn test_scroll_bar_orientation() {
        let (mut tree, bar, _laf) = installed(WidgetKind::ScrollBar);
        let vertical = tree.preferred_size(bar);
        assert!(vertical.h > vertical.w);

        tree.put_property(bar, ORIENTATION_KEY, Orientation::Horizontal)
            .unwrap();
        tree.invalidate(bar);
        let horizontal = tree.preferred_size(bar);
        assert!(horizontal.w > horizontal.h);
    }

    #[test]
    fn test_list_box_rows() {
        let (mut tree, list, _laf) = installed(WidgetKind::ListBox);
        tree.set_items(list, vec!["one".into(), "three".into()]).unwrap();
        assert_eq!(tree.preferred_size(list), Dimension::new(45 + 2, 36 + 2));
    }

    #[test]
    fn test_label_paints_text_at_alignment() {
        let (mut tree, label, _laf) = installed(WidgetKind::Label);
        tree.set_text(label, "Hi").unwrap();
        tree.set_alignment(label, HAlignment::Right, VAlignment::Top)
            .unwrap();
        tree.set_bounds(label, Rect::new(0, 0, 100, 40)).unwrap();

        let mut g = RecordingGraphics::new(100, 40);
        crate::widget::paint_tree(&tree, label, &mut g);

        assert_eq!(g.texts, vec![("Hi".to_string(), Point::new(82, 0))]);
    }
}
