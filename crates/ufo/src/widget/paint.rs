//! Paint traversal.
//!
//! The toolkit does not rasterize anything itself. [`paint_tree`] walks a
//! widget subtree and issues drawing commands to a [`Graphics`]
//! implementation supplied by the rendering backend.

use ufo_core::{Point, Rect};
use ufo_style::{BorderType, Color, FontSpec, Palette};

use super::WidgetId;
use super::tree::WidgetTree;

/// A drawing surface.
///
/// Coordinates are relative to the current translation. The clip rectangle
/// is reported and set in the same translated coordinates.
pub trait Graphics {
    /// Set the color of subsequent drawing operations.
    fn set_color(&mut self, color: Color);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect);

    /// Outline a rectangle, inside its bounds.
    fn draw_rect(&mut self, rect: Rect);

    /// Draw a one pixel line.
    fn draw_line(&mut self, from: Point, to: Point);

    /// Draw a single line of text with its top-left corner at `location`.
    fn draw_text(&mut self, text: &str, location: Point, font: &FontSpec);

    /// Draw a named icon. Backends without icon support ignore it.
    fn draw_icon(&mut self, _icon: &str, _location: Point) {}

    /// The current clip rectangle.
    fn clip_rect(&self) -> Rect;

    /// Replace the clip rectangle.
    fn set_clip_rect(&mut self, rect: Rect);

    /// Move the origin.
    fn translate(&mut self, dx: i32, dy: i32);
}

/// Paint a widget and its descendants.
///
/// Hidden widgets and their subtrees are skipped. Each widget is painted in
/// its own coordinate space, clipped to its bounds: first the UI delegate
/// (or a plain background for opaque widgets without one), then the
/// border, then the children back to front.
#[tracing::instrument(skip_all, target = "ufo::widget", level = "trace")]
pub fn paint_tree(tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
    paint_widget(tree, id, g);
}

fn paint_widget(tree: &WidgetTree, id: WidgetId, g: &mut dyn Graphics) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if !node.is_visible() {
        return;
    }

    let bounds = node.bounds();
    let local = Rect::from_parts(Point::ZERO, bounds.size());
    g.translate(bounds.x, bounds.y);
    let saved_clip = g.clip_rect();
    if let Some(clip) = saved_clip.intersect(&local) {
        g.set_clip_rect(clip);

        match node.ui() {
            Some(ui) => ui.paint(tree, id, g),
            None if node.is_opaque() => {
                g.set_color(node.palette().background);
                g.fill_rect(local);
            }
            None => {}
        }

        match (node.border(), node.ui()) {
            (BorderType::Ui, Some(ui)) => ui.paint_border(tree, id, g),
            (border, _) => paint_border(g, border, node.palette(), local),
        }

        for &child in node.children().iter().rev() {
            paint_widget(tree, child, g);
        }
        g.set_clip_rect(saved_clip);
    }
    g.translate(-bounds.x, -bounds.y);
}

/// Paint one of the fixed border types around `rect`.
pub fn paint_border(g: &mut dyn Graphics, border: BorderType, palette: &Palette, rect: Rect) {
    if rect.is_empty() {
        return;
    }
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    match border {
        BorderType::NoBorder | BorderType::Ui => {}
        BorderType::Line | BorderType::Titled => {
            g.set_color(palette.foreground);
            g.draw_rect(rect);
        }
        BorderType::BottomLine => {
            g.set_color(palette.foreground);
            g.draw_line(Point::new(left, bottom), Point::new(right, bottom));
        }
        BorderType::RaisedBevel | BorderType::LoweredBevel => {
            let (upper, lower) = if border == BorderType::RaisedBevel {
                (palette.light, palette.dark)
            } else {
                (palette.dark, palette.light)
            };
            for inset in 0..2 {
                g.set_color(upper);
                g.draw_line(
                    Point::new(left + inset, top + inset),
                    Point::new(right - inset, top + inset),
                );
                g.draw_line(
                    Point::new(left + inset, top + inset),
                    Point::new(left + inset, bottom - inset),
                );
                g.set_color(lower);
                g.draw_line(
                    Point::new(left + inset, bottom - inset),
                    Point::new(right - inset, bottom - inset),
                );
                g.draw_line(
                    Point::new(right - inset, top + inset),
                    Point::new(right - inset, bottom - inset),
                );
            }
        }
    }
}
