//! Flow layout for wrapping horizontal arrangement.
//!
//! `FlowLayout` places children left to right and starts a new row when
//! the next child would exceed the available width. Each row is as tall as
//! its tallest child.

use ufo_core::{Dimension, Rect};

use super::traits::{ChildPlacement, LayoutManager, visible_children};
use crate::widget::{HAlignment, VAlignment, WidgetId, WidgetTree};

/// Default gap between children and between rows.
const DEFAULT_GAP: i32 = 4;

/// Wraps children into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLayout {
    h_gap: i32,
    v_gap: i32,
    alignment: HAlignment,
    v_alignment: VAlignment,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            h_gap: DEFAULT_GAP,
            v_gap: DEFAULT_GAP,
            alignment: HAlignment::Left,
            v_alignment: VAlignment::Top,
        }
    }
}

struct Row {
    items: Vec<(WidgetId, Dimension)>,
    width: i32,
    height: i32,
}

impl FlowLayout {
    /// Create a left-aligned flow layout with the default gaps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gaps between children and rows (builder style).
    pub fn with_gaps(mut self, h_gap: i32, v_gap: i32) -> Self {
        self.h_gap = h_gap.max(0);
        self.v_gap = v_gap.max(0);
        self
    }

    /// Set the per-row horizontal alignment (builder style).
    pub fn with_alignment(mut self, alignment: HAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the vertical alignment of the block of rows (builder style).
    pub fn with_vertical_alignment(mut self, v_alignment: VAlignment) -> Self {
        self.v_alignment = v_alignment;
        self
    }

    /// Horizontal gap between children.
    pub fn h_gap(&self) -> i32 {
        self.h_gap
    }

    /// Vertical gap between rows.
    pub fn v_gap(&self) -> i32 {
        self.v_gap
    }

    fn rows(&self, tree: &WidgetTree, container: WidgetId, width: i32) -> Vec<Row> {
        let mut rows: Vec<Row> = Vec::new();
        for child in visible_children(tree, container) {
            let size = tree.preferred_size(child);
            let fits = rows
                .last()
                .is_some_and(|row| row.width.saturating_add(self.h_gap + size.w) <= width);
            match rows.last_mut() {
                Some(row) if fits => {
                    row.width += self.h_gap + size.w;
                    row.height = row.height.max(size.h);
                    row.items.push((child, size));
                }
                _ => rows.push(Row {
                    items: vec![(child, size)],
                    width: size.w,
                    height: size.h,
                }),
            }
        }
        rows
    }

    fn rows_height(&self, rows: &[Row]) -> i32 {
        rows.iter().map(|r| r.height).sum::<i32>()
            + self.v_gap * (rows.len().saturating_sub(1) as i32)
    }
}

impl LayoutManager for FlowLayout {
    fn preferred_layout_size(
        &self,
        tree: &WidgetTree,
        container: WidgetId,
        max: Dimension,
    ) -> Dimension {
        let insets = tree.insets(container);
        let width = max.shrink(insets).w;
        let rows = self.rows(tree, container, width);
        let w = rows.iter().map(|r| r.width).max().unwrap_or(0);
        Dimension::new(w, self.rows_height(&rows)).grow(insets)
    }

    fn minimum_layout_size(&self, tree: &WidgetTree, container: WidgetId) -> Dimension {
        let insets = tree.insets(container);
        let widest = visible_children(tree, container)
            .into_iter()
            .map(|c| tree.minimum_size(c))
            .fold(Dimension::ZERO, |acc, s| acc.expand_to(s));
        widest.grow(insets)
    }

    fn layout_container(&self, tree: &WidgetTree, container: WidgetId) -> Vec<ChildPlacement> {
        let inner = tree.inner_bounds(container);
        let rows = self.rows(tree, container, inner.w);
        let total_height = self.rows_height(&rows);

        let mut y = inner.y
            + match self.v_alignment {
                VAlignment::Top => 0,
                VAlignment::Center => ((inner.h - total_height) / 2).max(0),
                VAlignment::Bottom => (inner.h - total_height).max(0),
            };

        let mut placements = Vec::new();
        for row in rows {
            let slack = (inner.w - row.width).max(0);
            let mut x = inner.x
                + match self.alignment {
                    HAlignment::Left => 0,
                    HAlignment::Center => slack / 2,
                    HAlignment::Right => slack,
                };
            for (child, size) in row.items {
                let child_y = y + (row.height - size.h) / 2;
                placements.push(ChildPlacement::new(
                    child,
                    Rect::new(x, child_y, size.w, size.h),
                ));
                x += size.w + self.h_gap;
            }
            y += row.height + self.v_gap;
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetKind;

    fn flow(layout: FlowLayout, sizes: &[(i32, i32)]) -> (WidgetTree, WidgetId, Vec<WidgetId>) {
        let mut tree = WidgetTree::new();
        let container = tree.create(WidgetKind::Widget);
        tree.set_layout(container, Some(Box::new(layout))).unwrap();
        let children = sizes
            .iter()
            .map(|&(w, h)| {
                let child = tree.create(WidgetKind::Widget);
                tree.set_preferred_size(child, Some(Dimension::new(w, h)))
                    .unwrap();
                tree.add(container, child, None, None).unwrap();
                child
            })
            .collect();
        (tree, container, children)
    }

    #[test]
    fn test_single_row_preferred_size() {
        let (tree, container, _) = flow(FlowLayout::new().with_gaps(5, 5), &[(10, 10), (20, 30)]);
        assert_eq!(tree.preferred_size(container), Dimension::new(35, 30));
    }

    #[test]
    fn test_wraps_at_container_width() {
        let (mut tree, container, children) =
            flow(FlowLayout::new().with_gaps(5, 2), &[(30, 10), (30, 20), (30, 10)]);
        tree.set_bounds(container, Rect::new(0, 0, 70, 100)).unwrap();
        tree.validate(container);

        assert_eq!(tree.bounds(children[0]), Rect::new(0, 5, 30, 10));
        assert_eq!(tree.bounds(children[1]), Rect::new(35, 0, 30, 20));
        assert_eq!(tree.bounds(children[2]), Rect::new(0, 22, 30, 10));
    }

    #[test]
    fn test_height_for_width() {
        let (tree, container, _) =
            flow(FlowLayout::new().with_gaps(0, 0), &[(40, 10), (40, 10), (40, 10)]);
        assert_eq!(
            tree.preferred_size_within(container, Dimension::new(80, 1000)),
            Dimension::new(80, 20)
        );
    }

    #[test]
    fn test_row_alignment() {
        let (mut tree, container, children) = flow(
            FlowLayout::new()
                .with_gaps(0, 0)
                .with_alignment(HAlignment::Right)
                .with_vertical_alignment(VAlignment::Bottom),
            &[(20, 10)],
        );
        tree.set_bounds(container, Rect::new(0, 0, 100, 50)).unwrap();
        tree.validate(container);
        assert_eq!(tree.bounds(children[0]), Rect::new(80, 40, 20, 10));
    }
}
