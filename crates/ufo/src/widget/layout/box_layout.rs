//! Box layout for linear arrangements.
//!
//! `BoxLayout` places visible children one after another along its main
//! axis. Surplus space is shared among children in proportion to their flex
//! factor (read from a [`Constraint::Flex`](crate::widget::Constraint)
//! layout constraint); when no child is flexible, the leftover space is
//! distributed by the layout's [`Packing`].

use ufo_core::{Dimension, Point, Rect};

use super::traits::{ChildPlacement, LayoutManager, visible_children};
use crate::widget::{WidgetId, WidgetTree};

/// Layout orientation for box layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Items are arranged left to right.
    #[default]
    Horizontal,
    /// Items are arranged top to bottom.
    Vertical,
}

impl Orientation {
    /// Get the cross (perpendicular) orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Alignment of items on the cross axis.
///
/// For horizontal layouts, this affects vertical positioning of items.
/// For vertical layouts, this affects horizontal positioning of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Align items at the start (left/top).
    Start,
    /// Center items.
    Center,
    /// Align items at the end (right/bottom).
    End,
    /// Stretch items to fill the cross axis (default).
    #[default]
    Stretch,
}

/// Where unclaimed main-axis space goes when no child is flexible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Packing {
    /// Children start at the leading edge.
    #[default]
    Start,
    /// Children are centered.
    Center,
    /// Children end at the trailing edge.
    End,
}

/// Arranges children horizontally or vertically.
#[derive(Debug, Clone, Default)]
pub struct BoxLayout {
    orientation: Orientation,
    alignment: Alignment,
    packing: Packing,
    gap: i32,
}

impl BoxLayout {
    /// Create a box layout with the given orientation and no gap.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Create a horizontal box layout.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a vertical box layout.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Set the gap between children (builder style).
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap.max(0);
        self
    }

    /// Set the cross-axis alignment (builder style).
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the main-axis packing (builder style).
    pub fn with_packing(mut self, packing: Packing) -> Self {
        self.packing = packing;
        self
    }

    /// The orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The cross-axis alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// The main-axis packing.
    pub fn packing(&self) -> Packing {
        self.packing
    }

    /// The gap between children.
    pub fn gap(&self) -> i32 {
        self.gap
    }

    #[inline]
    fn main(&self, size: Dimension) -> i32 {
        match self.orientation {
            Orientation::Horizontal => size.w,
            Orientation::Vertical => size.h,
        }
    }

    #[inline]
    fn cross(&self, size: Dimension) -> i32 {
        match self.orientation {
            Orientation::Horizontal => size.h,
            Orientation::Vertical => size.w,
        }
    }

    #[inline]
    fn make_size(&self, main: i32, cross: i32) -> Dimension {
        match self.orientation {
            Orientation::Horizontal => Dimension::new(main, cross),
            Orientation::Vertical => Dimension::new(cross, main),
        }
    }

    #[inline]
    fn make_rect(&self, origin: Point, main_pos: i32, cross_pos: i32, size: Dimension) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(origin.x + main_pos, origin.y + cross_pos, size.w, size.h),
            Orientation::Vertical => Rect::new(origin.x + cross_pos, origin.y + main_pos, size.w, size.h),
        }
    }

    fn total_gap(&self, count: usize) -> i32 {
        self.gap * (count.saturating_sub(1) as i32)
    }

    fn child_sizes(&self, tree: &WidgetTree, children: &[WidgetId], max: Dimension) -> Vec<Dimension> {
        children
            .iter()
            .map(|&child| tree.preferred_size_within(child, max))
            .collect()
    }
}

/// Split `amount` among `weights` proportionally; the rounding remainder
/// goes to the last weighted entry.
fn distribute(amount: i32, weights: &[i32]) -> Vec<i32> {
    let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mut shares = vec![0; weights.len()];
    if total <= 0 {
        return shares;
    }
    let mut given = 0;
    let mut last = None;
    for (i, &weight) in weights.iter().enumerate() {
        if weight > 0 {
            shares[i] = (i64::from(amount) * i64::from(weight) / total) as i32;
            given += shares[i];
            last = Some(i);
        }
    }
    if let Some(last) = last {
        shares[last] += amount - given;
    }
    shares
}

impl LayoutManager for BoxLayout {
    fn preferred_layout_size(
        &self,
        tree: &WidgetTree,
        container: WidgetId,
        max: Dimension,
    ) -> Dimension {
        let insets = tree.insets(container);
        let children = visible_children(tree, container);
        let sizes = self.child_sizes(tree, &children, max.shrink(insets));

        let main: i32 = sizes.iter().map(|&s| self.main(s)).sum::<i32>() + self.total_gap(sizes.len());
        let cross = sizes.iter().map(|&s| self.cross(s)).max().unwrap_or(0);
        self.make_size(main, cross).grow(insets)
    }

    fn minimum_layout_size(&self, tree: &WidgetTree, container: WidgetId) -> Dimension {
        let insets = tree.insets(container);
        let children = visible_children(tree, container);
        let sizes: Vec<Dimension> = children.iter().map(|&c| tree.minimum_size(c)).collect();

        let main: i32 = sizes.iter().map(|&s| self.main(s)).sum::<i32>() + self.total_gap(sizes.len());
        let cross = sizes.iter().map(|&s| self.cross(s)).max().unwrap_or(0);
        self.make_size(main, cross).grow(insets)
    }

    fn layout_container(&self, tree: &WidgetTree, container: WidgetId) -> Vec<ChildPlacement> {
        let inner = tree.inner_bounds(container);
        let children = visible_children(tree, container);
        if children.is_empty() {
            return Vec::new();
        }

        let available_main = self.main(inner.size());
        let available_cross = self.cross(inner.size());
        let bound = self.make_size(Dimension::MAX.w, available_cross);
        let mut sizes: Vec<i32> = self
            .child_sizes(tree, &children, bound)
            .iter()
            .map(|&s| self.main(s))
            .collect();
        let crosses: Vec<i32> = children
            .iter()
            .map(|&c| self.cross(tree.preferred_size(c)))
            .collect();

        let flex: Vec<i32> = children
            .iter()
            .map(|&c| tree.constraint(c).and_then(|k| k.flex()).unwrap_or(0).max(0))
            .collect();
        let surplus = available_main - sizes.iter().sum::<i32>() - self.total_gap(children.len());

        let mut leftover = surplus;
        if surplus != 0 && flex.iter().any(|&f| f > 0) {
            for (size, share) in sizes.iter_mut().zip(distribute(surplus, &flex)) {
                *size = (*size + share).max(0);
            }
            leftover = 0;
        }

        let mut position = match self.packing {
            _ if leftover <= 0 => 0,
            Packing::Start => 0,
            Packing::Center => leftover / 2,
            Packing::End => leftover,
        };

        let origin = inner.location();
        let mut placements = Vec::with_capacity(children.len());
        for ((&child, &main), &preferred_cross) in children.iter().zip(&sizes).zip(&crosses) {
            let (cross_pos, cross) = match self.alignment {
                Alignment::Stretch => (0, available_cross),
                Alignment::Start => (0, preferred_cross.min(available_cross)),
                Alignment::Center => {
                    let cross = preferred_cross.min(available_cross);
                    ((available_cross - cross) / 2, cross)
                }
                Alignment::End => {
                    let cross = preferred_cross.min(available_cross);
                    (available_cross - cross, cross)
                }
            };
            let size = self.make_size(main, cross.max(0));
            placements.push(ChildPlacement::new(
                child,
                self.make_rect(origin, position, cross_pos, size),
            ));
            position += main + self.gap;
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Constraint, WidgetKind};
    use ufo_core::Insets;
    use ufo_style::BorderType;

    fn container_with(
        layout: BoxLayout,
        preferred: &[(i32, i32)],
    ) -> (WidgetTree, WidgetId, Vec<WidgetId>) {
        let mut tree = WidgetTree::new();
        let container = tree.create(WidgetKind::Widget);
        tree.set_layout(container, Some(Box::new(layout))).unwrap();
        let children = preferred
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
    fn test_distribute_remainder_to_last() {
        assert_eq!(distribute(10, &[1, 1, 1]), vec![3, 3, 4]);
        assert_eq!(distribute(10, &[0, 2, 0]), vec![0, 10, 0]);
        assert_eq!(distribute(10, &[0, 0]), vec![0, 0]);
    }

    #[test]
    fn test_preferred_size_is_sum_plus_gaps() {
        let sizes = [(40, 20), (60, 35), (25, 10), (70, 5)];
        let (tree, container, _) = container_with(BoxLayout::horizontal().with_gap(7), &sizes);

        let preferred = tree.preferred_size(container);
        let sum: i32 = sizes.iter().map(|s| s.0).sum();
        assert_eq!(preferred.w, sum + 3 * 7);
        assert_eq!(preferred.h, 35);
    }

    #[test]
    fn test_vertical_preferred_size() {
        let (tree, container, _) = container_with(BoxLayout::vertical().with_gap(2), &[(10, 30), (50, 20)]);
        assert_eq!(tree.preferred_size(container), Dimension::new(50, 52));
    }

    #[test]
    fn test_preferred_size_includes_insets() {
        let (mut tree, container, _) = container_with(BoxLayout::horizontal(), &[(10, 10)]);
        tree.set_border(container, BorderType::Line).unwrap();
        tree.set_margin(container, Insets::uniform(2)).unwrap();
        assert_eq!(tree.preferred_size(container), Dimension::new(16, 16));
    }

    #[test]
    fn test_empty_container_prefers_zero() {
        let (tree, container, _) = container_with(BoxLayout::horizontal().with_gap(10), &[]);
        assert_eq!(tree.preferred_size(container), Dimension::ZERO);
    }

    #[test]
    fn test_two_children_with_gap_no_flex() {
        let (mut tree, container, children) =
            container_with(BoxLayout::horizontal().with_gap(10), &[(40, 20), (60, 20)]);
        tree.set_bounds(container, Rect::new(0, 0, 110, 30)).unwrap();
        tree.validate(container);

        assert_eq!(tree.bounds(children[0]), Rect::new(0, 0, 40, 30));
        assert_eq!(tree.bounds(children[1]), Rect::new(50, 0, 60, 30));
    }

    #[test]
    fn test_flex_distributes_surplus() {
        let (mut tree, container, children) =
            container_with(BoxLayout::horizontal(), &[(20, 10), (20, 10), (20, 10)]);
        tree.set_flex(children[1], 1).unwrap();
        tree.set_flex(children[2], 3).unwrap();
        tree.set_bounds(container, Rect::new(0, 0, 100, 10)).unwrap();
        tree.validate(container);

        assert_eq!(tree.bounds(children[0]).w, 20);
        assert_eq!(tree.bounds(children[1]), Rect::new(20, 0, 30, 10));
        assert_eq!(tree.bounds(children[2]), Rect::new(50, 0, 50, 10));
    }

    #[test]
    fn test_packing_without_flex() {
        let (mut tree, container, children) = container_with(
            BoxLayout::horizontal().with_packing(Packing::End),
            &[(20, 10), (30, 10)],
        );
        tree.set_bounds(container, Rect::new(0, 0, 100, 10)).unwrap();
        tree.validate(container);
        assert_eq!(tree.bounds(children[0]).x, 50);
        assert_eq!(tree.bounds(children[1]).x, 70);

        tree.set_layout(
            container,
            Some(Box::new(BoxLayout::horizontal().with_packing(Packing::Center))),
        )
        .unwrap();
        tree.validate(container);
        assert_eq!(tree.bounds(children[0]).x, 25);
    }

    #[test]
    fn test_cross_alignment() {
        let (mut tree, container, children) = container_with(
            BoxLayout::vertical().with_alignment(Alignment::Center),
            &[(20, 10), (100, 10)],
        );
        tree.set_bounds(container, Rect::new(0, 0, 60, 40)).unwrap();
        tree.validate(container);

        assert_eq!(tree.bounds(children[0]), Rect::new(20, 0, 20, 10));
        assert_eq!(tree.bounds(children[1]), Rect::new(0, 10, 60, 10));
    }

    #[test]
    fn test_hidden_children_are_skipped() {
        let (mut tree, container, children) =
            container_with(BoxLayout::horizontal().with_gap(5), &[(10, 10), (10, 10), (10, 10)]);
        tree.set_visible(children[1], false).unwrap();
        assert_eq!(tree.preferred_size(container).w, 25);

        tree.set_bounds(container, Rect::new(0, 0, 25, 10)).unwrap();
        tree.validate(container);
        assert_eq!(tree.bounds(children[2]).x, 15);
    }

    #[test]
    fn test_flex_from_plain_integer_property() {
        let (mut tree, container, children) =
            container_with(BoxLayout::horizontal(), &[(10, 10), (10, 10)]);
        tree.put_property(children[0], crate::widget::LAYOUT_CONSTRAINT_KEY, 1i32)
            .unwrap();
        assert_eq!(tree.constraint(children[0]), Some(Constraint::Flex(1)));

        tree.set_bounds(container, Rect::new(0, 0, 50, 10)).unwrap();
        tree.validate(container);
        assert_eq!(tree.bounds(children[0]).w, 40);
    }
}
