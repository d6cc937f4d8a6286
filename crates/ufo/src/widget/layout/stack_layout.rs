//! Stack layout for overlapping children.
//!
//! `StackLayout` gives every visible child the full inner bounds of the
//! container. Decks and tab widgets hide all pages but one; plain stacks
//! overlay their children.

use ufo_core::Dimension;

use super::traits::{ChildPlacement, LayoutManager, visible_children};
use crate::widget::{WidgetId, WidgetTree};

/// Places all visible children on top of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackLayout;

impl StackLayout {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutManager for StackLayout {
    /// The largest preferred size of any child, hidden pages included, so
    /// switching pages does not resize the container.
    fn preferred_layout_size(
        &self,
        tree: &WidgetTree,
        container: WidgetId,
        max: Dimension,
    ) -> Dimension {
        let size = tree
            .children(container)
            .iter()
            .map(|&child| tree.preferred_size_within(child, max))
            .fold(Dimension::ZERO, |acc, d| {
                Dimension::new(acc.w.max(d.w), acc.h.max(d.h))
            });
        size.grow(tree.insets(container))
    }

    fn layout_container(&self, tree: &WidgetTree, container: WidgetId) -> Vec<ChildPlacement> {
        let inner = tree.inner_bounds(container);
        visible_children(tree, container)
            .into_iter()
            .map(|child| ChildPlacement::new(child, inner))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use ufo_core::Rect;

    use super::*;
    use crate::widget::WidgetKind;

    #[test]
    fn test_pages_share_inner_bounds() {
        let mut tree = WidgetTree::new();
        let deck = tree.create(WidgetKind::Stack);
        tree.set_layout(deck, Some(Box::new(StackLayout::new())))
            .unwrap();
        let first = tree.create(WidgetKind::Widget);
        let second = tree.create(WidgetKind::Widget);
        tree.set_preferred_size(first, Some(Dimension::new(30, 10)))
            .unwrap();
        tree.set_preferred_size(second, Some(Dimension::new(10, 40)))
            .unwrap();
        tree.add(deck, first, None, None).unwrap();
        tree.add(deck, second, None, None).unwrap();
        tree.set_visible(second, false).unwrap();

        assert_eq!(tree.preferred_size(deck), Dimension::new(30, 40));

        tree.set_bounds(deck, Rect::new(0, 0, 50, 50)).unwrap();
        tree.validate(deck);
        assert_eq!(tree.bounds(first), Rect::new(0, 0, 50, 50));
    }
}
