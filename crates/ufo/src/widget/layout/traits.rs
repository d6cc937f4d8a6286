//! Core layout manager trait.

use std::fmt;

use ufo_core::{Dimension, Rect};

use crate::widget::{WidgetId, WidgetTree};

/// Bounds computed for one child during a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildPlacement {
    pub widget: WidgetId,
    /// Bounds relative to the container.
    pub bounds: Rect,
}

impl ChildPlacement {
    /// Create a placement.
    pub fn new(widget: WidgetId, bounds: Rect) -> Self {
        Self { widget, bounds }
    }
}

/// A layout manager positions the children of exactly one container.
///
/// Layout managers hold configuration only (gaps, orientation, alignment);
/// per-child data such as flex factors and regions is read from each
/// child's layout constraint. Layout is computed from an immutable view of
/// the tree and applied afterwards by [`WidgetTree::validate`].
pub trait LayoutManager: fmt::Debug + Send + Sync {
    /// Preferred size of the container, insets included.
    ///
    /// `max` bounds the space available; layouts that trade width for
    /// height use it to wrap. [`Dimension::MAX`] means unbounded.
    fn preferred_layout_size(
        &self,
        tree: &WidgetTree,
        container: WidgetId,
        max: Dimension,
    ) -> Dimension;

    /// Minimum size of the container, insets included.
    fn minimum_layout_size(&self, tree: &WidgetTree, container: WidgetId) -> Dimension {
        self.preferred_layout_size(tree, container, Dimension::MAX)
    }

    /// Compute bounds for the children of `container` within its current
    /// size.
    fn layout_container(&self, tree: &WidgetTree, container: WidgetId) -> Vec<ChildPlacement>;
}

/// Visible children of a container, front-most first.
pub(crate) fn visible_children(tree: &WidgetTree, container: WidgetId) -> Vec<WidgetId> {
    tree.children(container)
        .iter()
        .copied()
        .filter(|&child| tree.is_visible(child))
        .collect()
}
