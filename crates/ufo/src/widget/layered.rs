//! Layered pane z-order management.
//!
//! A layered pane (root pane, layered pane, desktop pane) partitions its
//! children into integer layers kept in one flat child list. The list is
//! sorted by non-increasing layer, so higher layers come first and are
//! front-most. Within a layer, position 0 is the front.

use super::WidgetId;
use super::kind::Capabilities;
use super::tree::WidgetTree;
use crate::error::{TreeError, TreeResult};

/// Property key holding a child's layer.
pub const LAYER_KEY: &str = "layered_pane_layer";

/// Layer of a root pane's content pane and menu bar.
pub const FRAME_CONTENT_LAYER: i32 = -100;
/// Layer of ordinary widgets.
pub const DEFAULT_LAYER: i32 = 0;
/// Layer of internal frames.
pub const FRAME_LAYER: i32 = 100;
/// Layer of popup menus and tooltips.
pub const POPUP_LAYER: i32 = 200;
/// Layer of widgets being dragged.
pub const DRAG_LAYER: i32 = 300;

impl WidgetTree {
    /// The layer of a widget. Widgets without one are on [`DEFAULT_LAYER`].
    pub fn layer(&self, id: WidgetId) -> i32 {
        self.property::<i32>(id, LAYER_KEY)
            .copied()
            .unwrap_or(DEFAULT_LAYER)
    }

    /// Index of the first child of `pane` on `layer`, or where such a
    /// child would be inserted.
    pub fn layer_begin(&self, pane: WidgetId, layer: i32) -> usize {
        let children = self.children(pane);
        children
            .iter()
            .position(|&child| self.layer(child) <= layer)
            .unwrap_or(children.len())
    }

    /// Index one past the last child of `pane` on `layer`.
    pub fn layer_end(&self, pane: WidgetId, layer: i32) -> usize {
        let children = self.children(pane);
        children
            .iter()
            .position(|&child| self.layer(child) < layer)
            .unwrap_or(children.len())
    }

    /// Children of `pane` on `layer`, front-most first.
    pub fn widgets_in_layer(&self, pane: WidgetId, layer: i32) -> Vec<WidgetId> {
        let begin = self.layer_begin(pane, layer);
        let end = self.layer_end(pane, layer);
        self.children(pane)[begin..end].to_vec()
    }

    /// Position of a widget within its layer.
    ///
    /// `None` if the widget has no layered parent.
    pub fn position(&self, id: WidgetId) -> Option<usize> {
        let pane = self.layered_parent(id)?;
        let index = self.index_of(pane, id)?;
        Some(index - self.layer_begin(pane, self.layer(id)))
    }

    /// Insertion index for `layer` at `position` (`None` = back of layer).
    pub(crate) fn layer_insert_index(
        &self,
        pane: WidgetId,
        layer: i32,
        position: Option<usize>,
    ) -> usize {
        let begin = self.layer_begin(pane, layer);
        let end = self.layer_end(pane, layer);
        match position {
            Some(position) => begin.saturating_add(position).min(end),
            None => end,
        }
    }

    fn layered_parent(&self, id: WidgetId) -> Option<WidgetId> {
        let parent = self.parent(id)?;
        self.kind(parent)?
            .has(Capabilities::LAYERED)
            .then_some(parent)
    }

    /// Move a widget to `layer` at `position` (`None` = back of the layer).
    ///
    /// Other widgets keep their relative order. Returns `Ok(false)` if the
    /// widget is already there. A widget without a parent only records the
    /// layer for a later add.
    pub fn set_layer(
        &mut self,
        id: WidgetId,
        layer: i32,
        position: Option<usize>,
    ) -> TreeResult<bool> {
        self.node(id)?;
        let Some(pane) = self.parent(id) else {
            let changed = self.layer(id) != layer;
            self.put_property(id, LAYER_KEY, layer)?;
            return Ok(changed);
        };
        if self.layered_parent(id).is_none() {
            return Err(TreeError::NotLayered(id));
        }

        if layer == self.layer(id) {
            let count = self.widgets_in_layer(pane, layer).len();
            let target = position.map_or(count - 1, |p| p.min(count - 1));
            if self.position(id) == Some(target) {
                return Ok(false);
            }
        }

        if let Some(index) = self.index_of(pane, id) {
            self.node_mut(pane)?.children.remove(index);
        }
        self.put_property(id, LAYER_KEY, layer)?;
        let at = self.layer_insert_index(pane, layer, position);
        self.node_mut(pane)?.children.insert(at, id);
        self.invalidate(pane);

        tracing::trace!(target: "ufo::widget", ?id, layer, ?position, "changed layer");
        Ok(true)
    }

    /// Move a widget within its layer.
    pub fn set_position(&mut self, id: WidgetId, position: usize) -> TreeResult<bool> {
        let layer = self.layer(id);
        self.set_layer(id, layer, Some(position))
    }

    /// Move a widget to the front of its layer.
    pub fn move_to_front(&mut self, id: WidgetId) -> TreeResult<bool> {
        self.set_position(id, 0)
    }

    /// Move a widget to the back of its layer.
    pub fn move_to_back(&mut self, id: WidgetId) -> TreeResult<bool> {
        let layer = self.layer(id);
        self.set_layer(id, layer, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Constraint, WidgetKind};

    fn pane() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let pane = tree.create(WidgetKind::LayeredPane);
        (tree, pane)
    }

    fn add_at_layer(tree: &mut WidgetTree, pane: WidgetId, layer: i32) -> WidgetId {
        let child = tree.create(WidgetKind::Widget);
        tree.add(pane, child, Some(Constraint::Layer(layer)), None)
            .unwrap();
        child
    }

    fn assert_sorted(tree: &WidgetTree, pane: WidgetId) {
        let layers: Vec<i32> = tree.children(pane).iter().map(|&c| tree.layer(c)).collect();
        assert!(
            layers.windows(2).all(|w| w[0] >= w[1]),
            "layers not sorted: {layers:?}"
        );
    }

    #[test]
    fn test_insertion_order_by_layer() {
        let (mut tree, pane) = pane();
        let a = add_at_layer(&mut tree, pane, 200);
        let zero = add_at_layer(&mut tree, pane, 0);
        let b = add_at_layer(&mut tree, pane, 200);
        let hundred = add_at_layer(&mut tree, pane, 100);

        assert_eq!(tree.children(pane), &[a, b, hundred, zero]);
        assert_eq!(tree.layer_begin(pane, 200), 0);
        assert_eq!(tree.layer_end(pane, 200), 2);
        assert_eq!(tree.layer_begin(pane, 50), 3);
        assert_eq!(tree.layer_end(pane, 50), 3);
        assert_eq!(tree.widgets_in_layer(pane, 100), vec![hundred]);
    }

    #[test]
    fn test_default_layer_without_constraint() {
        let (mut tree, pane) = pane();
        let popup = add_at_layer(&mut tree, pane, POPUP_LAYER);
        let plain = tree.create(WidgetKind::Widget);
        tree.add(pane, plain, None, None).unwrap();
        let content = add_at_layer(&mut tree, pane, FRAME_CONTENT_LAYER);

        assert_eq!(tree.layer(plain), DEFAULT_LAYER);
        assert_eq!(tree.children(pane), &[popup, plain, content]);
    }

    #[test]
    fn test_index_is_position_within_layer() {
        let (mut tree, pane) = pane();
        let a = add_at_layer(&mut tree, pane, 0);
        let b = add_at_layer(&mut tree, pane, 0);
        let front = tree.create(WidgetKind::Widget);
        tree.add(pane, front, Some(Constraint::Layer(0)), Some(0))
            .unwrap();

        assert_eq!(tree.children(pane), &[front, a, b]);
        assert_eq!(tree.position(b), Some(2));
    }

    #[test]
    fn test_set_layer_round_trip() {
        let (mut tree, pane) = pane();
        let others: Vec<_> = [0, 0, 100, 100, 100, 200]
            .into_iter()
            .map(|layer| add_at_layer(&mut tree, pane, layer))
            .collect();
        let widget = add_at_layer(&mut tree, pane, 0);

        for (layer, position) in [(100, 0), (100, 2), (100, 3), (200, 1), (0, 2), (-5, 0)] {
            tree.set_layer(widget, layer, Some(position)).unwrap();
            assert_eq!(tree.layer(widget), layer);
            assert_eq!(tree.position(widget), Some(position));
            assert_sorted(&tree, pane);
        }
        assert_eq!(tree.children(pane).len(), others.len() + 1);
    }

    #[test]
    fn test_set_layer_unchanged_is_noop() {
        let (mut tree, pane) = pane();
        let a = add_at_layer(&mut tree, pane, 0);
        let b = add_at_layer(&mut tree, pane, 0);

        assert!(!tree.set_layer(b, 0, None).unwrap());
        assert!(!tree.set_layer(a, 0, Some(0)).unwrap());
        assert!(tree.set_layer(a, 0, None).unwrap());
        assert_eq!(tree.children(pane), &[b, a]);
    }

    #[test]
    fn test_move_to_front_and_back() {
        let (mut tree, pane) = pane();
        let top = add_at_layer(&mut tree, pane, 100);
        let a = add_at_layer(&mut tree, pane, 0);
        let b = add_at_layer(&mut tree, pane, 0);
        let c = add_at_layer(&mut tree, pane, 0);

        tree.move_to_front(c).unwrap();
        assert_eq!(tree.children(pane), &[top, c, a, b]);
        tree.move_to_back(c).unwrap();
        assert_eq!(tree.children(pane), &[top, a, b, c]);
        assert_eq!(tree.position(top), Some(0));
    }

    #[test]
    fn test_sorted_after_mixed_operations() {
        let (mut tree, pane) = pane();
        let layers = [0, 300, -100, 200, 100, 0, 200, 100, 300, 0];
        let widgets: Vec<_> = layers
            .iter()
            .map(|&layer| add_at_layer(&mut tree, pane, layer))
            .collect();
        assert_sorted(&tree, pane);

        for (i, &widget) in widgets.iter().enumerate() {
            match i % 4 {
                0 => {
                    tree.move_to_front(widget).unwrap();
                }
                1 => {
                    tree.move_to_back(widget).unwrap();
                }
                2 => {
                    tree.set_layer(widget, layers[(i + 3) % layers.len()], Some(1))
                        .unwrap();
                }
                _ => {
                    tree.set_layer(widget, 50, None).unwrap();
                }
            }
            assert_sorted(&tree, pane);
        }

        let extra = tree.create(WidgetKind::Widget);
        tree.add(pane, extra, Some(Constraint::Layer(150)), Some(99))
            .unwrap();
        assert_sorted(&tree, pane);
    }

    #[test]
    fn test_set_index_of_stays_within_layer() {
        let (mut tree, pane) = pane();
        let popup = add_at_layer(&mut tree, pane, POPUP_LAYER);
        let first = add_at_layer(&mut tree, pane, DEFAULT_LAYER);
        let second = add_at_layer(&mut tree, pane, DEFAULT_LAYER);
        let back = add_at_layer(&mut tree, pane, FRAME_CONTENT_LAYER);

        assert!(tree.set_index_of(pane, second, 0));
        assert_sorted(&tree, pane);
        assert_eq!(tree.children(pane), &[popup, second, first, back]);
        assert_eq!(tree.position(second), Some(0));

        assert!(tree.set_index_of(pane, popup, 3));
        assert_sorted(&tree, pane);
        assert_eq!(tree.index_of(pane, popup), Some(0));

        assert!(tree.set_index_of(pane, second, 10));
        assert_sorted(&tree, pane);
        assert_eq!(tree.children(pane), &[popup, first, second, back]);
    }

    #[test]
    fn test_non_layered_parent_rejected() {
        let mut tree = WidgetTree::new();
        let plain = tree.create(WidgetKind::Widget);
        let child = tree.create(WidgetKind::Widget);
        tree.add(plain, child, None, None).unwrap();

        assert_eq!(
            tree.set_layer(child, 100, None),
            Err(TreeError::NotLayered(child))
        );
        assert_eq!(tree.position(child), None);
    }

    #[test]
    fn test_layer_recorded_before_add() {
        let (mut tree, pane) = pane();
        let first = add_at_layer(&mut tree, pane, 0);
        let popup = tree.create(WidgetKind::PopupMenu);
        assert!(tree.set_layer(popup, POPUP_LAYER, None).unwrap());

        tree.add(pane, popup, None, None).unwrap();
        assert_eq!(tree.children(pane), &[popup, first]);
    }
}
