//! The widget arena.
//!
//! [`WidgetTree`] owns every widget node and performs all structural
//! operations: parenting, geometry, size hints, invalidation and
//! validation. Layered-pane and desktop-pane operations live in their own
//! modules as further `impl WidgetTree` blocks.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use slotmap::SlotMap;
use ufo_core::logging::TreeDebug;
use ufo_core::{ConnectionId, DebugTree, Dimension, Insets, PerfSpan, Point, Rect};
use ufo_style::{BorderType, FixedFontMetrics, FontMetrics, FontSpec, Palette};

use super::dispatcher::{DispatchResult, EventDispatcher, FocusState};
use super::events::{ActionEvent, Event, EventMask, EventType};
use super::keyboard::{InputCondition, InputMap, KeyStroke};
use super::kind::{Capabilities, WidgetKind};
use super::layered::{DEFAULT_LAYER, LAYER_KEY};
use super::layout::LayoutManager;
use super::node::{
    Constraint, HAlignment, LAYOUT_CONSTRAINT_KEY, UiAttributes, VAlignment, WidgetNode,
};
use super::WidgetId;
use crate::error::{TreeError, TreeResult};
use crate::laf::UiDelegate;

/// Arena of widgets.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    metrics: Arc<dyn FontMetrics>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("widgets", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

/// Event types a freshly created widget of the given kind processes.
fn default_event_mask(kind: WidgetKind) -> EventMask {
    let caps = kind.capabilities();
    let mut mask = EventMask::NONE;
    if caps.contains(Capabilities::ACTIVATABLE) {
        mask |= EventMask::MOUSE;
    }
    if caps.contains(Capabilities::FOCUS_ON_PRESS) {
        mask |= EventMask::MOUSE | EventMask::KEY | EventMask::FOCUS;
    }
    mask
}

impl WidgetTree {
    /// Create an empty tree that measures text with [`FixedFontMetrics`].
    pub fn new() -> Self {
        Self::with_font_metrics(Arc::new(FixedFontMetrics))
    }

    /// Create an empty tree with backend font metrics.
    pub fn with_font_metrics(metrics: Arc<dyn FontMetrics>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            metrics,
        }
    }

    /// Font metrics used by UI delegates to size text.
    pub fn font_metrics(&self) -> &dyn FontMetrics {
        self.metrics.as_ref()
    }

    /// Replace the font metrics. Invalidates every cached size.
    pub fn set_font_metrics(&mut self, metrics: Arc<dyn FontMetrics>) {
        self.metrics = metrics;
        for node in self.nodes.values_mut() {
            node.cached_preferred.set(None);
            node.needs_layout = true;
        }
    }

    // =========================================================================
    // Creation and Lookup
    // =========================================================================

    /// Create a detached widget.
    pub fn create(&mut self, kind: WidgetKind) -> WidgetId {
        let mut node = WidgetNode::new(kind);
        node.event_mask = default_event_mask(kind);
        node.focusable = !matches!(
            kind,
            WidgetKind::Label
                | WidgetKind::Separator
                | WidgetKind::ProgressBar
                | WidgetKind::MenuBar
                | WidgetKind::PopupMenu
                | WidgetKind::GroupBox
        );
        let id = self.nodes.insert(node);
        tracing::trace!(target: "ufo::widget", ?id, %kind, "created widget");
        id
    }

    /// Create a detached widget with a name.
    pub fn create_named(&mut self, kind: WidgetKind, name: impl Into<String>) -> WidgetId {
        let id = self.create(kind);
        if let Some(node) = self.nodes.get_mut(id) {
            node.name = name.into();
        }
        id
    }

    /// Destroy a widget and its subtree, detaching it from its parent first.
    ///
    /// Returns `false` if the id is not alive.
    pub fn destroy(&mut self, id: WidgetId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            self.remove(parent, id);
        }
        for widget in self.subtree(id) {
            self.nodes.remove(widget);
        }
        true
    }

    /// Check whether the id refers to a live widget.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a widget node.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    /// Get a widget node, failing for dead ids.
    pub fn node(&self, id: WidgetId) -> TreeResult<&WidgetNode> {
        self.nodes.get(id).ok_or(TreeError::InvalidWidget(id))
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> TreeResult<&mut WidgetNode> {
        self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))
    }

    /// The kind of a widget.
    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.nodes.get(id).map(|n| n.kind)
    }

    /// Look up a widget by name.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// The parent of a widget.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of a widget, front-most first. Empty for dead ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The child at an index.
    pub fn child_at(&self, parent: WidgetId, index: usize) -> Option<WidgetId> {
        self.children(parent).get(index).copied()
    }

    /// Index of a child within its parent.
    pub fn index_of(&self, parent: WidgetId, child: WidgetId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Move a child to another index, clamped to the child count.
    ///
    /// In a layered pane the index is also clamped to the child's layer.
    /// Returns `false` if `child` is not a child of `parent`.
    pub fn set_index_of(&mut self, parent: WidgetId, child: WidgetId, index: usize) -> bool {
        let Some(current) = self.index_of(parent, child) else {
            return false;
        };
        let layered = self
            .kind(parent)
            .is_some_and(|kind| kind.has(Capabilities::LAYERED));
        let Ok(node) = self.node_mut(parent) else {
            return false;
        };
        node.children.remove(current);
        let mut index = index.min(node.children.len());
        if layered {
            let layer = self.layer(child);
            index = index.clamp(self.layer_begin(parent, layer), self.layer_end(parent, layer));
        }
        if let Ok(node) = self.node_mut(parent) {
            node.children.insert(index, child);
        }
        self.invalidate(parent);
        true
    }

    /// Ancestors of a widget, nearest first.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            result.push(ancestor);
            current = self.parent(ancestor);
        }
        result
    }

    /// Check if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// The topmost ancestor of a widget (the widget itself if detached).
    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    /// A widget and all its descendants in preorder.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            result.push(current);
            stack.extend(node.children.iter().rev());
        }
        result
    }

    /// Add `child` to `parent`.
    ///
    /// The child is inserted at `index`, or appended when `index` is `None`.
    /// Layered parents ignore the plain index semantics: the child goes into
    /// the layer named by a [`Constraint::Layer`] (or its stored layer) and
    /// `index` is the position within that layer. Other constraints are
    /// stored as the child's layout constraint.
    ///
    /// A child owned by another parent is removed from it first. Adding a
    /// child to its current parent only repositions it.
    ///
    /// Returns the widgets that became realized, in preorder. The caller
    /// (normally [`UiSession`](crate::UiSession)) installs their UI delegates
    /// and fires `widget_added` for them.
    pub fn add(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        constraint: Option<Constraint>,
        index: Option<usize>,
    ) -> TreeResult<Vec<WidgetId>> {
        let parent_kind = self.node(parent)?.kind;
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::CircularParentage { parent, child });
        }

        let layered = parent_kind.has(Capabilities::LAYERED);
        match constraint {
            Some(Constraint::Layer(layer)) if layered => {
                self.node_mut(child)?.properties.put(LAYER_KEY, layer);
            }
            Some(constraint) => {
                self.node_mut(child)?
                    .properties
                    .put(LAYOUT_CONSTRAINT_KEY, constraint);
            }
            None => {}
        }
        if layered && !self.node(child)?.properties.contains(LAYER_KEY) {
            self.node_mut(child)?.properties.put(LAYER_KEY, DEFAULT_LAYER);
        }

        if self.parent(child) == Some(parent) {
            if let Some(current) = self.index_of(parent, child) {
                self.node_mut(parent)?.children.remove(current);
            }
            self.insert_child(parent, child, layered, index)?;
            self.invalidate(parent);
            return Ok(Vec::new());
        }

        if let Some(old_parent) = self.parent(child) {
            self.remove(old_parent, child);
        }

        self.insert_child(parent, child, layered, index)?;
        {
            let node = self.node_mut(child)?;
            node.parent = Some(parent);
            node.visible = true;
        }
        self.invalidate_tree(child);

        tracing::debug!(target: "ufo::widget", ?parent, ?child, "added widget");

        if self.node(parent)?.realized {
            Ok(self.realize(child))
        } else {
            Ok(Vec::new())
        }
    }

    fn insert_child(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        layered: bool,
        index: Option<usize>,
    ) -> TreeResult<()> {
        let at = if layered {
            let layer = self.layer(child);
            self.layer_insert_index(parent, layer, index)
        } else {
            let len = self.node(parent)?.children.len();
            index.map_or(len, |i| i.min(len))
        };
        self.node_mut(parent)?.children.insert(at, child);
        Ok(())
    }

    /// Remove `child` from `parent`.
    ///
    /// Returns `false` (and does nothing) if `child` is not a child of
    /// `parent`.
    pub fn remove(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        match self.index_of(parent, child) {
            Some(index) => self.remove_at(parent, index).is_some(),
            None => false,
        }
    }

    /// Remove the child at `index`. Returns the removed widget.
    ///
    /// The child is hidden, detached and unrealized; `widget_removed` fires
    /// for every realized widget of its subtree, children first.
    pub fn remove_at(&mut self, parent: WidgetId, index: usize) -> Option<WidgetId> {
        let node = self.nodes.get_mut(parent)?;
        if index >= node.children.len() {
            return None;
        }
        let child = node.children.remove(index);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
            child_node.visible = false;
        }
        self.invalidate_tree(child);
        self.invalidate(parent);
        self.unrealize(child);
        tracing::debug!(target: "ufo::widget", ?parent, ?child, "removed widget");
        Some(child)
    }

    /// Remove every child of `parent`. Returns how many were removed.
    pub fn remove_all(&mut self, parent: WidgetId) -> usize {
        let mut count = 0;
        while self.remove_at(parent, 0).is_some() {
            count += 1;
        }
        count
    }

    // =========================================================================
    // Realization
    // =========================================================================

    /// Mark a subtree as part of a realized hierarchy.
    ///
    /// Returns the widgets that were not realized before, in preorder.
    pub fn realize(&mut self, id: WidgetId) -> Vec<WidgetId> {
        let mut realized = Vec::new();
        for widget in self.subtree(id) {
            if let Some(node) = self.nodes.get_mut(widget)
                && !node.realized
            {
                node.realized = true;
                realized.push(widget);
            }
        }
        realized
    }

    /// Unrealize a subtree, emitting `widget_removed` children first.
    fn unrealize(&mut self, id: WidgetId) {
        for widget in self.subtree(id).into_iter().rev() {
            if let Some(node) = self.nodes.get_mut(widget)
                && node.realized
            {
                node.realized = false;
                node.signals.widget_removed.emit(widget);
            }
        }
    }

    /// Whether a widget is part of a realized hierarchy.
    pub fn is_realized(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.realized)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Bounds relative to the parent.
    pub fn bounds(&self, id: WidgetId) -> Rect {
        self.nodes.get(id).map_or(Rect::ZERO, |n| n.bounds)
    }

    /// Size of a widget.
    pub fn size(&self, id: WidgetId) -> Dimension {
        self.bounds(id).size()
    }

    /// Set the bounds of a widget.
    ///
    /// The size is clamped to the explicit minimum and maximum sizes.
    /// `WidgetMoved`/`WidgetResized` are delivered to interested widgets, and
    /// a size change marks the widget as needing layout.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        let min = node.minimum_size.unwrap_or(Dimension::ZERO);
        let size = bounds
            .size()
            .clamp_to(node.maximum_size())
            .expand_to(min)
            .non_negative();
        let new_bounds = Rect::from_parts(bounds.location(), size);
        let old_bounds = node.bounds;
        if new_bounds == old_bounds {
            return Ok(());
        }
        node.bounds = new_bounds;

        let resized = old_bounds.size() != new_bounds.size();
        if resized {
            node.needs_layout = true;
        }
        if old_bounds.location() != new_bounds.location() {
            self.notify(id, &Event::widget(EventType::WidgetMoved, new_bounds));
        }
        if resized {
            self.notify(id, &Event::widget(EventType::WidgetResized, new_bounds));
        }
        Ok(())
    }

    /// Set the location, keeping the size.
    pub fn set_location(&mut self, id: WidgetId, location: Point) -> TreeResult<()> {
        let size = self.node(id)?.bounds.size();
        self.set_bounds(id, Rect::from_parts(location, size))
    }

    /// Set the size, keeping the location.
    pub fn set_size(&mut self, id: WidgetId, size: Dimension) -> TreeResult<()> {
        let location = self.node(id)?.bounds.location();
        self.set_bounds(id, Rect::from_parts(location, size))
    }

    /// Location of a widget relative to the topmost ancestor.
    pub fn root_location(&self, id: WidgetId) -> Point {
        let mut location = Point::ZERO;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            location = location + self.bounds(current).location();
            current = parent;
        }
        location
    }

    /// Border insets of a widget. `BorderType::Ui` asks the UI delegate.
    pub fn border_insets(&self, id: WidgetId) -> Insets {
        let Some(node) = self.nodes.get(id) else {
            return Insets::ZERO;
        };
        match (node.border, node.ui.as_ref()) {
            (BorderType::Ui, Some(ui)) => ui.border_insets(node),
            (border, _) => border.insets(),
        }
    }

    /// Border insets plus margin.
    pub fn insets(&self, id: WidgetId) -> Insets {
        let margin = self.nodes.get(id).map_or(Insets::ZERO, |n| n.margin);
        margin + self.border_insets(id)
    }

    /// The area inside the insets, in widget coordinates.
    pub fn inner_bounds(&self, id: WidgetId) -> Rect {
        Rect::from_parts(Point::ZERO, self.size(id)).shrink(self.insets(id))
    }

    // =========================================================================
    // Size Hints
    // =========================================================================

    /// The preferred size.
    ///
    /// An explicit preferred size wins. Otherwise the UI delegate is asked,
    /// then the layout manager; a widget with neither prefers zero. The
    /// computed value is cached until the widget is invalidated.
    pub fn preferred_size(&self, id: WidgetId) -> Dimension {
        let Some(node) = self.nodes.get(id) else {
            return Dimension::ZERO;
        };
        if let Some(size) = node.preferred_size {
            return size;
        }
        if let Some(size) = node.cached_preferred.get() {
            return size;
        }
        let size = self.compute_preferred_size(id, node, Dimension::MAX);
        node.cached_preferred.set(Some(size));
        size
    }

    /// The preferred size when at most `max` is available.
    ///
    /// Delegates and layouts that can trade width for height (wrapping text,
    /// flow layouts) use `max` to do so. The result never exceeds `max`.
    pub fn preferred_size_within(&self, id: WidgetId, max: Dimension) -> Dimension {
        let Some(node) = self.nodes.get(id) else {
            return Dimension::ZERO;
        };
        let size = match node.preferred_size {
            Some(size) => size,
            None if max == Dimension::MAX => self.preferred_size(id),
            None => self.compute_preferred_size(id, node, max),
        };
        size.clamp_to(max)
    }

    fn compute_preferred_size(&self, id: WidgetId, node: &WidgetNode, max: Dimension) -> Dimension {
        node.ui
            .as_ref()
            .and_then(|ui| ui.preferred_size(self, id, max))
            .or_else(|| {
                node.layout
                    .as_ref()
                    .map(|layout| layout.preferred_layout_size(self, id, max))
            })
            .unwrap_or(Dimension::ZERO)
            .non_negative()
    }

    /// The minimum size: explicit, else from the layout manager, else zero.
    pub fn minimum_size(&self, id: WidgetId) -> Dimension {
        let Some(node) = self.nodes.get(id) else {
            return Dimension::ZERO;
        };
        if let Some(size) = node.minimum_size {
            return size;
        }
        node.layout
            .as_ref()
            .map_or(Dimension::ZERO, |layout| layout.minimum_layout_size(self, id))
    }

    /// The maximum size; unbounded unless set.
    pub fn maximum_size(&self, id: WidgetId) -> Dimension {
        self.nodes.get(id).map_or(Dimension::MAX, |n| n.maximum_size())
    }

    /// Override the computed preferred size. `None` restores computation.
    pub fn set_preferred_size(&mut self, id: WidgetId, size: Option<Dimension>) -> TreeResult<()> {
        self.node_mut(id)?.preferred_size = size;
        self.invalidate(id);
        Ok(())
    }

    /// Set an explicit minimum size.
    pub fn set_minimum_size(&mut self, id: WidgetId, size: Option<Dimension>) -> TreeResult<()> {
        self.node_mut(id)?.minimum_size = size;
        self.invalidate(id);
        Ok(())
    }

    /// Set an explicit maximum size.
    pub fn set_maximum_size(&mut self, id: WidgetId, size: Option<Dimension>) -> TreeResult<()> {
        self.node_mut(id)?.maximum_size = size;
        self.invalidate(id);
        Ok(())
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Install a layout manager. `None` removes the current one.
    pub fn set_layout(
        &mut self,
        id: WidgetId,
        layout: Option<Box<dyn LayoutManager>>,
    ) -> TreeResult<()> {
        self.node_mut(id)?.layout = layout;
        self.invalidate(id);
        Ok(())
    }

    /// Store a child's layout constraint.
    pub fn set_constraint(&mut self, id: WidgetId, constraint: Constraint) -> TreeResult<()> {
        self.node_mut(id)?
            .properties
            .put(LAYOUT_CONSTRAINT_KEY, constraint);
        if let Some(parent) = self.parent(id) {
            self.invalidate(parent);
        }
        Ok(())
    }

    /// Store a box-layout flex factor.
    pub fn set_flex(&mut self, id: WidgetId, flex: i32) -> TreeResult<()> {
        self.set_constraint(id, Constraint::Flex(flex))
    }

    /// The stored layout constraint of a widget.
    pub fn constraint(&self, id: WidgetId) -> Option<Constraint> {
        self.nodes.get(id).and_then(WidgetNode::constraint)
    }

    /// Mark a widget and its ancestors as needing layout.
    ///
    /// Cached preferred sizes along the chain are dropped. Nothing is
    /// recomputed until the next [`validate`](Self::validate).
    pub fn invalidate(&mut self, id: WidgetId) {
        let mut current = Some(id);
        while let Some(widget) = current {
            let Some(node) = self.nodes.get_mut(widget) else {
                break;
            };
            node.needs_layout = true;
            node.cached_preferred.set(None);
            current = node.parent;
        }
    }

    /// Invalidate a whole subtree and the ancestors of its root.
    pub fn invalidate_tree(&mut self, id: WidgetId) {
        for widget in self.subtree(id) {
            if let Some(node) = self.nodes.get_mut(widget) {
                node.needs_layout = true;
                node.cached_preferred.set(None);
            }
        }
        self.invalidate(id);
    }

    /// Lay out every dirty widget of a subtree.
    ///
    /// Placements are computed by the layout manager from an immutable view
    /// of the tree and then applied. Validating a clean tree changes nothing.
    #[tracing::instrument(skip_all, target = "ufo::layout", level = "trace")]
    pub fn validate(&mut self, id: WidgetId) {
        let _perf = PerfSpan::new("validate");
        self.validate_node(id);
    }

    fn validate_node(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.needs_layout {
            let placements = node
                .layout
                .as_ref()
                .map(|layout| layout.layout_container(self, id))
                .unwrap_or_default();
            tracing::trace!(
                target: "ufo::layout",
                ?id,
                placements = placements.len(),
                "layout container"
            );
            for placement in placements {
                if let Err(error) = self.set_bounds(placement.widget, placement.bounds) {
                    tracing::warn!(target: "ufo::layout", ?id, %error, "dropped placement");
                }
            }
            if let Some(node) = self.nodes.get_mut(id) {
                node.needs_layout = false;
            }
        }
        for child in self.children(id).to_vec() {
            self.validate_node(child);
        }
    }

    /// Whether a widget needs layout.
    pub fn needs_layout(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.needs_layout)
    }

    // =========================================================================
    // Hit Testing
    // =========================================================================

    /// The deepest widget containing `point`, given in `id`'s coordinates.
    ///
    /// Children are searched front-most first.
    pub fn widget_at(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        self.find_at(id, point, false)
    }

    /// Like [`widget_at`](Self::widget_at), skipping hidden widgets.
    pub fn visible_widget_at(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        self.find_at(id, point, true)
    }

    fn find_at(&self, id: WidgetId, point: Point, visible_only: bool) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        if visible_only && !node.visible {
            return None;
        }
        if !Rect::from_parts(Point::ZERO, node.bounds.size()).contains(point) {
            return None;
        }
        node.children
            .iter()
            .find_map(|&child| {
                let origin = self.bounds(child).location();
                self.find_at(child, point - origin, visible_only)
            })
            .or(Some(id))
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Whether a widget is visible.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    /// Whether a widget and all its ancestors are visible.
    pub fn is_showing(&self, id: WidgetId) -> bool {
        self.is_visible(id) && self.ancestors(id).iter().all(|&a| self.is_visible(a))
    }

    /// Show or hide a widget. Fires `WidgetShown`/`WidgetHidden`.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        if node.visible == visible {
            return Ok(());
        }
        node.visible = visible;
        let bounds = node.bounds;
        let event_type = if visible {
            EventType::WidgetShown
        } else {
            EventType::WidgetHidden
        };
        self.notify(id, &Event::widget(event_type, bounds));
        if let Some(parent) = self.parent(id) {
            self.invalidate(parent);
        }
        Ok(())
    }

    /// Enable or disable a widget.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> TreeResult<()> {
        self.node_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Set whether a widget can take keyboard focus.
    pub fn set_focusable(&mut self, id: WidgetId, focusable: bool) -> TreeResult<()> {
        self.node_mut(id)?.focusable = focusable;
        Ok(())
    }

    /// Set whether a widget paints its whole background.
    pub fn set_opaque(&mut self, id: WidgetId, opaque: bool) -> TreeResult<()> {
        self.node_mut(id)?.opaque = opaque;
        Ok(())
    }

    /// Set the opacity, clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, id: WidgetId, opacity: f32) -> TreeResult<()> {
        self.node_mut(id)?.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    /// Set the widget name.
    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) -> TreeResult<()> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    /// Set the content alignment.
    pub fn set_alignment(
        &mut self,
        id: WidgetId,
        h_alignment: HAlignment,
        v_alignment: VAlignment,
    ) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.h_alignment = h_alignment;
        node.v_alignment = v_alignment;
        Ok(())
    }

    // =========================================================================
    // Look-and-Feel Attributes
    // =========================================================================

    /// Set the border. The look-and-feel no longer overrides it.
    pub fn set_border(&mut self, id: WidgetId, border: BorderType) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.border = border;
        node.explicit_attributes.insert(UiAttributes::BORDER);
        self.invalidate(id);
        Ok(())
    }

    /// Set the margin. The look-and-feel no longer overrides it.
    pub fn set_margin(&mut self, id: WidgetId, margin: Insets) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.margin = margin;
        node.explicit_attributes.insert(UiAttributes::MARGIN);
        self.invalidate(id);
        Ok(())
    }

    /// Set the font. The look-and-feel no longer overrides it.
    pub fn set_font(&mut self, id: WidgetId, font: FontSpec) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.font = font;
        node.explicit_attributes.insert(UiAttributes::FONT);
        self.invalidate(id);
        Ok(())
    }

    /// Set the palette. The look-and-feel no longer overrides it.
    pub fn set_palette(&mut self, id: WidgetId, palette: Palette) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        node.palette = palette;
        node.explicit_attributes.insert(UiAttributes::PALETTE);
        Ok(())
    }

    /// The installed UI delegate.
    pub fn ui(&self, id: WidgetId) -> Option<Arc<dyn UiDelegate>> {
        self.nodes.get(id).and_then(|n| n.ui.clone())
    }

    /// Replace the UI delegate, letting the old one uninstall and the new one
    /// install its theme defaults.
    pub(crate) fn set_ui(
        &mut self,
        id: WidgetId,
        ui: Arc<dyn UiDelegate>,
        theme: &ufo_style::ThemeMap,
    ) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        if let Some(old) = node.ui.take() {
            old.uninstall_ui(node);
        }
        ui.install_ui(node, theme);
        node.ui = Some(ui);
        self.invalidate(id);
        Ok(())
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Set the text of a label, button or text edit.
    pub fn set_text(&mut self, id: WidgetId, text: impl Into<String>) -> TreeResult<()> {
        self.node_mut(id)?.text = text.into();
        self.invalidate(id);
        Ok(())
    }

    /// The text of a widget.
    pub fn text(&self, id: WidgetId) -> &str {
        self.nodes.get(id).map_or("", |n| n.text.as_str())
    }

    /// Set the icon resource name.
    pub fn set_icon(&mut self, id: WidgetId, icon: Option<String>) -> TreeResult<()> {
        self.node_mut(id)?.icon = icon;
        self.invalidate(id);
        Ok(())
    }

    /// Set the command sent with `action_performed`.
    pub fn set_action_command(
        &mut self,
        id: WidgetId,
        command: impl Into<String>,
    ) -> TreeResult<()> {
        self.node_mut(id)?.action_command = command.into();
        Ok(())
    }

    /// Set the selected state. Emits `selected_changed` on change.
    pub fn set_selected(&mut self, id: WidgetId, selected: bool) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        if node.selected != selected {
            node.selected = selected;
            node.signals.selected_changed.emit(selected);
        }
        Ok(())
    }

    /// Whether a toggleable widget is selected.
    pub fn is_selected(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.selected)
    }

    /// Set the range of a ranged widget; the value is clamped into it.
    pub fn set_range(&mut self, id: WidgetId, minimum: i32, maximum: i32) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        let maximum = maximum.max(minimum);
        node.range = (minimum, maximum);
        node.value = node.value.clamp(minimum, maximum);
        Ok(())
    }

    /// Set the value of a ranged widget, clamped to its range.
    pub fn set_value(&mut self, id: WidgetId, value: i32) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        let (minimum, maximum) = node.range;
        node.value = value.clamp(minimum, maximum);
        Ok(())
    }

    /// Replace the items of a list or combo box.
    pub fn set_items(&mut self, id: WidgetId, items: Vec<String>) -> TreeResult<()> {
        self.node_mut(id)?.items = items;
        self.invalidate(id);
        Ok(())
    }

    /// Append an item to a list or combo box.
    pub fn add_item(&mut self, id: WidgetId, item: impl Into<String>) -> TreeResult<()> {
        self.node_mut(id)?.items.push(item.into());
        self.invalidate(id);
        Ok(())
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Store a dynamic property.
    pub fn put_property<T: Any + Send + Sync>(
        &mut self,
        id: WidgetId,
        name: impl Into<String>,
        value: T,
    ) -> TreeResult<()> {
        self.node_mut(id)?.properties.put(name, value);
        Ok(())
    }

    /// Read a dynamic property.
    pub fn property<T: Any>(&self, id: WidgetId, name: &str) -> Option<&T> {
        self.nodes.get(id).and_then(|n| n.properties.get(name))
    }

    /// Remove a dynamic property. Returns whether it existed.
    pub fn remove_property(&mut self, id: WidgetId, name: &str) -> bool {
        self.nodes
            .get_mut(id)
            .is_some_and(|n| n.properties.remove(name))
    }

    // =========================================================================
    // Events and Signals
    // =========================================================================

    /// Connect a slot to one event type of a widget.
    ///
    /// This also enables processing of that event type on the widget.
    pub fn connect_event<F>(
        &mut self,
        id: WidgetId,
        event_type: EventType,
        slot: F,
    ) -> TreeResult<ConnectionId>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let node = self.node_mut(id)?;
        node.event_mask |= event_type.mask();
        Ok(node.signals.event_or_insert(event_type).connect(slot))
    }

    /// Disconnect an event slot. Returns whether it was connected.
    pub fn disconnect_event(
        &mut self,
        id: WidgetId,
        event_type: EventType,
        connection: ConnectionId,
    ) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.signals.event(event_type))
            .is_some_and(|signal| signal.disconnect(connection))
    }

    /// Connect a slot to `action_performed`.
    pub fn connect_action<F>(&mut self, id: WidgetId, slot: F) -> TreeResult<ConnectionId>
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        Ok(self.node(id)?.signals.action_performed.connect(slot))
    }

    /// Enable or disable processing of one event type.
    pub fn set_event_enabled(
        &mut self,
        id: WidgetId,
        event_type: EventType,
        enabled: bool,
    ) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        if enabled {
            node.event_mask |= event_type.mask();
        } else {
            node.event_mask.remove(event_type.mask());
        }
        Ok(())
    }

    /// Whether a widget processes an event type.
    pub fn is_event_enabled(&self, id: WidgetId, event_type: EventType) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| n.event_mask.contains(event_type.mask()))
    }

    /// Replace the whole interest mask.
    pub fn set_event_mask(&mut self, id: WidgetId, mask: EventMask) -> TreeResult<()> {
        self.node_mut(id)?.event_mask = mask;
        Ok(())
    }

    /// Dispatch an event to a widget outside of any session.
    ///
    /// Focus changes requested by handlers are applied to a scratch
    /// [`FocusState`] and discarded; use
    /// [`UiSession::dispatch_event`](crate::UiSession::dispatch_event) to
    /// keep them.
    pub fn dispatch_event(&mut self, id: WidgetId, event: &Event) -> DispatchResult {
        EventDispatcher::send_event(self, &mut FocusState::default(), id, event)
    }

    /// Deliver a non-propagating event to a widget if it is interested.
    ///
    /// Returns whether the widget processed the event.
    pub(crate) fn notify(&self, id: WidgetId, event: &Event) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if !node.event_mask.contains(event.event_type().mask()) {
            return false;
        }
        node.signals.emit_event(event);
        true
    }

    /// Bind an action to a key stroke.
    ///
    /// Also enables key press and release processing on the widget, so key
    /// events from a focused descendant reach its ancestor map.
    pub fn put_key_binding<F>(
        &mut self,
        id: WidgetId,
        condition: InputCondition,
        stroke: KeyStroke,
        action: F,
    ) -> TreeResult<()>
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        self.input_map_mut(id, condition)?.put(stroke, action);
        self.node_mut(id)?.event_mask |=
            EventType::KeyPressed.mask() | EventType::KeyReleased.mask();
        Ok(())
    }

    /// Mutable access to one of a widget's input maps.
    pub fn input_map_mut(
        &mut self,
        id: WidgetId,
        condition: InputCondition,
    ) -> TreeResult<&mut InputMap> {
        let node = self.node_mut(id)?;
        Ok(match condition {
            InputCondition::WhenFocused => &mut node.input_map,
            InputCondition::WhenAncestorFocused => &mut node.ancestor_input_map,
        })
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// Format a subtree for logging.
    pub fn debug_tree(&self, id: WidgetId) -> String {
        TreeDebug::new()
            .format_subtree(self, id)
            .unwrap_or_else(|e| format!("<{e}>"))
    }
}

impl DebugTree for WidgetTree {
    type Id = WidgetId;

    fn debug_name(&self, id: WidgetId) -> Option<String> {
        self.nodes.get(id).map(|n| n.name.clone())
    }

    fn debug_type(&self, id: WidgetId) -> Option<String> {
        self.nodes.get(id).map(|n| n.kind.to_string())
    }

    fn debug_properties(&self, id: WidgetId) -> Vec<String> {
        self.nodes.get(id).map_or_else(Vec::new, |n| {
            n.properties.keys().into_iter().map(String::from).collect()
        })
    }

    fn debug_children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.children(id).to_vec()
    }
}
