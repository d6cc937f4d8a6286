//! Root pane construction and layout.
//!
//! A root pane is the layered top-level widget of a session. Its content
//! pane and optional menu bar live on [`FRAME_CONTENT_LAYER`]; popups and
//! dragged widgets go on higher layers above them.

use ufo_core::{Dimension, Rect};

use super::WidgetId;
use super::kind::WidgetKind;
use super::layered::FRAME_CONTENT_LAYER;
use super::layout::{BorderLayout, BoxLayout, ChildPlacement, LayoutManager};
use super::node::Constraint;
use super::tree::WidgetTree;
use crate::error::TreeResult;

/// Root pane property: the content pane.
pub const CONTENT_PANE_KEY: &str = "root_content_pane";
/// Root pane property: the menu bar.
pub const MENU_BAR_KEY: &str = "root_menu_bar";

/// The widgets created by [`WidgetTree::create_root_pane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootPaneParts {
    pub root: WidgetId,
    pub content_pane: WidgetId,
    pub menu_bar: Option<WidgetId>,
}

/// Places the menu bar at the top and the content pane below it.
///
/// Widgets on other layers (popups, frames, drag images) keep the bounds
/// they were given; those without any size are stretched over the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootPaneLayout;

impl LayoutManager for RootPaneLayout {
    fn preferred_layout_size(
        &self,
        tree: &WidgetTree,
        container: WidgetId,
        max: Dimension,
    ) -> Dimension {
        let insets = tree.insets(container);
        let inner_max = max.shrink(insets);
        let menu = tree
            .menu_bar(container)
            .map_or(Dimension::ZERO, |m| tree.preferred_size_within(m, inner_max));
        let content = tree
            .content_pane(container)
            .map_or(Dimension::ZERO, |c| tree.preferred_size_within(c, inner_max));
        Dimension::new(menu.w.max(content.w), menu.h + content.h).grow(insets)
    }

    fn layout_container(&self, tree: &WidgetTree, container: WidgetId) -> Vec<ChildPlacement> {
        let inner = tree.inner_bounds(container);
        let menu_bar = tree.menu_bar(container);
        let content_pane = tree.content_pane(container);
        let mut placements = Vec::new();

        let mut top = inner.y;
        if let Some(menu_bar) = menu_bar.filter(|&m| tree.is_visible(m)) {
            let h = tree.preferred_size(menu_bar).h.min(inner.h);
            placements.push(ChildPlacement::new(
                menu_bar,
                Rect::new(inner.x, top, inner.w, h),
            ));
            top += h;
        }
        if let Some(content_pane) = content_pane {
            placements.push(ChildPlacement::new(
                content_pane,
                Rect::new(inner.x, top, inner.w, (inner.bottom() - top).max(0)),
            ));
        }
        for &child in tree.children(container) {
            if Some(child) == menu_bar || Some(child) == content_pane {
                continue;
            }
            if tree.size(child).is_empty() && tree.preferred_size(child).is_empty() {
                placements.push(ChildPlacement::new(child, inner));
            }
        }
        placements
    }
}

impl WidgetTree {
    /// Create a root pane with a content pane and, optionally, a menu bar.
    ///
    /// The content pane uses a [`BorderLayout`], the menu bar lays out its
    /// menus left to right.
    pub fn create_root_pane(&mut self, with_menu_bar: bool) -> TreeResult<RootPaneParts> {
        let root = self.create_named(WidgetKind::RootPane, "root_pane");
        self.set_layout(root, Some(Box::new(RootPaneLayout)))?;

        let content_pane = self.create_named(WidgetKind::Widget, "content_pane");
        self.set_layout(content_pane, Some(Box::new(BorderLayout::new())))?;
        self.set_content_pane(root, content_pane)?;

        let menu_bar = if with_menu_bar {
            let menu_bar = self.create_named(WidgetKind::MenuBar, "menu_bar");
            self.set_layout(menu_bar, Some(Box::new(BoxLayout::horizontal())))?;
            self.set_menu_bar(root, Some(menu_bar))?;
            Some(menu_bar)
        } else {
            None
        };

        Ok(RootPaneParts {
            root,
            content_pane,
            menu_bar,
        })
    }

    /// The content pane of a root pane.
    pub fn content_pane(&self, root: WidgetId) -> Option<WidgetId> {
        self.property::<WidgetId>(root, CONTENT_PANE_KEY).copied()
    }

    /// The menu bar of a root pane.
    pub fn menu_bar(&self, root: WidgetId) -> Option<WidgetId> {
        self.property::<WidgetId>(root, MENU_BAR_KEY).copied()
    }

    /// Replace the content pane. Returns the widgets that became realized.
    pub fn set_content_pane(
        &mut self,
        root: WidgetId,
        content_pane: WidgetId,
    ) -> TreeResult<Vec<WidgetId>> {
        if let Some(old) = self.content_pane(root) {
            self.remove(root, old);
        }
        self.put_property(root, CONTENT_PANE_KEY, content_pane)?;
        self.add(
            root,
            content_pane,
            Some(Constraint::Layer(FRAME_CONTENT_LAYER)),
            None,
        )
    }

    /// Replace or remove the menu bar. Returns the widgets that became
    /// realized.
    pub fn set_menu_bar(
        &mut self,
        root: WidgetId,
        menu_bar: Option<WidgetId>,
    ) -> TreeResult<Vec<WidgetId>> {
        if let Some(old) = self.menu_bar(root) {
            self.remove(root, old);
            self.remove_property(root, MENU_BAR_KEY);
        }
        let Some(menu_bar) = menu_bar else {
            return Ok(Vec::new());
        };
        self.put_property(root, MENU_BAR_KEY, menu_bar)?;
        self.add(
            root,
            menu_bar,
            Some(Constraint::Layer(FRAME_CONTENT_LAYER)),
            Some(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::POPUP_LAYER;

    #[test]
    fn test_menu_bar_above_content() {
        let mut tree = WidgetTree::new();
        let parts = tree.create_root_pane(true).unwrap();
        let menu_bar = parts.menu_bar.unwrap();
        tree.set_preferred_size(menu_bar, Some(Dimension::new(50, 24)))
            .unwrap();

        tree.set_bounds(parts.root, Rect::new(0, 0, 320, 240)).unwrap();
        tree.validate(parts.root);

        assert_eq!(tree.bounds(menu_bar), Rect::new(0, 0, 320, 24));
        assert_eq!(tree.bounds(parts.content_pane), Rect::new(0, 24, 320, 216));
        assert_eq!(tree.layer(parts.content_pane), FRAME_CONTENT_LAYER);
    }

    #[test]
    fn test_preferred_size_stacks_menu_and_content() {
        let mut tree = WidgetTree::new();
        let parts = tree.create_root_pane(true).unwrap();
        tree.set_preferred_size(parts.menu_bar.unwrap(), Some(Dimension::new(50, 20)))
            .unwrap();
        tree.set_preferred_size(parts.content_pane, Some(Dimension::new(200, 100)))
            .unwrap();

        assert_eq!(tree.preferred_size(parts.root), Dimension::new(200, 120));
    }

    #[test]
    fn test_other_layers_keep_bounds() {
        let mut tree = WidgetTree::new();
        let parts = tree.create_root_pane(false).unwrap();
        let popup = tree.create(WidgetKind::PopupMenu);
        tree.add(parts.root, popup, Some(Constraint::Layer(POPUP_LAYER)), None)
            .unwrap();
        tree.set_bounds(popup, Rect::new(10, 10, 40, 60)).unwrap();

        tree.set_bounds(parts.root, Rect::new(0, 0, 200, 200)).unwrap();
        tree.validate(parts.root);

        assert_eq!(tree.bounds(popup), Rect::new(10, 10, 40, 60));
        assert_eq!(tree.children(parts.root)[0], popup);
        assert_eq!(tree.bounds(parts.content_pane), Rect::new(0, 0, 200, 200));
    }

    #[test]
    fn test_replace_menu_bar() {
        let mut tree = WidgetTree::new();
        let parts = tree.create_root_pane(true).unwrap();
        let old = parts.menu_bar.unwrap();

        tree.set_menu_bar(parts.root, None).unwrap();
        assert_eq!(tree.menu_bar(parts.root), None);
        assert_eq!(tree.parent(old), None);
        assert_eq!(tree.children(parts.root), &[parts.content_pane]);
    }
}
