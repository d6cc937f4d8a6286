//! Desktop pane frame management.
//!
//! A desktop pane hosts internal frames on [`FRAME_LAYER`]. Adding a window
//! decorates it: an internal frame is its own frame, any other widget is
//! wrapped into a bordered frame. Each frame gets a title bar in its north
//! region. Frame state (restore bounds, maximized, minimized) is stored as
//! properties on the frame.

use ufo_core::{Dimension, Rect};
use ufo_style::BorderType;

use super::WidgetId;
use super::kind::WidgetKind;
use super::layered::FRAME_LAYER;
use super::layout::BorderLayout;
use super::node::{BorderRegion, Constraint};
use super::tree::WidgetTree;
use crate::error::{TreeError, TreeResult};

/// Window property: the frame decorating the window.
pub const FRAME_DECORATION_KEY: &str = "frame_decoration";
/// Window property: the frame title.
pub const FRAME_TITLE_KEY: &str = "frame_title";
/// Frame property: the title bar widget.
pub const FRAME_TITLE_BAR_KEY: &str = "frame_title_bar";
/// Frame property: bounds to go back to when restored.
pub const FRAME_RESTORE_BOUNDS_KEY: &str = "frame_restore_bounds";
/// Frame property: set while maximized.
pub const FRAME_MAXIMIZED_KEY: &str = "frame_maximized";
/// Frame property: set while minimized.
pub const FRAME_MINIMIZED_KEY: &str = "frame_minimized";

/// Size of a minimized frame, placed at the bottom left of the desktop.
pub const MINIMIZED_FRAME_SIZE: Dimension = Dimension::new(100, 20);

const DEFAULT_FRAME_TITLE: &str = "internal frame";

impl WidgetTree {
    /// Add a window to a desktop pane, in front of the other frames.
    ///
    /// Returns the widgets that became realized.
    pub fn add_frame(
        &mut self,
        desktop: WidgetId,
        window: WidgetId,
    ) -> TreeResult<Vec<WidgetId>> {
        if self.node(desktop)?.kind != WidgetKind::DesktopPane {
            return Err(TreeError::NotLayered(desktop));
        }
        let window_kind = self.node(window)?.kind;
        let bounds = self.bounds(window);

        let (frame, title) = if window_kind == WidgetKind::InternalFrame {
            if self.node(window)?.layout.is_none() {
                self.set_layout(window, Some(Box::new(BorderLayout::new())))?;
            }
            (window, self.text(window).to_string())
        } else {
            let frame = self.create_named(WidgetKind::Widget, "frame");
            self.set_border(frame, BorderType::Line)?;
            self.set_layout(frame, Some(Box::new(BorderLayout::new())))?;
            self.add(
                frame,
                window,
                Some(Constraint::Region(BorderRegion::Center)),
                None,
            )?;
            (frame, DEFAULT_FRAME_TITLE.to_string())
        };

        let title_bar = self.create_named(WidgetKind::Label, "title_bar");
        self.set_text(title_bar, title.clone())?;
        self.add(
            frame,
            title_bar,
            Some(Constraint::Region(BorderRegion::North)),
            None,
        )?;

        self.put_property(window, FRAME_TITLE_KEY, title)?;
        self.put_property(window, FRAME_DECORATION_KEY, frame)?;
        self.put_property(frame, FRAME_TITLE_BAR_KEY, title_bar)?;
        self.set_bounds(frame, bounds)?;

        tracing::debug!(target: "ufo::widget", ?desktop, ?window, ?frame, "added frame");
        self.add(
            desktop,
            frame,
            Some(Constraint::Layer(FRAME_LAYER)),
            Some(0),
        )
    }

    /// The frame of a window, if it is decorated and still on its desktop.
    pub fn frame_of(&self, window: WidgetId) -> Option<WidgetId> {
        let frame = *self.property::<WidgetId>(window, FRAME_DECORATION_KEY)?;
        let parent = self.parent(frame)?;
        (self.kind(parent)? == WidgetKind::DesktopPane).then_some(frame)
    }

    /// Remove a window's frame from its desktop and undo the decoration.
    ///
    /// Returns the window if a frame was removed.
    pub fn remove_frame(&mut self, window: WidgetId) -> Option<WidgetId> {
        let frame = *self.property::<WidgetId>(window, FRAME_DECORATION_KEY)?;
        let removed = self
            .parent(frame)
            .is_some_and(|desktop| self.remove(desktop, frame));

        if let Some(&title_bar) = self.property::<WidgetId>(frame, FRAME_TITLE_BAR_KEY) {
            self.destroy(title_bar);
        }
        self.remove_property(frame, FRAME_TITLE_BAR_KEY);
        if frame != window {
            self.remove(frame, window);
            self.destroy(frame);
        }
        self.remove_property(window, FRAME_DECORATION_KEY);

        removed.then_some(window)
    }

    /// Close a window. Same as [`remove_frame`](Self::remove_frame).
    pub fn close_frame(&mut self, window: WidgetId) -> Option<WidgetId> {
        self.remove_frame(window)
    }

    /// Make a window's frame fill its desktop.
    pub fn maximize(&mut self, window: WidgetId) -> TreeResult<()> {
        let Some(frame) = self.frame_of(window) else {
            return Ok(());
        };
        if !self.is_minimized(window) {
            let bounds = self.bounds(frame);
            self.put_property(frame, FRAME_RESTORE_BOUNDS_KEY, bounds)?;
        }
        self.put_property(frame, FRAME_MAXIMIZED_KEY, true)?;
        self.remove_property(frame, FRAME_MINIMIZED_KEY);

        let desktop_size = self.parent(frame).map_or(Dimension::ZERO, |d| self.size(d));
        self.set_bounds(frame, Rect::new(0, 0, desktop_size.w, desktop_size.h))
    }

    /// Whether a window's frame is maximized.
    pub fn is_maximized(&self, window: WidgetId) -> bool {
        self.frame_of(window)
            .is_some_and(|frame| self.property::<bool>(frame, FRAME_MAXIMIZED_KEY).is_some())
    }

    /// Shrink a window's frame to a small bar at the bottom of the desktop.
    pub fn minimize(&mut self, window: WidgetId) -> TreeResult<()> {
        let Some(frame) = self.frame_of(window) else {
            return Ok(());
        };
        if !self.is_maximized(window) {
            let bounds = self.bounds(frame);
            self.put_property(frame, FRAME_RESTORE_BOUNDS_KEY, bounds)?;
        }
        self.put_property(frame, FRAME_MINIMIZED_KEY, true)?;
        self.remove_property(frame, FRAME_MAXIMIZED_KEY);

        let desktop_h = self.parent(frame).map_or(0, |d| self.size(d).h);
        self.set_bounds(
            frame,
            Rect::new(
                0,
                desktop_h - MINIMIZED_FRAME_SIZE.h,
                MINIMIZED_FRAME_SIZE.w,
                MINIMIZED_FRAME_SIZE.h,
            ),
        )
    }

    /// Whether a window's frame is minimized.
    pub fn is_minimized(&self, window: WidgetId) -> bool {
        self.frame_of(window)
            .is_some_and(|frame| self.property::<bool>(frame, FRAME_MINIMIZED_KEY).is_some())
    }

    /// Restore a maximized or minimized frame to its previous bounds.
    pub fn restore(&mut self, window: WidgetId) -> TreeResult<()> {
        let Some(frame) = self.frame_of(window) else {
            return Ok(());
        };
        let restore_bounds = self.property::<Rect>(frame, FRAME_RESTORE_BOUNDS_KEY).copied();
        self.remove_property(frame, FRAME_MAXIMIZED_KEY);
        self.remove_property(frame, FRAME_MINIMIZED_KEY);
        if let Some(bounds) = restore_bounds {
            self.remove_property(frame, FRAME_RESTORE_BOUNDS_KEY);
            self.set_bounds(frame, bounds)?;
        }
        Ok(())
    }

    /// Set a window's frame title.
    pub fn set_frame_title(
        &mut self,
        window: WidgetId,
        title: impl Into<String>,
    ) -> TreeResult<()> {
        let title = title.into();
        let title_bar = self
            .property::<WidgetId>(window, FRAME_DECORATION_KEY)
            .and_then(|&frame| self.property::<WidgetId>(frame, FRAME_TITLE_BAR_KEY))
            .copied();
        if let Some(title_bar) = title_bar {
            self.set_text(title_bar, title.clone())?;
        }
        self.put_property(window, FRAME_TITLE_KEY, title)
    }

    /// A window's frame title (empty if none).
    pub fn frame_title(&self, window: WidgetId) -> &str {
        self.get(window)
            .map_or("", |node| node.properties().get_string(FRAME_TITLE_KEY))
    }

    /// Bring a window's frame to the front of the frame layer.
    pub fn activate_frame(&mut self, window: WidgetId) -> TreeResult<bool> {
        match self.frame_of(window) {
            Some(frame) => self.move_to_front(frame),
            None => Ok(false),
        }
    }
}
