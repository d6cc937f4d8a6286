//! The UI session.
//!
//! A [`UiSession`] owns a [`WidgetTree`], the active [`LookAndFeel`] and
//! all per-session input state: the root pane, input and mouse focus, the
//! widget capturing a mouse drag, the open popup, an optional event grabber
//! and the session-wide input map.
//!
//! Raw input enters through [`mouse_pressed`](UiSession::mouse_pressed),
//! [`mouse_moved`](UiSession::mouse_moved), [`key_pressed`](UiSession::key_pressed)
//! and friends, in session coordinates. The session hit-tests the root
//! pane, synthesizes clicks, drags and enter/exit events, and sends each
//! event to its receiver through [`EventDispatcher`].
//!
//! # Example
//!
//! ```
//! use ufo::UiSession;
//! use ufo::widget::{MouseButton, WidgetKind};
//! use ufo_core::{Point, Rect};
//!
//! let mut session = UiSession::new();
//! let parts = session.create_root_pane(false, Rect::new(0, 0, 200, 100)).unwrap();
//! let button = session.create(WidgetKind::Button);
//! session.add(parts.content_pane, button, None, None).unwrap();
//!
//! session
//!     .mouse_pressed(Point::new(100, 50), MouseButton::Left, Default::default())
//!     .unwrap();
//! assert_eq!(session.focused_widget(), Some(button));
//! ```

use std::fmt;
use std::sync::Arc;

use ufo_core::{ConnectionId, Point, Rect, Signal};

use crate::error::{Error, Result};
use crate::laf::LookAndFeel;
use crate::widget::{
    ActionEvent, Constraint, DispatchResult, Event, EventDispatcher, EventType, FocusState,
    Graphics, InputMap, Key, KeyStroke, KeyboardModifiers, MouseButton, POPUP_LAYER,
    RootPaneParts, WidgetId, WidgetKind, WidgetTree, paint_tree,
};

/// Receives every event while installed with
/// [`UiSession::set_event_grabber`].
pub type EventGrabber = Arc<dyn Fn(&Event) + Send + Sync>;

/// A widget hierarchy together with its input state.
pub struct UiSession {
    tree: WidgetTree,
    laf: LookAndFeel,
    root: Option<WidgetId>,
    /// Session bounds in device coordinates. The root pane fills them.
    bounds: Rect,
    focus: FocusState,
    /// Widget under the pointer after the last motion event.
    hover: Option<WidgetId>,
    /// Press target, capturing mouse events until the button is released.
    drag_widget: Option<WidgetId>,
    popup: Option<WidgetId>,
    grabber: Option<EventGrabber>,
    mouse_position: Point,
    listeners: Signal<Event>,
    input_map: InputMap,
}

impl Default for UiSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UiSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiSession")
            .field("look_and_feel", &self.laf.name())
            .field("root", &self.root)
            .field("bounds", &self.bounds)
            .field("focus", &self.focus)
            .field("popup", &self.popup)
            .field("grabbed", &self.grabber.is_some())
            .finish_non_exhaustive()
    }
}

impl UiSession {
    /// Create a session with the basic look-and-feel.
    pub fn new() -> Self {
        Self::with_look_and_feel(LookAndFeel::basic())
    }

    /// Create a session with a custom look-and-feel.
    pub fn with_look_and_feel(laf: LookAndFeel) -> Self {
        Self {
            tree: WidgetTree::new(),
            laf,
            root: None,
            bounds: Rect::ZERO,
            focus: FocusState::default(),
            hover: None,
            drag_widget: None,
            popup: None,
            grabber: None,
            mouse_position: Point::ZERO,
            listeners: Signal::new(),
            input_map: InputMap::new(),
        }
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable access to the widget tree.
    ///
    /// Structural changes made here bypass delegate installation and focus
    /// bookkeeping; prefer [`add`](Self::add) and [`remove`](Self::remove).
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The active look-and-feel.
    pub fn look_and_feel(&self) -> &LookAndFeel {
        &self.laf
    }

    /// Switch the look-and-feel and reinstall delegates on the whole
    /// hierarchy.
    pub fn set_look_and_feel(&mut self, laf: LookAndFeel) -> Result<()> {
        tracing::debug!(target: "ufo::session", from = self.laf.name(), to = laf.name(), "switching look-and-feel");
        self.laf = laf;
        let Some(root) = self.root else {
            return Ok(());
        };
        let installed = self.laf.install_subtree(&mut self.tree, root);
        self.tree.invalidate_tree(root);
        self.tree.validate(root);
        installed
    }

    /// Create a detached widget.
    pub fn create(&mut self, kind: WidgetKind) -> WidgetId {
        self.tree.create(kind)
    }

    // =========================================================================
    // Root Pane
    // =========================================================================

    /// The root pane.
    pub fn root_pane(&self) -> Option<WidgetId> {
        self.root
    }

    /// Session bounds in device coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the session. The root pane is resized to match.
    pub fn set_bounds(&mut self, bounds: Rect) -> Result<()> {
        self.bounds = bounds;
        if let Some(root) = self.root {
            self.tree
                .set_bounds(root, Rect::from_parts(Point::ZERO, bounds.size()))?;
            self.tree.validate(root);
        }
        Ok(())
    }

    /// Create a root pane and make it the session root.
    pub fn create_root_pane(&mut self, with_menu_bar: bool, bounds: Rect) -> Result<RootPaneParts> {
        let parts = self.tree.create_root_pane(with_menu_bar)?;
        self.set_root_pane(parts.root, bounds).map(|()| parts)
    }

    /// Make `root` the top of the realized hierarchy.
    ///
    /// The root's subtree is realized: delegates are installed and
    /// `widget_added` fires for every widget. The root is sized to `bounds`,
    /// shown, validated and receives input focus.
    pub fn set_root_pane(&mut self, root: WidgetId, bounds: Rect) -> Result<()> {
        self.tree.node(root)?;
        self.root = Some(root);
        self.bounds = bounds;
        self.focus = FocusState::default();
        self.hover = None;
        self.drag_widget = None;
        self.popup = None;

        let realized = self.tree.realize(root);
        let installed = self.install_realized(&realized);
        self.tree.set_visible(root, true)?;
        self.tree
            .set_bounds(root, Rect::from_parts(Point::ZERO, bounds.size()))?;
        self.tree.validate(root);
        self.request_focus(root);
        tracing::debug!(target: "ufo::session", ?root, ?bounds, "root pane set");
        installed
    }

    /// Validate the root pane.
    pub fn validate(&mut self) {
        if let Some(root) = self.root {
            self.tree.validate(root);
        }
    }

    /// Paint the root pane.
    pub fn paint(&self, g: &mut dyn Graphics) {
        if let Some(root) = self.root {
            paint_tree(&self.tree, root, g);
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Add `child` to `parent`, see [`WidgetTree::add`].
    ///
    /// If the parent belongs to the realized hierarchy, delegates are
    /// installed into the new widgets, `widget_added` fires for each of them
    /// in preorder and the hierarchy is validated. A missing delegate is
    /// reported after the child has been attached.
    pub fn add(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        constraint: Option<Constraint>,
        index: Option<usize>,
    ) -> Result<()> {
        let realized = self.tree.add(parent, child, constraint, index)?;
        let installed = self.install_realized(&realized);
        if !realized.is_empty() {
            self.validate();
        }
        installed
    }

    /// Remove `child` from `parent`. Returns `false` if it is not a child.
    ///
    /// If the removed subtree holds the input focus, the focus owner
    /// receives `FocusLost` and the focus moves to the root pane. Mouse
    /// focus, drag capture and the open popup are cleared when they point
    /// into the subtree.
    pub fn remove(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if !self.tree.remove(parent, child) {
            return false;
        }
        let inside = |id: Option<WidgetId>, tree: &WidgetTree| {
            id.is_some_and(|id| tree.is_ancestor_or_self(child, id))
        };

        if inside(self.focus.input_focus, &self.tree) {
            EventDispatcher::release_focus(&mut self.tree, &mut self.focus);
            if let Some(root) = self.root {
                self.request_focus(root);
            }
        }
        if inside(self.focus.mouse_focus, &self.tree) {
            self.focus.mouse_focus = None;
        }
        if inside(self.hover, &self.tree) {
            self.hover = None;
        }
        if inside(self.drag_widget, &self.tree) {
            self.drag_widget = None;
        }
        if inside(self.popup, &self.tree) {
            self.popup = None;
        }
        if !self.tree.is_realized(parent) {
            return true;
        }
        self.validate();
        true
    }

    /// Decorate `window` and add it to a desktop pane, see
    /// [`WidgetTree::add_frame`].
    pub fn add_frame(&mut self, desktop: WidgetId, window: WidgetId) -> Result<()> {
        let realized = self.tree.add_frame(desktop, window)?;
        let installed = self.install_realized(&realized);
        self.validate();
        installed
    }

    /// Install delegates and fire `widget_added` for newly realized
    /// widgets. Every widget is attempted; the first error is returned.
    fn install_realized(&mut self, realized: &[WidgetId]) -> Result<()> {
        let mut first_error = None;
        for &id in realized {
            if let Err(error) = self.laf.install_ui(&mut self.tree, id) {
                first_error.get_or_insert(error);
            }
        }
        for &id in realized {
            if let Some(node) = self.tree.get(id) {
                node.signals().widget_added.emit(id);
            }
        }
        if !realized.is_empty() {
            tracing::trace!(target: "ufo::session", count = realized.len(), "realized widgets");
        }
        first_error.map_or(Ok(()), Err)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Input and mouse focus.
    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    /// The widget receiving key events.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focus.input_focus
    }

    /// The widget the mouse pointer is over.
    pub fn mouse_focus(&self) -> Option<WidgetId> {
        self.focus.mouse_focus
    }

    /// Move input focus to `id`, see [`EventDispatcher::request_focus`].
    pub fn request_focus(&mut self, id: WidgetId) -> bool {
        EventDispatcher::request_focus(&mut self.tree, &mut self.focus, id)
    }

    /// Clear input focus. Returns the widget that lost it.
    pub fn release_focus(&mut self) -> Option<WidgetId> {
        EventDispatcher::release_focus(&mut self.tree, &mut self.focus)
    }

    /// Whether `id` or one of its descendants has input focus.
    pub fn is_child_focused(&self, id: WidgetId) -> bool {
        self.focus
            .input_focus
            .is_some_and(|focused| self.tree.is_ancestor_or_self(id, focused))
    }

    // =========================================================================
    // Popups
    // =========================================================================

    /// The open popup.
    pub fn popup(&self) -> Option<WidgetId> {
        self.popup
    }

    /// Show `popup` at `location` (root pane coordinates) on the popup
    /// layer, closing any popup already open.
    pub fn open_popup(&mut self, popup: WidgetId, location: Point) -> Result<()> {
        let root = self.root.ok_or(Error::NoRootPane)?;
        self.close_popup();
        let installed = self.add(root, popup, Some(Constraint::Layer(POPUP_LAYER)), Some(0));
        let size = self.tree.preferred_size(popup);
        self.tree
            .set_bounds(popup, Rect::from_parts(location, size))?;
        self.tree.validate(popup);
        self.popup = Some(popup);
        tracing::debug!(target: "ufo::session", ?popup, ?location, "popup opened");
        installed
    }

    /// Close the open popup. Returns it.
    pub fn close_popup(&mut self) -> Option<WidgetId> {
        let popup = self.popup.take()?;
        if let Some(parent) = self.tree.parent(popup) {
            self.remove(parent, popup);
        }
        Some(popup)
    }

    // =========================================================================
    // Event Routing
    // =========================================================================

    /// The widget capturing mouse events between press and release.
    pub fn drag_widget(&self) -> Option<WidgetId> {
        self.drag_widget
    }

    /// Last pointer position in root pane coordinates.
    pub fn mouse_position(&self) -> Point {
        self.mouse_position
    }

    /// Session-wide key bindings, consulted before the focused widget.
    pub fn input_map(&self) -> &InputMap {
        &self.input_map
    }

    /// Mutable session-wide key bindings.
    pub fn input_map_mut(&mut self) -> &mut InputMap {
        &mut self.input_map
    }

    /// Observe every event the session sends. Listeners run before the
    /// receiver.
    pub fn connect_listener<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.listeners.connect(listener)
    }

    /// Remove a listener. Returns whether it was connected.
    pub fn disconnect_listener(&self, connection: ConnectionId) -> bool {
        self.listeners.disconnect(connection)
    }

    /// Route every event to `grabber` instead of the widgets.
    pub fn set_event_grabber<F>(&mut self, grabber: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.grabber = Some(Arc::new(grabber));
    }

    /// Remove the event grabber. A motion event at the current pointer
    /// position lets widgets catch up with the pointer.
    pub fn release_event_grabber(&mut self) -> Option<EventGrabber> {
        let grabber = self.grabber.take()?;
        let position = self.mouse_position + self.bounds.location();
        if !self.dispatch_motion(position, KeyboardModifiers::NONE) {
            tracing::trace!(target: "ufo::session", ?position, "no widget under pointer after grab");
        }
        Some(grabber)
    }

    /// Whether an event grabber is installed.
    pub fn has_event_grabber(&self) -> bool {
        self.grabber.is_some()
    }

    /// Dispatch an event straight to a widget, see
    /// [`EventDispatcher::send_event`].
    pub fn dispatch_event(&mut self, id: WidgetId, event: &Event) -> DispatchResult {
        EventDispatcher::send_event(&mut self.tree, &mut self.focus, id, event)
    }

    /// Send an event to `receiver`.
    ///
    /// An installed grabber receives the event exclusively. Otherwise the
    /// listeners see it, then the receiver dispatches it. Returns whether
    /// the event was consumed.
    pub fn send(&mut self, receiver: Option<WidgetId>, event: Event) -> bool {
        let event = match receiver {
            Some(id) => event.with_source(id),
            None => event,
        };
        if let Some(grabber) = &self.grabber {
            grabber(&event);
            return event.is_consumed();
        }
        self.listeners.emit_ref(&event);
        if let Some(id) = receiver {
            EventDispatcher::send_event(&mut self.tree, &mut self.focus, id, &event);
        }
        event.is_consumed()
    }

    fn root_or_err(&self) -> Result<WidgetId> {
        self.root.ok_or_else(|| {
            tracing::error!(target: "ufo::session", "cannot process input without a root pane");
            Error::NoRootPane
        })
    }

    fn to_root(&self, position: Point) -> Point {
        position - self.bounds.location()
    }

    /// A mouse event addressed to `id`, with `location` relative to it.
    fn mouse_event(
        &self,
        id: Option<WidgetId>,
        event_type: EventType,
        position: Point,
        button: Option<MouseButton>,
        modifiers: KeyboardModifiers,
    ) -> Event {
        let event = Event::mouse(event_type, position, button).with_modifiers(modifiers);
        match id {
            Some(id) => event.translated(self.tree.root_location(id)),
            None => event,
        }
    }

    // =========================================================================
    // Mouse Input
    // =========================================================================

    /// A mouse button went down at `position` (session coordinates).
    ///
    /// The widget under the pointer becomes the drag widget and receives
    /// all mouse events until every button is released. Returns whether
    /// the event was consumed.
    pub fn mouse_pressed(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
    ) -> Result<bool> {
        let root = self.root_or_err()?;
        let position = self.to_root(position);
        self.mouse_position = position;
        let target = self
            .drag_widget
            .or_else(|| self.tree.visible_widget_at(root, position));
        self.drag_widget = target;

        let event = self.mouse_event(
            target,
            EventType::MousePressed,
            position,
            Some(button),
            modifiers,
        );
        Ok(self.send(target, event))
    }

    /// A mouse button went up at `position` (session coordinates).
    ///
    /// The release goes to the drag widget. If the pointer is still over
    /// it, a `MouseClicked` event follows.
    pub fn mouse_released(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
    ) -> Result<bool> {
        let root = self.root_or_err()?;
        let position = self.to_root(position);
        self.mouse_position = position;
        let hit = self.tree.visible_widget_at(root, position);
        let target = self.drag_widget.take().or(hit);

        let event = self.mouse_event(
            target,
            EventType::MouseReleased,
            position,
            Some(button),
            modifiers,
        );
        let mut consumed = self.send(target, event);

        let clicked = match (target, hit) {
            (Some(target), Some(hit)) => self.tree.is_ancestor_or_self(target, hit),
            _ => false,
        };
        if clicked {
            let event = self.mouse_event(
                target,
                EventType::MouseClicked,
                position,
                Some(button),
                modifiers,
            );
            consumed |= self.send(target, event);
        }
        Ok(consumed)
    }

    /// The pointer moved to `position` (session coordinates).
    ///
    /// While a button is held the drag widget receives `MouseDragged`.
    /// Otherwise the widget under the pointer receives `MouseMoved`. When
    /// the pointer crosses into another widget, the old one receives
    /// `MouseExited` and the new one `MouseEntered`.
    pub fn mouse_moved(&mut self, position: Point, modifiers: KeyboardModifiers) -> Result<bool> {
        self.root_or_err()?;
        Ok(self.dispatch_motion(position, modifiers))
    }

    fn dispatch_motion(&mut self, position: Point, modifiers: KeyboardModifiers) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let position = self.to_root(position);
        self.mouse_position = position;
        let mut consumed = false;

        if let Some(drag) = self.drag_widget {
            let event = self.mouse_event(
                Some(drag),
                EventType::MouseDragged,
                position,
                None,
                modifiers,
            );
            consumed |= self.send(Some(drag), event);
        }

        let hit = self.tree.visible_widget_at(root, position);
        let before = self.hover.filter(|&id| self.tree.contains(id));

        if self.drag_widget.is_none() && hit == before {
            let event = self.mouse_event(hit, EventType::MouseMoved, position, None, modifiers);
            consumed |= self.send(hit, event);
        }
        if hit != before {
            if before.is_some() {
                let event =
                    self.mouse_event(before, EventType::MouseExited, position, None, modifiers);
                consumed |= self.send(before, event);
            }
            if hit.is_some() {
                let event =
                    self.mouse_event(hit, EventType::MouseEntered, position, None, modifiers);
                consumed |= self.send(hit, event);
            }
            self.hover = hit;
        }
        consumed
    }

    /// The mouse wheel turned with the pointer at `position` (session
    /// coordinates).
    pub fn mouse_wheel(
        &mut self,
        position: Point,
        delta: i32,
        modifiers: KeyboardModifiers,
    ) -> Result<bool> {
        let root = self.root_or_err()?;
        let position = self.to_root(position);
        let target = self.tree.visible_widget_at(root, position);
        let mut event = Event::wheel(position, delta).with_modifiers(modifiers);
        if let Some(id) = target {
            event = event.translated(self.tree.root_location(id));
        }
        Ok(self.send(target, event))
    }

    // =========================================================================
    // Key Input
    // =========================================================================

    /// A key went down.
    pub fn key_pressed(&mut self, key: Key, modifiers: KeyboardModifiers) -> Result<bool> {
        let event = Event::key(EventType::KeyPressed, key, None).with_modifiers(modifiers);
        self.dispatch_key(event)
    }

    /// A key went up.
    pub fn key_released(&mut self, key: Key, modifiers: KeyboardModifiers) -> Result<bool> {
        let event = Event::key(EventType::KeyReleased, key, None).with_modifiers(modifiers);
        self.dispatch_key(event)
    }

    /// A character was typed.
    pub fn key_typed(&mut self, ch: char, modifiers: KeyboardModifiers) -> Result<bool> {
        let event =
            Event::key(EventType::KeyTyped, Key::Char(ch), Some(ch)).with_modifiers(modifiers);
        self.dispatch_key(event)
    }

    /// Run a session-wide binding, then send the event to the focused
    /// widget. Session bindings do not consume the event.
    fn dispatch_key(&mut self, event: Event) -> Result<bool> {
        let root = self.root_or_err()?;
        if let Some(stroke) = event.as_key().and_then(KeyStroke::from_event)
            && let Some(action) = self.input_map.get(&stroke)
        {
            tracing::debug!(target: "ufo::session", %stroke, "session key binding");
            action(&ActionEvent {
                source: root,
                command: stroke.to_string(),
                modifiers: stroke.modifiers,
            });
        }
        let target = self.focus.input_focus;
        Ok(self.send(target, event))
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use ufo_core::Dimension;

    use super::*;
    use crate::widget::{InputCondition, MouseEvent};

    fn session() -> (UiSession, RootPaneParts) {
        let mut session = UiSession::new();
        let parts = session
            .create_root_pane(false, Rect::new(0, 0, 200, 100))
            .unwrap();
        (session, parts)
    }

    fn log_events(
        session: &mut UiSession,
        id: WidgetId,
        types: &[EventType],
    ) -> Arc<Mutex<Vec<EventType>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for &event_type in types {
            let sink = log.clone();
            session
                .tree_mut()
                .connect_event(id, event_type, move |e| sink.lock().push(e.event_type()))
                .unwrap();
        }
        log
    }

    #[test]
    fn test_root_pane_is_realized_and_focused() {
        let (session, parts) = session();
        assert_eq!(session.root_pane(), Some(parts.root));
        assert!(session.tree().is_realized(parts.content_pane));
        assert!(session.tree().ui(parts.content_pane).is_some());
        assert_eq!(session.focused_widget(), Some(parts.root));
        assert_eq!(
            session.tree().bounds(parts.content_pane),
            Rect::new(0, 0, 200, 100)
        );
    }

    #[test]
    fn test_widget_added_fires_once_realized() {
        let (mut session, parts) = session();
        let panel = session.create(WidgetKind::Widget);
        let label = session.create(WidgetKind::Label);
        let added = Arc::new(Mutex::new(Vec::new()));
        for id in [panel, label] {
            let sink = added.clone();
            session
                .tree()
                .get(id)
                .unwrap()
                .signals()
                .widget_added
                .connect(move |id| sink.lock().push(*id));
        }

        session.add(panel, label, None, None).unwrap();
        assert!(added.lock().is_empty());
        assert!(session.tree().ui(label).is_none());

        session.add(parts.content_pane, panel, None, None).unwrap();
        assert_eq!(*added.lock(), vec![panel, label]);
        assert!(session.tree().ui(label).is_some());
    }

    #[test]
    fn test_missing_delegate_keeps_child_attached() {
        let mut laf = LookAndFeel::basic();
        laf.unregister(WidgetKind::Slider);
        let mut session = UiSession::with_look_and_feel(laf);
        let parts = session
            .create_root_pane(false, Rect::new(0, 0, 100, 100))
            .unwrap();
        let slider = session.create(WidgetKind::Slider);

        let err = session
            .add(parts.content_pane, slider, None, None)
            .unwrap_err();
        assert!(matches!(err, Error::NoUiDelegate { kind: WidgetKind::Slider, .. }));
        assert_eq!(session.tree().parent(slider), Some(parts.content_pane));
    }

    #[test]
    fn test_removing_focused_subtree_moves_focus_to_root() {
        let (mut session, parts) = session();
        let panel = session.create(WidgetKind::Widget);
        let edit = session.create(WidgetKind::TextEdit);
        session.add(parts.content_pane, panel, None, None).unwrap();
        session.add(panel, edit, None, None).unwrap();
        let log = log_events(&mut session, edit, &[EventType::FocusLost]);

        assert!(session.request_focus(edit));
        assert!(session.is_child_focused(panel));
        assert!(session.remove(parts.content_pane, panel));

        assert_eq!(*log.lock(), vec![EventType::FocusLost]);
        assert_eq!(session.focused_widget(), Some(parts.root));
        assert!(!session.remove(parts.content_pane, panel));
    }

    #[test]
    fn test_press_release_synthesizes_click() {
        let (mut session, parts) = session();
        let button = session.create(WidgetKind::Button);
        session.add(parts.content_pane, button, None, None).unwrap();
        let actions = Arc::new(Mutex::new(0));
        let sink = actions.clone();
        session
            .tree_mut()
            .connect_action(button, move |_| *sink.lock() += 1)
            .unwrap();

        let none = KeyboardModifiers::NONE;
        session
            .mouse_pressed(Point::new(50, 50), MouseButton::Left, none)
            .unwrap();
        assert_eq!(session.drag_widget(), Some(button));
        assert_eq!(session.focused_widget(), Some(button));
        session
            .mouse_released(Point::new(60, 40), MouseButton::Left, none)
            .unwrap();

        assert_eq!(*actions.lock(), 1);
        assert_eq!(session.drag_widget(), None);
    }

    #[test]
    fn test_release_outside_press_target_does_not_click() {
        let (mut session, parts) = session();
        let left = session.create(WidgetKind::Button);
        let right = session.create(WidgetKind::Button);
        session.tree_mut().set_layout(
            parts.content_pane,
            Some(Box::new(crate::widget::layout::BoxLayout::horizontal())),
        )
        .unwrap();
        session.add(parts.content_pane, left, None, None).unwrap();
        session.add(parts.content_pane, right, None, None).unwrap();
        let log = log_events(
            &mut session,
            left,
            &[EventType::MouseReleased, EventType::MouseClicked],
        );

        let left_center = session.tree().bounds(left).location().offset(2, 2);
        let right_center = session.tree().bounds(right).location().offset(2, 2);
        let none = KeyboardModifiers::NONE;
        session
            .mouse_pressed(left_center, MouseButton::Left, none)
            .unwrap();
        session
            .mouse_released(right_center, MouseButton::Left, none)
            .unwrap();

        assert_eq!(*log.lock(), vec![EventType::MouseReleased]);
    }

    #[test]
    fn test_motion_synthesizes_enter_and_exit() {
        let (mut session, parts) = session();
        let child = session.create(WidgetKind::Widget);
        session.add(parts.content_pane, child, None, None).unwrap();
        session.tree_mut().set_layout(parts.content_pane, None).unwrap();
        session
            .tree_mut()
            .set_bounds(child, Rect::new(10, 10, 20, 20))
            .unwrap();
        let log = log_events(
            &mut session,
            child,
            &[
                EventType::MouseEntered,
                EventType::MouseMoved,
                EventType::MouseExited,
            ],
        );

        let none = KeyboardModifiers::NONE;
        session.mouse_moved(Point::new(15, 15), none).unwrap();
        assert_eq!(session.mouse_focus(), Some(child));
        session.mouse_moved(Point::new(16, 15), none).unwrap();
        session.mouse_moved(Point::new(90, 90), none).unwrap();

        assert_eq!(
            *log.lock(),
            vec![
                EventType::MouseEntered,
                EventType::MouseMoved,
                EventType::MouseExited,
            ]
        );
        assert_eq!(session.mouse_focus(), None);
    }

    #[test]
    fn test_mouse_location_is_widget_relative() {
        let mut session = UiSession::new();
        let parts = session
            .create_root_pane(false, Rect::new(100, 100, 200, 100))
            .unwrap();
        let child = session.create(WidgetKind::Widget);
        session.add(parts.content_pane, child, None, None).unwrap();
        session.tree_mut().set_layout(parts.content_pane, None).unwrap();
        session
            .tree_mut()
            .set_bounds(child, Rect::new(10, 20, 50, 50))
            .unwrap();
        let seen: Arc<Mutex<Vec<(Point, Point)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session
            .tree_mut()
            .connect_event(child, EventType::MousePressed, move |e| {
                let MouseEvent {
                    location,
                    root_location,
                    ..
                } = e.as_mouse().unwrap();
                sink.lock().push((*location, *root_location));
            })
            .unwrap();

        session
            .mouse_pressed(Point::new(115, 125), MouseButton::Left, KeyboardModifiers::NONE)
            .unwrap();
        assert_eq!(*seen.lock(), vec![(Point::new(5, 5), Point::new(15, 25))]);
    }

    #[test]
    fn test_drag_goes_to_press_target() {
        let (mut session, parts) = session();
        let child = session.create(WidgetKind::Widget);
        session.add(parts.content_pane, child, None, None).unwrap();
        session.tree_mut().set_layout(parts.content_pane, None).unwrap();
        session
            .tree_mut()
            .set_bounds(child, Rect::new(0, 0, 10, 10))
            .unwrap();
        let log = log_events(
            &mut session,
            child,
            &[EventType::MousePressed, EventType::MouseDragged],
        );

        let none = KeyboardModifiers::NONE;
        session
            .mouse_pressed(Point::new(5, 5), MouseButton::Left, none)
            .unwrap();
        session.mouse_moved(Point::new(80, 80), none).unwrap();

        assert_eq!(
            *log.lock(),
            vec![EventType::MousePressed, EventType::MouseDragged]
        );
    }

    #[test]
    fn test_grabber_receives_events_exclusively() {
        let (mut session, parts) = session();
        let log = log_events(&mut session, parts.content_pane, &[EventType::MouseMoved]);
        let grabbed = Arc::new(Mutex::new(Vec::new()));
        let sink = grabbed.clone();
        session.set_event_grabber(move |e| sink.lock().push(e.event_type()));

        session
            .mouse_moved(Point::new(5, 5), KeyboardModifiers::NONE)
            .unwrap();
        assert!(log.lock().is_empty());
        assert!(!grabbed.lock().is_empty());

        assert!(session.release_event_grabber().is_some());
        assert!(!session.has_event_grabber());
        assert_eq!(*log.lock(), vec![EventType::MouseMoved]);
    }

    #[test]
    fn test_listeners_see_events_before_receiver() {
        let (mut session, parts) = session();
        let order = Arc::new(Mutex::new(Vec::new()));
        let sink = order.clone();
        session.connect_listener(move |_| sink.lock().push("listener"));
        let sink = order.clone();
        session
            .tree_mut()
            .connect_event(parts.content_pane, EventType::MouseWheel, move |_| {
                sink.lock().push("widget")
            })
            .unwrap();

        session
            .mouse_wheel(Point::new(5, 5), 1, KeyboardModifiers::NONE)
            .unwrap();
        assert_eq!(*order.lock(), vec!["listener", "widget"]);
    }

    #[test]
    fn test_session_binding_runs_before_focused_widget() {
        let (mut session, parts) = session();
        let edit = session.create(WidgetKind::TextEdit);
        session.add(parts.content_pane, edit, None, None).unwrap();
        session.request_focus(edit);

        let order = Arc::new(Mutex::new(Vec::new()));
        let sink = order.clone();
        session
            .input_map_mut()
            .put("Ctrl+S".parse().unwrap(), move |a| sink.lock().push(a.command.clone()));
        let sink = order.clone();
        session
            .tree_mut()
            .put_key_binding(
                edit,
                InputCondition::WhenFocused,
                "Ctrl+S".parse().unwrap(),
                move |_| sink.lock().push("edit".to_string()),
            )
            .unwrap();

        session
            .key_pressed(Key::Char('s'), KeyboardModifiers::CTRL)
            .unwrap();
        assert_eq!(*order.lock(), vec!["Ctrl+S".to_string(), "edit".to_string()]);
    }

    #[test]
    fn test_popup_lives_on_popup_layer() {
        let (mut session, parts) = session();
        let popup = session.create(WidgetKind::PopupMenu);
        session
            .tree_mut()
            .set_preferred_size(popup, Some(Dimension::new(40, 60)))
            .unwrap();

        session.open_popup(popup, Point::new(30, 10)).unwrap();
        assert_eq!(session.popup(), Some(popup));
        assert_eq!(session.tree().parent(popup), Some(parts.root));
        assert_eq!(session.tree().layer(popup), POPUP_LAYER);
        assert_eq!(session.tree().child_at(parts.root, 0), Some(popup));
        assert_eq!(session.tree().bounds(popup), Rect::new(30, 10, 40, 60));

        assert_eq!(session.close_popup(), Some(popup));
        assert_eq!(session.tree().parent(popup), None);
        assert_eq!(session.popup(), None);
    }

    #[test]
    fn test_input_without_root_pane_is_an_error() {
        let mut session = UiSession::new();
        let result = session.key_typed('a', KeyboardModifiers::NONE);
        assert!(matches!(result, Err(Error::NoRootPane)));
    }
}
