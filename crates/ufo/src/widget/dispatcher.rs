//! Event dispatching and propagation for widgets.
//!
//! # Event Flow
//!
//! When an event is sent to a widget, exactly one of three things happens:
//!
//! 1. **Handled**: the widget's interest mask contains the event type. The
//!    widget's signal for that type fires, then the kind-specific handling
//!    runs (focus on press, activation on click, key bindings).
//!
//! 2. **Forwarded**: the widget is not interested and the event is an input
//!    event (mouse, wheel, key). The same event goes to the parent. Mouse
//!    coordinates are not translated; callers that hit-test translate before
//!    dispatching.
//!
//! 3. **Dropped**: the widget is not interested and either the event is not
//!    an input event or the widget has no parent.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use ufo::widget::{DispatchResult, Event, EventDispatcher, EventType, FocusState};
//! use ufo::widget::{WidgetKind, WidgetTree};
//! use ufo_core::Point;
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.create(WidgetKind::Widget);
//! let leaf = tree.create(WidgetKind::Widget);
//! tree.add(root, leaf, None, None).unwrap();
//!
//! let presses = Arc::new(AtomicUsize::new(0));
//! let counter = presses.clone();
//! tree.connect_event(root, EventType::MousePressed, move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! })
//! .unwrap();
//!
//! let mut focus = FocusState::default();
//! let event = Event::mouse(EventType::MousePressed, Point::new(1, 1), None);
//! let result = EventDispatcher::send_event(&mut tree, &mut focus, leaf, &event);
//! assert_eq!(result, DispatchResult::Handled(root));
//! assert_eq!(presses.load(Ordering::SeqCst), 1);
//! ```

use super::WidgetId;
use super::events::{ActionEvent, Event, EventType, KeyEvent, MouseButton, MouseEvent};
use super::keyboard::KeyStroke;
use super::kind::{Capabilities, WidgetKind};
use super::tree::WidgetTree;

/// Input focus and mouse focus of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    /// The widget receiving key events.
    pub input_focus: Option<WidgetId>,
    /// The widget the mouse pointer is over.
    pub mouse_focus: Option<WidgetId>,
}

/// Result of dispatching an event to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The event was processed by this widget.
    Handled(WidgetId),
    /// No widget on the way to the root processed the event.
    Dropped,
    /// The target widget was not found.
    WidgetNotFound,
}

impl DispatchResult {
    /// Check if some widget processed the event.
    pub fn was_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    /// The widget that processed the event.
    pub fn handler(&self) -> Option<WidgetId> {
        match self {
            Self::Handled(id) => Some(*id),
            _ => None,
        }
    }
}

/// Event dispatcher for the widget tree.
pub struct EventDispatcher;

impl EventDispatcher {
    /// Send an event to a widget, forwarding unprocessed input events to the
    /// parent chain.
    #[tracing::instrument(skip_all, target = "ufo::event", level = "trace")]
    pub fn send_event(
        tree: &mut WidgetTree,
        focus: &mut FocusState,
        target: WidgetId,
        event: &Event,
    ) -> DispatchResult {
        let event_type = event.event_type();
        let mut current = target;
        loop {
            let Some(node) = tree.get(current) else {
                return DispatchResult::WidgetNotFound;
            };
            if node.event_mask().contains(event_type.mask()) {
                Self::process_event(tree, focus, current, event);
                return DispatchResult::Handled(current);
            }
            match node.parent() {
                Some(parent) if event_type.is_input() => {
                    tracing::trace!(target: "ufo::event", ?event_type, from = ?current, to = ?parent, "forwarded");
                    current = parent;
                }
                _ => {
                    tracing::trace!(target: "ufo::event", ?event_type, at = ?current, "dropped");
                    return DispatchResult::Dropped;
                }
            }
        }
    }

    /// Walk up the widget tree from a starting widget, collecting ancestor
    /// ids from the immediate parent to the root.
    pub fn ancestor_chain(tree: &WidgetTree, start: WidgetId) -> Vec<WidgetId> {
        tree.ancestors(start)
    }

    /// Move input focus to `id`.
    ///
    /// Only enabled, focusable widgets accept focus. The previous owner
    /// receives `FocusLost` before the new owner receives `FocusGained`.
    /// Returns whether `id` holds the focus afterwards.
    pub fn request_focus(tree: &mut WidgetTree, focus: &mut FocusState, id: WidgetId) -> bool {
        let Some(node) = tree.get(id) else {
            return false;
        };
        if !node.is_focusable() || !node.is_enabled() {
            return false;
        }
        if focus.input_focus == Some(id) {
            return true;
        }

        let old = focus.input_focus.replace(id);
        if let Some(old) = old.filter(|&old| tree.contains(old)) {
            tree.notify(
                old,
                &Event::focus(EventType::FocusLost, Some(id)).with_source(old),
            );
        }
        tree.notify(
            id,
            &Event::focus(EventType::FocusGained, old).with_source(id),
        );
        tracing::debug!(target: "ufo::event", from = ?old, to = ?id, "focus changed");
        true
    }

    /// Clear input focus, sending `FocusLost` to the owner.
    ///
    /// Returns the widget that lost focus.
    pub fn release_focus(tree: &mut WidgetTree, focus: &mut FocusState) -> Option<WidgetId> {
        let old = focus.input_focus.take()?;
        tree.notify(
            old,
            &Event::focus(EventType::FocusLost, None).with_source(old),
        );
        Some(old)
    }

    // =========================================================================
    // Processing
    // =========================================================================

    fn process_event(tree: &mut WidgetTree, focus: &mut FocusState, id: WidgetId, event: &Event) {
        if let Some(node) = tree.get(id) {
            node.signals().emit_event(event);
        }
        match event {
            Event::Mouse(mouse) => Self::process_mouse_event(tree, focus, id, event, mouse),
            Event::Key(key) => Self::process_key_event(tree, id, event, key),
            _ => {}
        }
    }

    fn process_mouse_event(
        tree: &mut WidgetTree,
        focus: &mut FocusState,
        id: WidgetId,
        event: &Event,
        mouse: &MouseEvent,
    ) {
        let Some(kind) = tree.kind(id) else {
            return;
        };
        match event.event_type() {
            EventType::MouseEntered => focus.mouse_focus = Some(id),
            EventType::MouseExited => {
                if focus.mouse_focus == Some(id) {
                    focus.mouse_focus = None;
                }
            }
            EventType::MousePressed if kind.has(Capabilities::FOCUS_ON_PRESS) => {
                Self::request_focus(tree, focus, id);
            }
            EventType::MouseClicked
                if kind.has(Capabilities::ACTIVATABLE)
                    && !event.is_consumed()
                    && matches!(mouse.button, None | Some(MouseButton::Left)) =>
            {
                Self::activate(tree, id, kind, event);
            }
            _ => {}
        }
    }

    /// Toggle (if toggleable) and fire `action_performed`.
    fn activate(tree: &mut WidgetTree, id: WidgetId, kind: WidgetKind, event: &Event) {
        if !tree.get(id).is_some_and(|n| n.is_enabled()) {
            return;
        }
        if kind.has(Capabilities::TOGGLEABLE) {
            if kind == WidgetKind::RadioButton {
                Self::select_radio(tree, id);
            } else {
                let selected = tree.is_selected(id);
                Self::select(tree, id, !selected);
            }
        }
        if let Some(node) = tree.get(id) {
            node.signals().action_performed.emit(ActionEvent {
                source: id,
                command: node.action_command().to_string(),
                modifiers: event.base().modifiers(),
            });
        }
    }

    /// Select a radio button and deselect its sibling radio buttons.
    fn select_radio(tree: &mut WidgetTree, id: WidgetId) {
        let siblings: Vec<WidgetId> = match tree.parent(id) {
            Some(parent) => tree
                .children(parent)
                .iter()
                .copied()
                .filter(|&c| c != id && tree.kind(c) == Some(WidgetKind::RadioButton))
                .collect(),
            None => Vec::new(),
        };
        for sibling in siblings {
            Self::select(tree, sibling, false);
        }
        Self::select(tree, id, true);
    }

    fn select(tree: &mut WidgetTree, id: WidgetId, selected: bool) {
        if let Err(error) = tree.set_selected(id, selected) {
            tracing::warn!(target: "ufo::event", ?id, %error, "cannot change selection");
        }
    }

    /// Run the key binding for a key event, if any.
    ///
    /// The widget's own map is consulted first, then the ancestor maps of
    /// the widget and each ancestor from the parent up. A consumed event
    /// runs no binding.
    fn process_key_event(tree: &WidgetTree, id: WidgetId, event: &Event, key: &KeyEvent) {
        if event.is_consumed() {
            return;
        }
        let Some(stroke) = KeyStroke::from_event(key) else {
            return;
        };

        let action = tree
            .get(id)
            .and_then(|node| node.input_map().get(&stroke))
            .or_else(|| {
                std::iter::once(id)
                    .chain(tree.ancestors(id))
                    .find_map(|a| tree.get(a).and_then(|n| n.ancestor_input_map().get(&stroke)))
            });
        if let Some(action) = action {
            tracing::debug!(target: "ufo::event", %stroke, widget = ?id, "key binding");
            event.consume();
            action(&ActionEvent {
                source: id,
                command: stroke.to_string(),
                modifiers: stroke.modifiers,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use ufo_core::Point;

    use super::*;
    use crate::widget::{EventMask, InputCondition, Key, KeyboardModifiers};

    fn chain() -> (WidgetTree, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetKind::Widget);
        let container = tree.create(WidgetKind::Widget);
        let leaf = tree.create(WidgetKind::Widget);
        tree.add(root, container, None, None).unwrap();
        tree.add(container, leaf, None, None).unwrap();
        (tree, root, container, leaf)
    }

    fn record(tree: &mut WidgetTree, id: WidgetId, event_type: EventType) -> Arc<Mutex<Vec<EventType>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        tree.connect_event(id, event_type, move |e| sink.lock().push(e.event_type()))
            .unwrap();
        log
    }

    fn press(event_type: EventType) -> Event {
        Event::mouse(event_type, Point::new(2, 2), Some(MouseButton::Left))
    }

    #[test]
    fn test_input_event_bubbles_to_interested_root() {
        let (mut tree, root, _container, leaf) = chain();
        let log = record(&mut tree, root, EventType::MouseMoved);
        let event = press(EventType::MouseMoved);
        assert!(!event.is_consumed());

        let result = EventDispatcher::send_event(&mut tree, &mut FocusState::default(), leaf, &event);

        assert_eq!(result, DispatchResult::Handled(root));
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_non_input_event_is_not_forwarded() {
        let (mut tree, root, _container, leaf) = chain();
        let log = record(&mut tree, root, EventType::FocusGained);
        let event = Event::focus(EventType::FocusGained, None);

        let result = EventDispatcher::send_event(&mut tree, &mut FocusState::default(), leaf, &event);

        assert_eq!(result, DispatchResult::Dropped);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_uninterested_chain_drops_at_root() {
        let (mut tree, _root, _container, leaf) = chain();
        let result = EventDispatcher::send_event(
            &mut tree,
            &mut FocusState::default(),
            leaf,
            &press(EventType::MousePressed),
        );
        assert_eq!(result, DispatchResult::Dropped);
        assert!(!result.was_handled());
    }

    #[test]
    fn test_missing_widget() {
        let mut tree = WidgetTree::new();
        let gone = tree.create(WidgetKind::Widget);
        tree.destroy(gone);
        let result = EventDispatcher::send_event(
            &mut tree,
            &mut FocusState::default(),
            gone,
            &press(EventType::MousePressed),
        );
        assert_eq!(result, DispatchResult::WidgetNotFound);
    }

    #[test]
    fn test_disabled_interest_forwards() {
        let (mut tree, _root, container, leaf) = chain();
        let leaf_log = record(&mut tree, leaf, EventType::MouseWheel);
        let container_log = record(&mut tree, container, EventType::MouseWheel);
        tree.set_event_enabled(leaf, EventType::MouseWheel, false)
            .unwrap();

        let result = EventDispatcher::send_event(
            &mut tree,
            &mut FocusState::default(),
            leaf,
            &Event::wheel(Point::ZERO, 1),
        );

        assert_eq!(result, DispatchResult::Handled(container));
        assert!(leaf_log.lock().is_empty());
        assert_eq!(container_log.lock().len(), 1);
    }

    #[test]
    fn test_click_toggles_check_box_and_fires_action() {
        let mut tree = WidgetTree::new();
        let check = tree.create(WidgetKind::CheckBox);
        tree.set_text(check, "Wrap").unwrap();
        let actions = Arc::new(Mutex::new(Vec::new()));
        let sink = actions.clone();
        tree.connect_action(check, move |a| sink.lock().push(a.command.clone()))
            .unwrap();

        let mut focus = FocusState::default();
        EventDispatcher::send_event(&mut tree, &mut focus, check, &press(EventType::MouseClicked));
        assert!(tree.is_selected(check));
        EventDispatcher::send_event(&mut tree, &mut focus, check, &press(EventType::MouseClicked));
        assert!(!tree.is_selected(check));
        assert_eq!(*actions.lock(), vec!["Wrap".to_string(), "Wrap".to_string()]);
    }

    #[test]
    fn test_consumed_click_does_not_activate() {
        let mut tree = WidgetTree::new();
        let button = tree.create(WidgetKind::Button);
        tree.connect_event(button, EventType::MouseClicked, |e| e.consume())
            .unwrap();
        let fired = Arc::new(Mutex::new(0));
        let sink = fired.clone();
        tree.connect_action(button, move |_| *sink.lock() += 1)
            .unwrap();

        EventDispatcher::send_event(
            &mut tree,
            &mut FocusState::default(),
            button,
            &press(EventType::MouseClicked),
        );
        assert_eq!(*fired.lock(), 0);
    }

    #[test]
    fn test_radio_buttons_are_exclusive() {
        let mut tree = WidgetTree::new();
        let group = tree.create(WidgetKind::Widget);
        let a = tree.create(WidgetKind::RadioButton);
        let b = tree.create(WidgetKind::RadioButton);
        tree.add(group, a, None, None).unwrap();
        tree.add(group, b, None, None).unwrap();

        let mut focus = FocusState::default();
        EventDispatcher::send_event(&mut tree, &mut focus, a, &press(EventType::MouseClicked));
        EventDispatcher::send_event(&mut tree, &mut focus, b, &press(EventType::MouseClicked));
        EventDispatcher::send_event(&mut tree, &mut focus, b, &press(EventType::MouseClicked));

        assert!(!tree.is_selected(a));
        assert!(tree.is_selected(b));
    }

    #[test]
    fn test_press_moves_focus_in_order() {
        let mut tree = WidgetTree::new();
        let first = tree.create(WidgetKind::TextEdit);
        let second = tree.create(WidgetKind::Button);
        let log = Arc::new(Mutex::new(Vec::new()));
        for (id, name) in [(first, "first"), (second, "second")] {
            for event_type in [EventType::FocusGained, EventType::FocusLost] {
                let sink = log.clone();
                tree.connect_event(id, event_type, move |e| {
                    sink.lock().push((name, e.event_type()));
                })
                .unwrap();
            }
        }

        let mut focus = FocusState::default();
        EventDispatcher::send_event(&mut tree, &mut focus, first, &press(EventType::MousePressed));
        EventDispatcher::send_event(&mut tree, &mut focus, second, &press(EventType::MousePressed));

        assert_eq!(focus.input_focus, Some(second));
        assert_eq!(
            *log.lock(),
            vec![
                ("first", EventType::FocusGained),
                ("first", EventType::FocusLost),
                ("second", EventType::FocusGained),
            ]
        );
    }

    #[test]
    fn test_unfocusable_widget_rejects_focus() {
        let mut tree = WidgetTree::new();
        let label = tree.create(WidgetKind::Label);
        let button = tree.create(WidgetKind::Button);
        tree.set_enabled(button, false).unwrap();

        let mut focus = FocusState::default();
        assert!(!EventDispatcher::request_focus(&mut tree, &mut focus, label));
        assert!(!EventDispatcher::request_focus(&mut tree, &mut focus, button));
        assert_eq!(focus.input_focus, None);
    }

    #[test]
    fn test_enter_exit_track_mouse_focus() {
        let mut tree = WidgetTree::new();
        let widget = tree.create(WidgetKind::Widget);
        tree.set_event_mask(widget, EventMask::MOUSE_MOTION).unwrap();

        let mut focus = FocusState::default();
        EventDispatcher::send_event(&mut tree, &mut focus, widget, &press(EventType::MouseEntered));
        assert_eq!(focus.mouse_focus, Some(widget));
        EventDispatcher::send_event(&mut tree, &mut focus, widget, &press(EventType::MouseExited));
        assert_eq!(focus.mouse_focus, None);
    }

    #[test]
    fn test_key_binding_lookup_order() {
        let mut tree = WidgetTree::new();
        let window = tree.create(WidgetKind::Widget);
        let edit = tree.create(WidgetKind::TextEdit);
        tree.add(window, edit, None, None).unwrap();

        let fired = Arc::new(Mutex::new(Vec::new()));
        let save: KeyStroke = "Ctrl+S".parse().unwrap();
        let quit: KeyStroke = "Ctrl+Q".parse().unwrap();
        for (id, condition, stroke, tag) in [
            (edit, InputCondition::WhenFocused, save, "edit-save"),
            (window, InputCondition::WhenAncestorFocused, save, "window-save"),
            (window, InputCondition::WhenAncestorFocused, quit, "window-quit"),
        ] {
            let sink = fired.clone();
            tree.put_key_binding(id, condition, stroke, move |a| {
                sink.lock().push((tag, a.command.clone()));
            })
            .unwrap();
        }

        let mut focus = FocusState::default();
        for key in ['s', 'q'] {
            let event = Event::key(EventType::KeyPressed, Key::Char(key), None)
                .with_modifiers(KeyboardModifiers::CTRL);
            EventDispatcher::send_event(&mut tree, &mut focus, edit, &event);
            assert!(event.is_consumed());
        }

        assert_eq!(
            *fired.lock(),
            vec![
                ("edit-save", "Ctrl+S".to_string()),
                ("window-quit", "Ctrl+Q".to_string()),
            ]
        );
    }

    #[test]
    fn test_focused_widget_ancestor_map_is_consulted() {
        let mut tree = WidgetTree::new();
        let edit = tree.create(WidgetKind::TextEdit);
        let fired = Arc::new(Mutex::new(0));
        let sink = fired.clone();
        tree.put_key_binding(
            edit,
            InputCondition::WhenAncestorFocused,
            "Ctrl+F".parse().unwrap(),
            move |_| *sink.lock() += 1,
        )
        .unwrap();

        let event = Event::key(EventType::KeyPressed, Key::Char('f'), None)
            .with_modifiers(KeyboardModifiers::CTRL);
        EventDispatcher::send_event(&mut tree, &mut FocusState::default(), edit, &event);

        assert!(event.is_consumed());
        assert_eq!(*fired.lock(), 1);
    }

    #[test]
    fn test_consumed_key_skips_bindings() {
        let mut tree = WidgetTree::new();
        let edit = tree.create(WidgetKind::TextEdit);
        tree.connect_event(edit, EventType::KeyPressed, |e| e.consume())
            .unwrap();
        let fired = Arc::new(Mutex::new(0));
        let sink = fired.clone();
        tree.put_key_binding(
            edit,
            InputCondition::WhenFocused,
            KeyStroke::new(Key::Enter, KeyboardModifiers::NONE),
            move |_| *sink.lock() += 1,
        )
        .unwrap();

        let event = Event::key(EventType::KeyPressed, Key::Enter, None);
        EventDispatcher::send_event(&mut tree, &mut FocusState::default(), edit, &event);
        assert_eq!(*fired.lock(), 0);
    }
}
