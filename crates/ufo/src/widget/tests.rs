//! Cross-module tests for the widget system.

use std::sync::Arc;

use parking_lot::Mutex;
use ufo_core::{Dimension, Point, Rect};
use ufo_style::{Color, FontSpec};

use super::layout::BoxLayout;
use super::{
    Constraint, DispatchResult, Event, EventType, Graphics, InputCondition, Key,
    KeyboardModifiers, MouseButton, WidgetId, WidgetKind, WidgetTree,
};
use crate::UiSession;

/// A [`Graphics`] that records what was drawn, in absolute coordinates.
#[derive(Debug)]
pub(crate) struct RecordingGraphics {
    origin: Point,
    /// Absolute clip rectangle.
    clip: Rect,
    pub(crate) color: Color,
    pub(crate) fills: Vec<Rect>,
    pub(crate) texts: Vec<(String, Point)>,
    pub(crate) lines: usize,
}

impl RecordingGraphics {
    pub(crate) fn new(w: i32, h: i32) -> Self {
        Self {
            origin: Point::ZERO,
            clip: Rect::new(0, 0, w, h),
            color: Color::default(),
            fills: Vec::new(),
            texts: Vec::new(),
            lines: 0,
        }
    }
}

impl Graphics for RecordingGraphics {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.fills.push(rect.offset(self.origin.x, self.origin.y));
    }

    fn draw_rect(&mut self, _rect: Rect) {
        self.lines += 4;
    }

    fn draw_line(&mut self, _from: Point, _to: Point) {
        self.lines += 1;
    }

    fn draw_text(&mut self, text: &str, location: Point, _font: &FontSpec) {
        self.texts.push((text.to_string(), location + self.origin));
    }

    fn clip_rect(&self) -> Rect {
        self.clip.offset(-self.origin.x, -self.origin.y)
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.clip = rect.offset(self.origin.x, self.origin.y);
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = self.origin.offset(dx, dy);
    }
}

fn chain(tree: &mut WidgetTree) -> (WidgetId, WidgetId, WidgetId) {
    let root = tree.create(WidgetKind::Widget);
    let container = tree.create(WidgetKind::Widget);
    let leaf = tree.create(WidgetKind::Widget);
    tree.add(root, container, None, None).unwrap();
    tree.add(container, leaf, None, None).unwrap();
    (root, container, leaf)
}

#[test]
fn test_three_level_propagation_reaches_root_once() {
    let mut tree = WidgetTree::new();
    let (root, container, leaf) = chain(&mut tree);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    tree.connect_event(root, EventType::MousePressed, move |e| {
        sink.lock().push(e.base().source())
    })
    .unwrap();

    let event = Event::mouse(EventType::MousePressed, Point::new(3, 3), Some(MouseButton::Left))
        .with_source(leaf);
    let result = tree.dispatch_event(leaf, &event);

    assert_eq!(result, DispatchResult::Handled(root));
    assert_eq!(*calls.lock(), vec![Some(leaf)]);
    assert!(!tree.is_event_enabled(container, EventType::MousePressed));
}

#[test]
fn test_validate_is_idempotent() {
    let mut tree = WidgetTree::new();
    let root = tree.create(WidgetKind::Widget);
    tree.set_layout(root, Some(Box::new(BoxLayout::horizontal().with_gap(10))))
        .unwrap();
    let a = tree.create(WidgetKind::Widget);
    let b = tree.create(WidgetKind::Widget);
    for (child, w) in [(a, 40), (b, 60)] {
        tree.set_preferred_size(child, Some(Dimension::new(w, 20)))
            .unwrap();
        tree.add(root, child, None, None).unwrap();
    }
    tree.set_bounds(root, Rect::new(0, 0, 110, 20)).unwrap();

    tree.validate(root);
    let first = [tree.bounds(a), tree.bounds(b)];
    assert!(!tree.needs_layout(root));
    tree.validate(root);

    assert_eq!([tree.bounds(a), tree.bounds(b)], first);
    assert_eq!(first, [Rect::new(0, 0, 40, 20), Rect::new(50, 0, 60, 20)]);
}

#[test]
fn test_hit_test_and_dispatch_through_session() {
    let mut session = UiSession::new();
    let parts = session
        .create_root_pane(true, Rect::new(0, 0, 300, 200))
        .unwrap();
    let check = session.create(WidgetKind::CheckBox);
    session.tree_mut().set_text(check, "Wrap").unwrap();
    session
        .add(parts.content_pane, check, Some(Constraint::Named("north".into())), None)
        .unwrap();

    let bounds = session.tree().bounds(check);
    let at = session.tree().root_location(check).offset(bounds.w / 2, bounds.h / 2);
    assert_eq!(
        session.tree().visible_widget_at(parts.root, at),
        Some(check)
    );

    let none = Default::default();
    session.mouse_pressed(at, MouseButton::Left, none).unwrap();
    session.mouse_released(at, MouseButton::Left, none).unwrap();
    assert!(session.tree().is_selected(check));
    assert_eq!(session.focused_widget(), Some(check));
}

#[test]
fn test_menu_bar_sits_above_content() {
    let mut session = UiSession::new();
    let parts = session
        .create_root_pane(true, Rect::new(0, 0, 300, 200))
        .unwrap();
    let menu_bar = parts.menu_bar.unwrap();
    let menu = session.create(WidgetKind::Menu);
    session.tree_mut().set_text(menu, "File").unwrap();
    session.add(menu_bar, menu, None, None).unwrap();

    let bar = session.tree().bounds(menu_bar);
    let content = session.tree().bounds(parts.content_pane);
    assert_eq!(bar.y, 0);
    assert!(bar.h > 0);
    assert_eq!(content.y, bar.bottom());
    assert_eq!(content.bottom(), 200);
}

#[test]
fn test_session_paints_front_child_last() {
    let mut session = UiSession::new();
    let parts = session
        .create_root_pane(false, Rect::new(0, 0, 100, 100))
        .unwrap();
    let popup = session.create(WidgetKind::PopupMenu);
    session
        .tree_mut()
        .set_preferred_size(popup, Some(Dimension::new(20, 20)))
        .unwrap();
    session.open_popup(popup, Point::new(10, 10)).unwrap();
    session.tree_mut().set_opaque(parts.content_pane, true).unwrap();
    session.tree_mut().set_opaque(popup, true).unwrap();

    let mut g = RecordingGraphics::new(100, 100);
    session.paint(&mut g);

    assert_eq!(g.fills.last(), Some(&Rect::new(10, 10, 20, 20)));
}

#[test]
fn test_desktop_frames_realized_through_session() {
    let mut session = UiSession::new();
    let parts = session
        .create_root_pane(false, Rect::new(0, 0, 400, 300))
        .unwrap();
    let desktop = session.create(WidgetKind::DesktopPane);
    session.add(parts.content_pane, desktop, None, None).unwrap();

    let window = session.create(WidgetKind::InternalFrame);
    session.tree_mut().set_text(window, "Editor").unwrap();
    session
        .tree_mut()
        .set_bounds(window, Rect::new(20, 20, 150, 100))
        .unwrap();
    session.add_frame(desktop, window).unwrap();

    assert!(session.tree().is_realized(window));
    assert!(session.tree().ui(window).is_some());
    assert_eq!(session.tree().frame_title(window), "Editor");
    assert_eq!(session.tree().child_at(desktop, 0), Some(window));
}

#[test]
fn test_ancestor_binding_through_keyless_focus_chain() {
    let mut session = UiSession::new();
    let parts = session
        .create_root_pane(false, Rect::new(0, 0, 200, 100))
        .unwrap();
    let window = session.create(WidgetKind::Widget);
    let child = session.create(WidgetKind::Widget);
    session.add(parts.content_pane, window, None, None).unwrap();
    session.add(window, child, None, None).unwrap();

    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = fired.clone();
    session
        .tree_mut()
        .put_key_binding(
            window,
            InputCondition::WhenAncestorFocused,
            "Ctrl+Q".parse().unwrap(),
            move |a| sink.lock().push(a.command.clone()),
        )
        .unwrap();
    assert!(!session
        .tree()
        .get(child)
        .unwrap()
        .event_mask()
        .contains(EventType::KeyPressed.mask()));

    assert!(session.request_focus(child));
    let consumed = session
        .key_pressed(Key::Char('q'), KeyboardModifiers::CTRL)
        .unwrap();

    assert!(consumed);
    assert_eq!(*fired.lock(), vec!["Ctrl+Q".to_string()]);
}
