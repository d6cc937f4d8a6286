//! Widget event types.
//!
//! Events are short-lived values handed to [`dispatch_event`]. Every event
//! carries an [`EventBase`] with its type, its source widget, the keyboard
//! modifiers held when it was generated and a consumed flag. Slots consume
//! an event through a shared reference, which stops key binding lookup.
//!
//! [`dispatch_event`]: crate::widget::EventDispatcher::send_event

use std::cell::Cell;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use ufo_core::{Point, Rect};

use super::WidgetId;

/// All event types a widget can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    MousePressed,
    MouseReleased,
    MouseClicked,
    MouseMoved,
    MouseDragged,
    MouseEntered,
    MouseExited,
    MouseWheel,
    KeyPressed,
    KeyReleased,
    KeyTyped,
    FocusGained,
    FocusLost,
    WidgetMoved,
    WidgetResized,
    WidgetShown,
    WidgetHidden,
}

impl EventType {
    /// The interest bit for this single event type.
    #[inline]
    pub fn mask(self) -> EventMask {
        EventMask(1 << (self as u32))
    }

    /// The category mask this event type belongs to.
    pub fn category(self) -> EventMask {
        match self {
            Self::MousePressed | Self::MouseReleased | Self::MouseClicked => EventMask::MOUSE,
            Self::MouseMoved | Self::MouseDragged | Self::MouseEntered | Self::MouseExited => {
                EventMask::MOUSE_MOTION
            }
            Self::MouseWheel => EventMask::MOUSE_WHEEL,
            Self::KeyPressed | Self::KeyReleased | Self::KeyTyped => EventMask::KEY,
            Self::FocusGained | Self::FocusLost => EventMask::FOCUS,
            Self::WidgetMoved | Self::WidgetResized | Self::WidgetShown | Self::WidgetHidden => {
                EventMask::WIDGET
            }
        }
    }

    /// Input events (mouse, wheel, key) travel to the parent when a widget
    /// is not interested in them.
    #[inline]
    pub fn is_input(self) -> bool {
        EventMask::INPUT.intersects(self.mask())
    }
}

/// A set of event types a widget is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventMask(u32);

impl EventMask {
    /// No events.
    pub const NONE: Self = Self(0);
    /// Press, release and click.
    pub const MOUSE: Self = Self(0b111);
    /// Move, drag, enter and exit.
    pub const MOUSE_MOTION: Self = Self(0b1111 << 3);
    /// Wheel rotation.
    pub const MOUSE_WHEEL: Self = Self(1 << 7);
    /// Key press, release and typed characters.
    pub const KEY: Self = Self(0b111 << 8);
    /// Focus gained and lost.
    pub const FOCUS: Self = Self(0b11 << 11);
    /// Moved, resized, shown and hidden.
    pub const WIDGET: Self = Self(0b1111 << 13);
    /// Every input event.
    pub const INPUT: Self = Self(Self::MOUSE.0 | Self::MOUSE_MOTION.0 | Self::MOUSE_WHEEL.0 | Self::KEY.0);
    /// Every event.
    pub const ALL: Self = Self(Self::INPUT.0 | Self::FOCUS.0 | Self::WIDGET.0);

    /// Check if every type in `other` is in this mask.
    #[inline]
    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any type in `other` is in this mask.
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Remove the types in `other`.
    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Check if the mask is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for EventMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for EventMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character key, stored lowercase.
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key F1..F12.
    F(u8),
}

impl Key {
    /// Parse a key name as used in accelerator strings ("F", "Enter", "F5").
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => Self::Enter,
            "escape" | "esc" => Self::Escape,
            "tab" => Self::Tab,
            "backspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "space" => Self::Space,
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    (Some('f'), Some(_)) => {
                        let n: u8 = lower[1..].parse().ok()?;
                        if (1..=12).contains(&n) {
                            Self::F(n)
                        } else {
                            return None;
                        }
                    }
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Self::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Common data for all events.
#[derive(Debug, Clone)]
pub struct EventBase {
    event_type: EventType,
    source: Option<WidgetId>,
    modifiers: KeyboardModifiers,
    consumed: Cell<bool>,
}

impl EventBase {
    /// Create a new event base.
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            source: None,
            modifiers: KeyboardModifiers::NONE,
            consumed: Cell::new(false),
        }
    }

    /// The event type.
    #[inline]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// The widget the event was originally targeted at.
    #[inline]
    pub fn source(&self) -> Option<WidgetId> {
        self.source
    }

    /// Modifiers held when the event was generated.
    #[inline]
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Check if the event has been consumed.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Mark the event as consumed.
    #[inline]
    pub fn consume(&self) {
        self.consumed.set(true);
    }
}

/// Mouse button and motion events.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    pub base: EventBase,
    /// Position relative to the receiving widget.
    pub location: Point,
    /// Position relative to the root pane.
    pub root_location: Point,
    /// Button that changed state, for press/release/click.
    pub button: Option<MouseButton>,
    pub click_count: u32,
}

/// Mouse wheel rotation.
#[derive(Debug, Clone)]
pub struct MouseWheelEvent {
    pub base: EventBase,
    pub location: Point,
    pub root_location: Point,
    /// Positive values scroll away from the user.
    pub delta: i32,
}

/// Key press, release and typed events.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub base: EventBase,
    pub key: Key,
    /// The character produced, for typed events.
    pub ch: Option<char>,
}

/// Focus changes.
#[derive(Debug, Clone)]
pub struct FocusEvent {
    pub base: EventBase,
    /// The widget losing focus (for gained) or gaining it (for lost).
    pub opposite: Option<WidgetId>,
}

/// Geometry and visibility changes.
#[derive(Debug, Clone)]
pub struct WidgetEvent {
    pub base: EventBase,
    /// Bounds after the change.
    pub bounds: Rect,
}

/// Any widget event.
#[derive(Debug, Clone)]
pub enum Event {
    Mouse(MouseEvent),
    MouseWheel(MouseWheelEvent),
    Key(KeyEvent),
    Focus(FocusEvent),
    Widget(WidgetEvent),
}

impl Event {
    /// Create a mouse event. Local and root positions start out equal.
    pub fn mouse(event_type: EventType, location: Point, button: Option<MouseButton>) -> Self {
        Self::Mouse(MouseEvent {
            base: EventBase::new(event_type),
            location,
            root_location: location,
            button,
            click_count: u32::from(event_type == EventType::MouseClicked),
        })
    }

    /// Create a wheel event.
    pub fn wheel(location: Point, delta: i32) -> Self {
        Self::MouseWheel(MouseWheelEvent {
            base: EventBase::new(EventType::MouseWheel),
            location,
            root_location: location,
            delta,
        })
    }

    /// Create a key event.
    pub fn key(event_type: EventType, key: Key, ch: Option<char>) -> Self {
        Self::Key(KeyEvent {
            base: EventBase::new(event_type),
            key,
            ch,
        })
    }

    /// Create a focus event.
    pub fn focus(event_type: EventType, opposite: Option<WidgetId>) -> Self {
        Self::Focus(FocusEvent {
            base: EventBase::new(event_type),
            opposite,
        })
    }

    /// Create a widget event.
    pub fn widget(event_type: EventType, bounds: Rect) -> Self {
        Self::Widget(WidgetEvent {
            base: EventBase::new(event_type),
            bounds,
        })
    }

    /// Set the keyboard modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.base_mut().modifiers = modifiers;
        self
    }

    /// Set the source widget.
    pub fn with_source(mut self, source: WidgetId) -> Self {
        self.base_mut().source = Some(source);
        self
    }

    /// Shared event data.
    pub fn base(&self) -> &EventBase {
        match self {
            Self::Mouse(e) => &e.base,
            Self::MouseWheel(e) => &e.base,
            Self::Key(e) => &e.base,
            Self::Focus(e) => &e.base,
            Self::Widget(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::Mouse(e) => &mut e.base,
            Self::MouseWheel(e) => &mut e.base,
            Self::Key(e) => &mut e.base,
            Self::Focus(e) => &mut e.base,
            Self::Widget(e) => &mut e.base,
        }
    }

    /// The event type.
    #[inline]
    pub fn event_type(&self) -> EventType {
        self.base().event_type()
    }

    /// Check if the event has been consumed.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.base().is_consumed()
    }

    /// Mark the event as consumed.
    #[inline]
    pub fn consume(&self) {
        self.base().consume();
    }

    /// The mouse payload, if this is a mouse event.
    pub fn as_mouse(&self) -> Option<&MouseEvent> {
        match self {
            Self::Mouse(e) => Some(e),
            _ => None,
        }
    }

    /// The key payload, if this is a key event.
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }

    /// Copy of this event with positions translated to a widget's local
    /// coordinates. `origin` is the widget's location relative to the root.
    pub(crate) fn translated(&self, origin: Point) -> Self {
        let mut event = self.clone();
        match &mut event {
            Self::Mouse(e) => e.location = e.root_location - origin,
            Self::MouseWheel(e) => e.location = e.root_location - origin,
            _ => {}
        }
        event
    }

    /// Copy of this event with a different type, sharing positions and
    /// modifiers. Used to synthesize enter/exit/drag events.
    pub(crate) fn retyped(&self, event_type: EventType) -> Self {
        let mut event = self.clone();
        let base = event.base_mut();
        base.event_type = event_type;
        base.consumed.set(false);
        event
    }
}

/// Fired by activatable widgets and key bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    /// The widget that fired the action.
    pub source: WidgetId,
    /// The action command: the widget's action command, or the key stroke
    /// text for key bindings.
    pub command: String,
    pub modifiers: KeyboardModifiers,
}
