//! Widget node data.
//!
//! A [`WidgetNode`] holds everything the toolkit knows about one widget.
//! Nodes live inside a [`WidgetTree`](super::WidgetTree) and are addressed by
//! [`WidgetId`]; structural changes (parenting, bounds, layout) go through
//! the tree so that invalidation stays consistent.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use ufo_core::{Dimension, Insets, PropertyBag, Rect, Signal};
use ufo_style::{BorderType, FontSpec, Palette};

use super::events::{ActionEvent, Event, EventMask, EventType};
use super::keyboard::InputMap;
use super::kind::WidgetKind;
use super::layout::LayoutManager;
use super::WidgetId;
use crate::laf::UiDelegate;

/// Property key under which a child's layout constraint is stored.
pub const LAYOUT_CONSTRAINT_KEY: &str = "layout";

/// Horizontal alignment of a widget's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of a widget's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Regions of a [`BorderLayout`](super::layout::BorderLayout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderRegion {
    North,
    South,
    East,
    West,
    Center,
}

impl BorderRegion {
    /// Parse a region name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            "east" => Some(Self::East),
            "west" => Some(Self::West),
            "center" => Some(Self::Center),
            _ => None,
        }
    }
}

/// A child's layout constraint, interpreted by the parent's layout manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Box layout stretch factor.
    Flex(i32),
    /// Border layout region.
    Region(BorderRegion),
    /// Layered pane layer.
    Layer(i32),
    /// Free-form constraint string, e.g. `"north"`.
    Named(String),
}

impl Constraint {
    /// Flex factor, if this is a flex constraint.
    pub fn flex(&self) -> Option<i32> {
        match self {
            Self::Flex(flex) => Some(*flex),
            _ => None,
        }
    }

    /// Border region, for region and named constraints.
    pub fn region(&self) -> Option<BorderRegion> {
        match self {
            Self::Region(region) => Some(*region),
            Self::Named(name) => BorderRegion::from_name(name),
            _ => None,
        }
    }
}

/// Look-and-feel attributes a widget has set explicitly. UI delegates do
/// not override these when they install theme defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UiAttributes(u8);

impl UiAttributes {
    pub const NONE: Self = Self(0);
    pub const BORDER: Self = Self(1 << 0);
    pub const MARGIN: Self = Self(1 << 1);
    pub const FONT: Self = Self(1 << 2);
    pub const PALETTE: Self = Self(1 << 3);

    /// Check if all given attributes are set.
    #[inline]
    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub(crate) fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for UiAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Signals owned by a widget. They are dropped together with the widget.
#[derive(Default)]
pub struct WidgetSignals {
    events: HashMap<EventType, Signal<Event>>,
    /// Emitted when the widget becomes part of a realized hierarchy.
    pub widget_added: Signal<WidgetId>,
    /// Emitted when the widget leaves a realized hierarchy.
    pub widget_removed: Signal<WidgetId>,
    /// Emitted by activatable widgets and key bindings.
    pub action_performed: Signal<ActionEvent>,
    /// Emitted when a toggleable widget changes its selected state.
    pub selected_changed: Signal<bool>,
}

impl WidgetSignals {
    /// The signal for one event type, if anything was ever connected to it.
    pub fn event(&self, event_type: EventType) -> Option<&Signal<Event>> {
        self.events.get(&event_type)
    }

    pub(crate) fn event_or_insert(&mut self, event_type: EventType) -> &Signal<Event> {
        self.events.entry(event_type).or_default()
    }

    /// Fire the signal for an event's type. Returns the number of slots run.
    pub(crate) fn emit_event(&self, event: &Event) -> usize {
        self.events
            .get(&event.event_type())
            .map_or(0, |signal| signal.emit_ref(event))
    }
}

impl fmt::Debug for WidgetSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSignals")
            .field("event_signals", &self.events.len())
            .finish_non_exhaustive()
    }
}

/// The data of a single widget.
pub struct WidgetNode {
    pub(crate) kind: WidgetKind,
    pub(crate) name: String,
    pub(crate) parent: Option<WidgetId>,
    /// Children, front-most first.
    pub(crate) children: Vec<WidgetId>,

    pub(crate) bounds: Rect,
    pub(crate) minimum_size: Option<Dimension>,
    pub(crate) preferred_size: Option<Dimension>,
    pub(crate) maximum_size: Option<Dimension>,
    pub(crate) cached_preferred: Cell<Option<Dimension>>,

    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) focusable: bool,
    pub(crate) opaque: bool,
    pub(crate) opacity: f32,

    pub(crate) border: BorderType,
    pub(crate) margin: Insets,
    pub(crate) font: FontSpec,
    pub(crate) palette: Palette,
    pub(crate) h_alignment: HAlignment,
    pub(crate) v_alignment: VAlignment,
    pub(crate) explicit_attributes: UiAttributes,

    pub(crate) text: String,
    pub(crate) icon: Option<String>,
    pub(crate) action_command: String,
    pub(crate) selected: bool,
    pub(crate) value: i32,
    pub(crate) range: (i32, i32),
    pub(crate) items: Vec<String>,

    pub(crate) layout: Option<Box<dyn LayoutManager>>,
    pub(crate) properties: PropertyBag,
    pub(crate) event_mask: EventMask,
    pub(crate) needs_layout: bool,
    pub(crate) realized: bool,
    pub(crate) ui: Option<Arc<dyn UiDelegate>>,

    pub(crate) input_map: InputMap,
    pub(crate) ancestor_input_map: InputMap,
    pub(crate) signals: WidgetSignals,
}

impl WidgetNode {
    pub(crate) fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            name: String::new(),
            parent: None,
            children: Vec::new(),
            bounds: Rect::ZERO,
            minimum_size: None,
            preferred_size: None,
            maximum_size: None,
            cached_preferred: Cell::new(None),
            visible: true,
            enabled: true,
            focusable: true,
            opaque: true,
            opacity: 1.0,
            border: BorderType::NoBorder,
            margin: Insets::ZERO,
            font: FontSpec::control(),
            palette: Palette::passive(),
            h_alignment: HAlignment::Left,
            v_alignment: VAlignment::Center,
            explicit_attributes: UiAttributes::NONE,
            text: String::new(),
            icon: None,
            action_command: String::new(),
            selected: false,
            value: 0,
            range: (0, 100),
            items: Vec::new(),
            layout: None,
            properties: PropertyBag::new(),
            event_mask: EventMask::NONE,
            needs_layout: true,
            realized: false,
            ui: None,
            input_map: InputMap::new(),
            ancestor_input_map: InputMap::new(),
            signals: WidgetSignals::default(),
        }
    }

    /// The widget kind.
    #[inline]
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The widget name (empty if unnamed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent widget.
    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children, front-most first.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Bounds relative to the parent.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether the widget is shown.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the widget reacts to input.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the widget can take keyboard focus.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Whether the widget paints its whole background.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Opacity from 0.0 (transparent) to 1.0.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Border type.
    #[inline]
    pub fn border(&self) -> BorderType {
        self.border
    }

    /// Margin inside the border.
    #[inline]
    pub fn margin(&self) -> Insets {
        self.margin
    }

    /// Font.
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Horizontal content alignment.
    #[inline]
    pub fn h_alignment(&self) -> HAlignment {
        self.h_alignment
    }

    /// Vertical content alignment.
    #[inline]
    pub fn v_alignment(&self) -> VAlignment {
        self.v_alignment
    }

    /// Attributes set explicitly rather than by the look-and-feel.
    #[inline]
    pub fn explicit_attributes(&self) -> UiAttributes {
        self.explicit_attributes
    }

    /// Text of labels, buttons and text edits.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Icon resource name.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Command string sent with `action_performed`. Falls back to the text.
    pub fn action_command(&self) -> &str {
        if self.action_command.is_empty() {
            &self.text
        } else {
            &self.action_command
        }
    }

    /// Selected state of toggleable widgets.
    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Value of ranged widgets.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Range of ranged widgets as `(minimum, maximum)`.
    #[inline]
    pub fn range(&self) -> (i32, i32) {
        self.range
    }

    /// Items of list and combo boxes.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The layout manager, if any.
    pub fn layout(&self) -> Option<&dyn LayoutManager> {
        self.layout.as_deref()
    }

    /// Dynamic properties.
    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// Event types this widget processes.
    #[inline]
    pub fn event_mask(&self) -> EventMask {
        self.event_mask
    }

    /// Whether the widget needs a layout pass.
    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Whether the widget is part of a realized hierarchy.
    #[inline]
    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// The installed UI delegate.
    pub fn ui(&self) -> Option<&Arc<dyn UiDelegate>> {
        self.ui.as_ref()
    }

    /// Bindings active while this widget has focus.
    pub fn input_map(&self) -> &InputMap {
        &self.input_map
    }

    /// Bindings active while a descendant has focus.
    pub fn ancestor_input_map(&self) -> &InputMap {
        &self.ancestor_input_map
    }

    /// The widget's signals.
    pub fn signals(&self) -> &WidgetSignals {
        &self.signals
    }

    /// Explicit minimum size, if set.
    pub fn explicit_minimum_size(&self) -> Option<Dimension> {
        self.minimum_size
    }

    /// Explicit preferred size, if set.
    pub fn explicit_preferred_size(&self) -> Option<Dimension> {
        self.preferred_size
    }

    /// Maximum size; unbounded unless set.
    pub fn maximum_size(&self) -> Dimension {
        self.maximum_size.unwrap_or(Dimension::MAX)
    }

    /// The stored layout constraint.
    ///
    /// Besides [`Constraint`] values, a plain `i32` reads as a flex factor and
    /// a `String` as a named constraint.
    pub fn constraint(&self) -> Option<Constraint> {
        let props = &self.properties;
        if let Some(constraint) = props.get::<Constraint>(LAYOUT_CONSTRAINT_KEY) {
            return Some(constraint.clone());
        }
        if let Some(flex) = props.get::<i32>(LAYOUT_CONSTRAINT_KEY) {
            return Some(Constraint::Flex(*flex));
        }
        props
            .get::<String>(LAYOUT_CONSTRAINT_KEY)
            .map(|name| Constraint::Named(name.clone()))
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("bounds", &self.bounds)
            .field("visible", &self.visible)
            .field("needs_layout", &self.needs_layout)
            .field("realized", &self.realized)
            .finish_non_exhaustive()
    }
}
