//! Widget tree, layout and event composition.
//!
//! All widgets live in a [`WidgetTree`] arena and are addressed by
//! [`WidgetId`]. A widget is a single [`WidgetNode`] whose behavior is chosen
//! by its [`WidgetKind`] and the kind's [`Capabilities`].
//!
//! # Widget Lifecycle
//!
//! 1. Create a widget with [`WidgetTree::create`].
//! 2. Attach it with [`WidgetTree::add`]. Attaching invalidates the layout
//!    of the parent chain.
//! 3. Once the parent is part of a realized hierarchy (reachable from the
//!    session's root pane), the child subtree is realized: UI delegates are
//!    installed and `widget_added` fires per widget.
//! 4. [`WidgetTree::validate`] lays out dirty containers.
//! 5. [`WidgetTree::remove`] detaches and unrealizes the subtree, firing
//!    `widget_removed`.
//!
//! # Event Flow
//!
//! Events go through [`EventDispatcher`]. A widget processes an event type
//! only if the matching bit of its interest mask is set; connecting to an
//! event signal sets the bit. Unprocessed input events bubble to the parent
//! unchanged and are dropped at the root.
//!
//! # Z-Order
//!
//! Children are stored front-most first: index 0 is hit-tested first and
//! painted last. Layered panes keep children sorted by non-increasing layer.

mod desktop;
mod dispatcher;
mod events;
mod keyboard;
mod kind;
pub mod layout;
mod layered;
mod node;
mod paint;
mod root_pane;
mod tree;

#[cfg(test)]
pub(crate) mod tests;

slotmap::new_key_type! {
    /// Identifies a widget in a [`WidgetTree`].
    pub struct WidgetId;
}

pub use desktop::{
    FRAME_DECORATION_KEY, FRAME_MAXIMIZED_KEY, FRAME_MINIMIZED_KEY, FRAME_RESTORE_BOUNDS_KEY,
    FRAME_TITLE_BAR_KEY, FRAME_TITLE_KEY, MINIMIZED_FRAME_SIZE,
};
pub use dispatcher::{DispatchResult, EventDispatcher, FocusState};
pub use events::{
    ActionEvent, Event, EventBase, EventMask, EventType, FocusEvent, Key, KeyEvent,
    KeyboardModifiers, MouseButton, MouseEvent, MouseWheelEvent, WidgetEvent,
};
pub use keyboard::{ActionSlot, InputCondition, InputMap, KeyStroke};
pub use kind::{Capabilities, WidgetKind};
pub use layered::{
    DEFAULT_LAYER, DRAG_LAYER, FRAME_CONTENT_LAYER, FRAME_LAYER, LAYER_KEY, POPUP_LAYER,
};
pub use node::{
    BorderRegion, Constraint, HAlignment, LAYOUT_CONSTRAINT_KEY, UiAttributes, VAlignment,
    WidgetNode, WidgetSignals,
};
pub use paint::{Graphics, paint_border, paint_tree};
pub use root_pane::{CONTENT_PANE_KEY, MENU_BAR_KEY, RootPaneParts};
pub use tree::WidgetTree;
