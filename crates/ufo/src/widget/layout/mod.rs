//! Layout managers.
//!
//! A container delegates the positioning of its children to a
//! [`LayoutManager`]:
//!
//! - [`BoxLayout`] - children in a row or column, with flex factors
//! - [`BorderLayout`] - north/south/east/west/center regions
//! - [`FlowLayout`] - wrapping rows
//! - [`StackLayout`] - overlapping pages
//! - [`RootPaneLayout`] - menu bar and content pane of a root pane
//!
//! # Example
//!
//! ```
//! use ufo::widget::layout::BoxLayout;
//! use ufo::widget::{WidgetKind, WidgetTree};
//! use ufo_core::{Dimension, Rect};
//!
//! let mut tree = WidgetTree::new();
//! let row = tree.create(WidgetKind::Widget);
//! tree.set_layout(row, Some(Box::new(BoxLayout::horizontal().with_gap(10)))).unwrap();
//!
//! let ok = tree.create(WidgetKind::Widget);
//! tree.set_preferred_size(ok, Some(Dimension::new(40, 20))).unwrap();
//! tree.add(row, ok, None, None).unwrap();
//!
//! tree.set_bounds(row, Rect::new(0, 0, 100, 20)).unwrap();
//! tree.validate(row);
//! assert_eq!(tree.bounds(ok), Rect::new(0, 0, 40, 20));
//! ```

mod border_layout;
mod box_layout;
mod flow_layout;
mod stack_layout;
mod traits;

pub use border_layout::BorderLayout;
pub use box_layout::{Alignment, BoxLayout, Orientation, Packing};
pub use flow_layout::FlowLayout;
pub use stack_layout::StackLayout;
pub use traits::{ChildPlacement, LayoutManager};

pub(crate) use traits::visible_children;

pub use crate::widget::root_pane::RootPaneLayout;
