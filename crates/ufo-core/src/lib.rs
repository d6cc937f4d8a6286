//! Core systems for UFO.
//!
//! This crate provides the foundational, widget-agnostic pieces of the UFO
//! toolkit:
//!
//! - **Geometry**: integer points, rectangles, dimensions and insets
//! - **Signal/Slot System**: ordered, synchronous observer lists
//! - **Property Bag**: named values of arbitrary types attached to widgets
//! - **Logging**: tree debug output, performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use ufo_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{CoreError, Result};
pub use geometry::{Dimension, Insets, Point, Rect};
pub use logging::{DebugTree, PerfSpan, TreeDebug, TreeFormatOptions, TreeStyle};
pub use property::{PropertyBag, PropertyError};
pub use signal::{ConnectionId, Signal};

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
static_assertions::assert_impl_all!(PropertyBag: Send, Sync);
