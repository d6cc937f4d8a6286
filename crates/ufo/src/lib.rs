//! UFO - widget tree, layout and event composition.
//!
//! This crate is the composition core of the UFO toolkit. It owns the widget
//! hierarchy and everything that happens inside it: layout, event dispatch,
//! focus, layered panes, look-and-feel delegates and XUL documents.
//! Rendering and native windowing live outside; a backend feeds input into a
//! [`UiSession`] and paints through the [`Graphics`](widget::Graphics)
//! trait.
//!
//! # Example
//!
//! ```
//! use ufo::UiSession;
//! use ufo::widget::{BorderRegion, Constraint, WidgetKind};
//! use ufo_core::Rect;
//!
//! let mut session = UiSession::new();
//! let parts = session.create_root_pane(true, Rect::new(0, 0, 400, 300)).unwrap();
//!
//! let status = session.create(WidgetKind::Label);
//! session.tree_mut().set_text(status, "Ready").unwrap();
//! session
//!     .add(
//!         parts.content_pane,
//!         status,
//!         Some(Constraint::Region(BorderRegion::South)),
//!         None,
//!     )
//!     .unwrap();
//!
//! assert!(session.tree().is_realized(status));
//! let content = session.tree().bounds(parts.content_pane);
//! assert_eq!(session.tree().bounds(status).bottom(), content.h);
//! ```
//!
//! # Features
//!
//! - `xul` (default): the [`xul`] document loader, built on `quick-xml`.

pub mod config;
mod error;
pub mod laf;
pub mod session;
pub mod widget;
#[cfg(feature = "xul")]
pub mod xul;

pub use config::ToolkitConfig;
pub use error::{Error, Result, TreeError, TreeResult};
pub use laf::LookAndFeel;
pub use session::UiSession;

static_assertions::assert_impl_all!(widget::WidgetTree: Send);
static_assertions::assert_impl_all!(UiSession: Send);
static_assertions::assert_impl_all!(LookAndFeel: Send, Sync);
