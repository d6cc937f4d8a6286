//! Look-and-feel indirection.
//!
//! A [`LookAndFeel`] maps every [`WidgetKind`] to a factory producing its
//! [`UiDelegate`], and carries the [`ThemeMap`] the delegates read their
//! defaults from. Delegates are created on first use and shared by all
//! widgets of a kind.
//!
//! A kind without a registered factory is a configuration error reported as
//! [`Error::NoUiDelegate`]; the widget keeps working without a delegate.
//!
//! # Example
//!
//! ```
//! use ufo::laf::LookAndFeel;
//! use ufo::widget::WidgetKind;
//!
//! let mut laf = LookAndFeel::basic();
//! assert!(laf.get_ui(WidgetKind::Button).is_ok());
//!
//! laf.unregister(WidgetKind::Button);
//! assert!(laf.get_ui(WidgetKind::Button).is_err());
//! ```

mod basic;
mod delegate;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use ufo_style::{BASIC_LAF_NAME, ThemeMap, basic_theme};

pub use basic::{
    BasicItemsUi, BasicPanelUi, BasicRangeUi, BasicSeparatorUi, BasicTextEditUi,
    BasicTextIconUi, COLUMNS_KEY, ORIENTATION_KEY, ROWS_KEY,
};
pub use delegate::{
    UiDelegate, install_theme_defaults, paint_background, uninstall_theme_defaults,
};

use crate::error::{Error, Result, TreeError};
use crate::widget::{WidgetId, WidgetKind, WidgetTree};

/// Creates the delegate of one widget kind from the active theme.
pub type DelegateFactory = Arc<dyn Fn(&ThemeMap) -> Arc<dyn UiDelegate> + Send + Sync>;

/// A named set of UI delegates and theme defaults.
pub struct LookAndFeel {
    name: String,
    theme: ThemeMap,
    registry: HashMap<WidgetKind, DelegateFactory>,
    delegates: Mutex<HashMap<WidgetKind, Arc<dyn UiDelegate>>>,
}

impl fmt::Debug for LookAndFeel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookAndFeel")
            .field("name", &self.name)
            .field("theme_entries", &self.theme.len())
            .field("registered", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl LookAndFeel {
    /// Create a look-and-feel without any delegates.
    pub fn new(name: impl Into<String>, theme: ThemeMap) -> Self {
        Self {
            name: name.into(),
            theme,
            registry: HashMap::new(),
            delegates: Mutex::new(HashMap::new()),
        }
    }

    /// The built-in "basic" look-and-feel.
    pub fn basic() -> Self {
        let mut laf = Self::new(BASIC_LAF_NAME, basic_theme());
        basic::register_basic_delegates(&mut laf);
        laf
    }

    /// Look up a built-in look-and-feel by name.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            BASIC_LAF_NAME => Ok(Self::basic()),
            other => Err(Error::UnknownLookAndFeel(other.to_string())),
        }
    }

    /// The name of this look-and-feel.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Theme defaults.
    pub fn theme(&self) -> &ThemeMap {
        &self.theme
    }

    /// Mutable theme defaults. Delegates are recreated on next use.
    pub fn theme_mut(&mut self) -> &mut ThemeMap {
        self.delegates.get_mut().clear();
        &mut self.theme
    }

    /// Register the delegate factory of a widget kind, replacing any
    /// previous one.
    pub fn register<F>(&mut self, kind: WidgetKind, factory: F)
    where
        F: Fn(&ThemeMap) -> Arc<dyn UiDelegate> + Send + Sync + 'static,
    {
        self.registry.insert(kind, Arc::new(factory));
        self.delegates.get_mut().remove(&kind);
    }

    /// Remove the delegate factory of a widget kind. Returns whether one was
    /// registered.
    pub fn unregister(&mut self, kind: WidgetKind) -> bool {
        self.delegates.get_mut().remove(&kind);
        self.registry.remove(&kind).is_some()
    }

    /// Whether a delegate is registered for `kind`.
    pub fn has_ui(&self, kind: WidgetKind) -> bool {
        self.registry.contains_key(&kind)
    }

    /// The delegate of a widget kind.
    pub fn get_ui(&self, kind: WidgetKind) -> Result<Arc<dyn UiDelegate>> {
        if let Some(ui) = self.delegates.lock().get(&kind) {
            return Ok(ui.clone());
        }
        let Some(factory) = self.registry.get(&kind) else {
            tracing::warn!(target: "ufo::laf", laf = %self.name, %kind, "no UI delegate registered");
            return Err(Error::no_ui_delegate(self.name.clone(), kind));
        };
        let ui = factory(&self.theme);
        self.delegates.lock().insert(kind, ui.clone());
        Ok(ui)
    }

    /// Install the delegate of a widget's kind into the widget.
    pub fn install_ui(&self, tree: &mut WidgetTree, id: WidgetId) -> Result<()> {
        let kind = tree.kind(id).ok_or(TreeError::InvalidWidget(id))?;
        let ui = self.get_ui(kind)?;
        tree.set_ui(id, ui, &self.theme)?;
        Ok(())
    }

    /// Install delegates into a whole subtree.
    ///
    /// Every widget is attempted; the first error is returned.
    pub fn install_subtree(&self, tree: &mut WidgetTree, id: WidgetId) -> Result<()> {
        let mut first_error = None;
        for widget in tree.subtree(id) {
            if let Err(error) = self.install_ui(tree, widget) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
