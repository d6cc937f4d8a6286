//! XUL user interface descriptions.
//!
//! [`Xul`] loads a XUL document and builds a widget tree from it. The
//! document root must be a `window`; its `title`, `width` and `height`
//! attributes describe the root pane, its children become the content
//! pane. Box elements (`box`, `hbox`, `vbox` and the window itself) get a
//! [`BoxLayout`] configured from `orient`, `align` and `pack`.
//!
//! Commands are bound by name: an element with `oncommand="save"` is
//! connected to the action registered with [`Xul::set_action`] under
//! `"save"`.
//!
//! # Example
//!
//! ```
//! use ufo::UiSession;
//! use ufo::xul::Xul;
//!
//! let mut xul = Xul::new();
//! xul.load_str(r#"
//!     <window title="Hello" width="240" height="120">
//!         <label value="Name:"/>
//!         <textbox id="name" flex="1"/>
//!     </window>
//! "#).unwrap();
//!
//! let mut session = UiSession::new();
//! let parts = xul.create_root_pane(&mut session).unwrap();
//!
//! let name = xul.get("name").unwrap();
//! assert_eq!(session.tree().parent(name), Some(parts.content_pane));
//! assert_eq!(session.bounds().w, 240);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use ufo_core::{Dimension, Rect, Signal};

use crate::error::{Error, Result};
use crate::laf::{COLUMNS_KEY, ORIENTATION_KEY, ROWS_KEY};
use crate::session::UiSession;
use crate::widget::layout::{
    Alignment, BorderLayout, BoxLayout, Orientation, Packing, StackLayout,
};
use crate::widget::{
    ActionEvent, ActionSlot, KeyStroke, RootPaneParts, WidgetId, WidgetKind, WidgetTree,
};

/// Widget property: the `class` attribute, as a `String`.
pub const CLASS_KEY: &str = "xul_class";
/// Widget property: the `style` attribute, as a `String`.
pub const STYLE_KEY: &str = "xul_style";
/// Widget property: the [`Direction`] given by the `dir` attribute.
pub const DIRECTION_KEY: &str = "direction";
/// Widget property: the [`WidgetId`] a label describes (`control`).
pub const BUDDY_KEY: &str = "label_buddy";
/// Widget property: the [`KeyStroke`] of an `accesskey`.
pub const ACCELERATOR_KEY: &str = "accelerator";
/// Widget property: maximum text length (`size`), as `i32`.
pub const MAX_LENGTH_KEY: &str = "max_length";
/// Widget property: whether a combo box is editable, as `bool`.
pub const EDITABLE_KEY: &str = "editable";
/// Widget property: the hidden popup menu of a menu, as [`WidgetId`].
pub const MENU_POPUP_KEY: &str = "menu_popup";

/// Root pane size used when the window does not give one.
const DEFAULT_WINDOW_SIZE: Dimension = Dimension::new(200, 200);

/// Rows shown by a multi-line text box without a `rows` attribute.
const DEFAULT_TEXT_ROWS: i32 = 3;

/// Layout direction of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

// ============================================================================
// Document
// ============================================================================

/// A parsed XUL element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::xul(format!("bad attribute in <{name}>: {e}")))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::xul(format!("bad value of attribute '{key}': {e}")))?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn is_true(&self, key: &str) -> bool {
        self.attr(key) == Some("true")
    }

    fn int(&self, key: &str) -> Option<i32> {
        self.attr(key).and_then(|v| v.trim().parse().ok())
    }

    /// The `label` attribute, falling back to the text content.
    fn label(&self) -> &str {
        self.attr("label").unwrap_or(&self.text)
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

fn parse_document(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(XmlEvent::Start(start)) => stack.push(Element::from_start(&start)?),
            Ok(XmlEvent::Empty(start)) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(XmlEvent::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::xul("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(XmlEvent::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| Error::xul(format!("bad text content: {e}")))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(XmlEvent::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(XmlEvent::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::xul(format!(
                    "parse error at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::xul(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::xul("document has no root element"))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match (stack.last_mut(), root.is_some()) {
        (Some(parent), _) => parent.children.push(element),
        (None, false) => *root = Some(element),
        (None, true) => {
            return Err(Error::xul(format!(
                "second root element <{}>",
                element.name
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Loader
// ============================================================================

/// Loads XUL documents and builds root panes from them.
pub struct Xul {
    document: Option<Element>,
    actions: HashMap<String, ActionSlot>,
    ids: HashMap<String, WidgetId>,
    load_failed: Signal<String>,
}

impl Default for Xul {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Xul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.actions.keys().collect();
        actions.sort();
        f.debug_struct("Xul")
            .field("loaded", &self.document.is_some())
            .field("actions", &actions)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl Xul {
    /// Create a loader without a document.
    pub fn new() -> Self {
        Self {
            document: None,
            actions: HashMap::new(),
            ids: HashMap::new(),
            load_failed: Signal::new(),
        }
    }

    /// Load a document from a file.
    ///
    /// On failure [`load_failed`](Self::load_failed) fires with the error
    /// message and the previous document is dropped.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(target: "ufo::xul", path = %path.display(), "loading XUL file");
        let document = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path, e))
            .and_then(|text| parse_document(&text));
        self.finish_load(document)
    }

    /// Load a document from a string.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        self.finish_load(parse_document(text))
    }

    fn finish_load(&mut self, document: Result<Element>) -> Result<()> {
        match document {
            Ok(document) => {
                tracing::debug!(target: "ufo::xul", root = %document.name, "XUL document loaded");
                self.document = Some(document);
                Ok(())
            }
            Err(error) => {
                tracing::error!(target: "ufo::xul", %error, "failed to load XUL document");
                self.document = None;
                self.load_failed.emit(error.to_string());
                Err(error)
            }
        }
    }

    /// Whether a document is loaded.
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Fires with an error message when loading fails.
    pub fn load_failed(&self) -> &Signal<String> {
        &self.load_failed
    }

    /// The window title of the loaded document.
    pub fn title(&self) -> Option<&str> {
        self.document.as_ref().and_then(|d| d.attr("title"))
    }

    /// Register the action run by elements with `oncommand="name"`.
    pub fn set_action<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Arc::new(action));
    }

    /// Replace all registered actions.
    pub fn set_action_map(&mut self, actions: HashMap<String, ActionSlot>) {
        self.actions = actions;
    }

    /// The widget built from the element with the given `id` attribute.
    pub fn get(&self, id: &str) -> Option<WidgetId> {
        self.ids.get(id).copied()
    }

    /// Build a root pane from the loaded document and make it the session
    /// root.
    ///
    /// The tree is built detached and realized in one step when it becomes
    /// the session root. Access keys of elements with a command are bound
    /// in the session input map.
    #[tracing::instrument(skip_all, target = "ufo::xul", level = "debug")]
    pub fn create_root_pane(&mut self, session: &mut UiSession) -> Result<RootPaneParts> {
        let Self {
            document,
            actions,
            ids,
            ..
        } = self;
        let window = document
            .as_ref()
            .ok_or_else(|| Error::xul("no document loaded"))?;
        if window.name != "window" {
            return Err(Error::xul(format!(
                "expected <window> root element, found <{}>",
                window.name
            )));
        }
        ids.clear();

        let mut parts = session.tree_mut().create_root_pane(false)?;
        let mut builder = Builder {
            tree: session.tree_mut(),
            ids,
            actions,
            root: parts.root,
            accelerators: Vec::new(),
            buddies: Vec::new(),
        };
        builder.window(window, parts.content_pane)?;
        builder.resolve_buddies()?;
        parts.menu_bar = builder.tree.menu_bar(parts.root);

        for (stroke, action) in builder.accelerators {
            session.input_map_mut().put_slot(stroke, action);
        }

        let size = Dimension::new(
            window.int("width").unwrap_or(0),
            window.int("height").unwrap_or(0),
        );
        let size = if size.is_empty() {
            DEFAULT_WINDOW_SIZE
        } else {
            size
        };
        session.set_root_pane(parts.root, Rect::new(0, 0, size.w, size.h))?;
        Ok(parts)
    }
}

// ============================================================================
// Builder
// ============================================================================

struct Builder<'a> {
    tree: &'a mut WidgetTree,
    ids: &'a mut HashMap<String, WidgetId>,
    actions: &'a HashMap<String, ActionSlot>,
    root: WidgetId,
    accelerators: Vec<(KeyStroke, ActionSlot)>,
    /// Labels and the ids they describe, resolved after the whole tree is
    /// built.
    buddies: Vec<(WidgetId, String)>,
}

impl Builder<'_> {
    fn window(&mut self, window: &Element, content: WidgetId) -> Result<()> {
        self.generic(window, content)?;
        self.box_layout(window, content, Orientation::Horizontal)?;
        self.children(window, content)
    }

    fn children(&mut self, element: &Element, parent: WidgetId) -> Result<()> {
        for child in &element.children {
            match child.name.as_str() {
                "menubar" => self.menu_bar(child)?,
                "toolbox" => {
                    if let Some(bar) = child.child("menubar") {
                        self.menu_bar(bar)?;
                    }
                }
                _ => {
                    if let Some(widget) = self.create(child)? {
                        self.tree.add(parent, widget, None, None)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn create(&mut self, element: &Element) -> Result<Option<WidgetId>> {
        let widget = match element.name.as_str() {
            "box" | "hbox" => self.container(element, WidgetKind::Widget, Orientation::Horizontal)?,
            "vbox" | "radiogroup" => {
                self.container(element, WidgetKind::Widget, Orientation::Vertical)?
            }
            "spacer" => {
                let spacer = self.tree.create(WidgetKind::Widget);
                self.generic(element, spacer)?;
                if element.attr("flex").is_none() {
                    self.tree.set_flex(spacer, 1)?;
                }
                spacer
            }
            "groupbox" => self.group_box(element)?,
            "deck" => self.deck(element)?,
            "stack" => {
                let stack = self.tree.create(WidgetKind::Widget);
                self.generic(element, stack)?;
                self.tree
                    .set_layout(stack, Some(Box::new(StackLayout::new())))?;
                self.children(element, stack)?;
                stack
            }
            "button" => self.button(element, WidgetKind::Button)?,
            "checkbox" => self.button(element, WidgetKind::CheckBox)?,
            "radio" => self.button(element, WidgetKind::RadioButton)?,
            "label" => self.label(element)?,
            "description" => {
                let label = self.tree.create(WidgetKind::Label);
                self.generic(element, label)?;
                self.tree
                    .set_text(label, element.attr("value").unwrap_or(&element.text))?;
                label
            }
            "textbox" => self.text_box(element)?,
            "slider" => {
                let slider = self.tree.create(WidgetKind::Slider);
                self.generic(element, slider)?;
                self.tree
                    .set_range(slider, 0, element.int("maxpos").unwrap_or(100))?;
                self.tree
                    .set_value(slider, element.int("curpos").unwrap_or(0))?;
                slider
            }
            "progressmeter" => {
                let progress = self.tree.create(WidgetKind::ProgressBar);
                self.generic(element, progress)?;
                self.tree.set_range(progress, 0, 100)?;
                self.tree
                    .set_value(progress, element.int("value").unwrap_or(0))?;
                progress
            }
            "separator" => {
                let separator = self.tree.create(WidgetKind::Separator);
                self.generic(element, separator)?;
                separator
            }
            "listbox" => self.list_box(element)?,
            "menulist" => self.menu_list(element)?,
            "tabbox" => self.tab_box(element)?,
            // Consumed by the enclosing group box.
            "caption" => return Ok(None),
            other => {
                tracing::warn!(target: "ufo::xul", element = other, "unsupported XUL element skipped");
                return Ok(None);
            }
        };
        Ok(Some(widget))
    }

    /// Attributes shared by all elements.
    fn generic(&mut self, element: &Element, id: WidgetId) -> Result<()> {
        if let Some(flex) = element.int("flex") {
            self.tree.set_flex(id, flex)?;
        }
        if element.is_true("disabled") {
            self.tree.set_enabled(id, false)?;
        }
        if let Some(class) = element.attr("class") {
            self.tree.put_property(id, CLASS_KEY, class.to_string())?;
        }
        if let Some(style) = element.attr("style") {
            self.tree.put_property(id, STYLE_KEY, style.to_string())?;
        }
        let size = Dimension::new(
            element.int("width").unwrap_or(0),
            element.int("height").unwrap_or(0),
        );
        if !size.is_empty() {
            self.tree.set_preferred_size(id, Some(size))?;
        }
        if let Some(name) = element.attr("id") {
            self.tree.set_name(id, name)?;
            self.ids.insert(name.to_string(), id);
        }
        if let Some(dir) = element.attr("dir") {
            let direction = match dir {
                "rtl" | "reverse" => Direction::RightToLeft,
                _ => Direction::LeftToRight,
            };
            self.tree.put_property(id, DIRECTION_KEY, direction)?;
        }
        if let Some(orientation) = orientation(element) {
            self.tree.put_property(id, ORIENTATION_KEY, orientation)?;
        }
        Ok(())
    }

    /// Install a box layout configured from `orient`, `align` and `pack`.
    fn box_layout(&mut self, element: &Element, id: WidgetId, default: Orientation) -> Result<()> {
        let alignment = match element.attr("align") {
            Some("start" | "left" | "top") => Alignment::Start,
            Some("center") => Alignment::Center,
            Some("end" | "right" | "bottom") => Alignment::End,
            _ => Alignment::Stretch,
        };
        let packing = match element.attr("pack") {
            Some("center") => Packing::Center,
            Some("end") => Packing::End,
            _ => Packing::Start,
        };
        let layout = BoxLayout::new(orientation(element).unwrap_or(default))
            .with_alignment(alignment)
            .with_packing(packing);
        self.tree.set_layout(id, Some(Box::new(layout)))?;
        Ok(())
    }

    fn container(
        &mut self,
        element: &Element,
        kind: WidgetKind,
        default: Orientation,
    ) -> Result<WidgetId> {
        let container = self.tree.create(kind);
        self.generic(element, container)?;
        self.box_layout(element, container, default)?;
        self.children(element, container)?;
        Ok(container)
    }

    fn group_box(&mut self, element: &Element) -> Result<WidgetId> {
        let group = self.container(element, WidgetKind::GroupBox, Orientation::Vertical)?;
        if let Some(caption) = element.child("caption") {
            self.tree.set_text(group, caption.label())?;
        }
        Ok(group)
    }

    /// A stack showing only the page given by `selectedIndex`.
    fn deck(&mut self, element: &Element) -> Result<WidgetId> {
        let deck = self.tree.create(WidgetKind::Stack);
        self.generic(element, deck)?;
        self.tree
            .set_layout(deck, Some(Box::new(StackLayout::new())))?;
        self.children(element, deck)?;
        let selected = element.int("selectedIndex").unwrap_or(0);
        self.show_only(deck, usize::try_from(selected).unwrap_or(0))?;
        Ok(deck)
    }

    fn show_only(&mut self, parent: WidgetId, index: usize) -> Result<()> {
        let pages = self.tree.children(parent).to_vec();
        for (i, page) in pages.into_iter().enumerate() {
            self.tree.set_visible(page, i == index)?;
        }
        Ok(())
    }

    /// Buttons, toggles, menus and menu items.
    fn button(&mut self, element: &Element, kind: WidgetKind) -> Result<WidgetId> {
        let button = self.tree.create(kind);
        self.generic(element, button)?;
        if let Some(label) = element.attr("label") {
            self.tree.set_text(button, label)?;
        }
        if let Some(image) = element.attr("image") {
            self.tree.set_icon(button, Some(image.to_string()))?;
        }
        if element.is_true("checked") || element.is_true("selected") {
            self.tree.set_selected(button, true)?;
        }

        let action = match element.attr("oncommand") {
            Some(command) => {
                self.tree.set_action_command(button, command)?;
                let action = self.actions.get(command).cloned();
                match &action {
                    Some(action) => {
                        let action = action.clone();
                        self.tree.connect_action(button, move |e| action(e))?;
                    }
                    None => {
                        tracing::warn!(target: "ufo::xul", command, "no action registered for command");
                    }
                }
                action
            }
            None => None,
        };

        if let Some(key) = element.attr("accesskey") {
            match format!("Alt+{key}").parse::<KeyStroke>() {
                Ok(stroke) => {
                    self.tree.put_property(button, ACCELERATOR_KEY, stroke)?;
                    if let Some(action) = action {
                        self.accelerators.push((stroke, action));
                    }
                }
                Err(error) => {
                    tracing::warn!(target: "ufo::xul", %error, "ignoring access key");
                }
            }
        }
        Ok(button)
    }

    fn label(&mut self, element: &Element) -> Result<WidgetId> {
        let label = self.tree.create(WidgetKind::Label);
        self.generic(element, label)?;
        let text = element.attr("value").unwrap_or(&element.text);
        let text = match element.attr("accesskey").and_then(|k| k.chars().next()) {
            Some(key) => mark_access_key(text, key),
            None => text.to_string(),
        };
        self.tree.set_text(label, text)?;
        if let Some(control) = element.attr("control") {
            self.buddies.push((label, control.to_string()));
        }
        Ok(label)
    }

    fn resolve_buddies(&mut self) -> Result<()> {
        for (label, control) in std::mem::take(&mut self.buddies) {
            match self.ids.get(&control) {
                Some(&buddy) => self.tree.put_property(label, BUDDY_KEY, buddy)?,
                None => {
                    tracing::warn!(target: "ufo::xul", control, "label refers to unknown id");
                }
            }
        }
        Ok(())
    }

    fn text_box(&mut self, element: &Element) -> Result<WidgetId> {
        let edit = self.tree.create(WidgetKind::TextEdit);
        self.generic(element, edit)?;
        if let Some(value) = element.attr("value") {
            self.tree.set_text(edit, value)?;
        }
        let rows = if element.is_true("multiline") {
            element.int("rows").unwrap_or(DEFAULT_TEXT_ROWS)
        } else {
            1
        };
        self.tree.put_property(edit, ROWS_KEY, rows)?;
        if let Some(columns) = element.int("cols") {
            self.tree.put_property(edit, COLUMNS_KEY, columns)?;
        }
        if let Some(size) = element.int("size") {
            self.tree.put_property(edit, MAX_LENGTH_KEY, size)?;
        }
        Ok(edit)
    }

    /// A list box; with `rows` it is wrapped in a scroll pane, which takes
    /// over the list's layout constraint.
    fn list_box(&mut self, element: &Element) -> Result<WidgetId> {
        let list = self.tree.create(WidgetKind::ListBox);
        self.generic(element, list)?;
        for item in element.children_named("listitem") {
            self.tree.add_item(list, item.label())?;
        }
        let Some(rows) = element.int("rows") else {
            return Ok(list);
        };
        self.tree.put_property(list, ROWS_KEY, rows)?;

        let pane = self.tree.create(WidgetKind::ScrollPane);
        self.tree
            .set_layout(pane, Some(Box::new(BorderLayout::new())))?;
        if let Some(constraint) = self.tree.constraint(list) {
            self.tree.set_constraint(pane, constraint)?;
        }
        self.tree.add(pane, list, None, None)?;
        Ok(pane)
    }

    fn menu_list(&mut self, element: &Element) -> Result<WidgetId> {
        let combo = self.tree.create(WidgetKind::ComboBox);
        self.generic(element, combo)?;
        if let Some(popup) = element.child("menupopup") {
            let items = popup
                .children_named("menuitem")
                .map(|item| item.label().to_string())
                .collect();
            self.tree.set_items(combo, items)?;
        }
        self.tree
            .put_property(combo, EDITABLE_KEY, element.is_true("editable"))?;
        Ok(combo)
    }

    /// Tabs and panels are paired in order; extra ones on either side are
    /// dropped.
    fn tab_box(&mut self, element: &Element) -> Result<WidgetId> {
        let tabs = self.tree.create(WidgetKind::TabWidget);
        self.generic(element, tabs)?;
        self.tree
            .set_layout(tabs, Some(Box::new(StackLayout::new())))?;

        let titles = element
            .child("tabs")
            .map(|t| t.children_named("tab").map(Element::label).collect::<Vec<_>>())
            .unwrap_or_default();
        let panels = element
            .child("tabpanels")
            .map(|p| p.children_named("tabpanel").collect::<Vec<_>>())
            .unwrap_or_default();

        let mut items = Vec::new();
        for (title, panel) in titles.into_iter().zip(panels) {
            let page = self.container(panel, WidgetKind::Widget, Orientation::Horizontal)?;
            self.tree.add(tabs, page, None, None)?;
            items.push(title.to_string());
        }
        self.tree.set_items(tabs, items)?;
        let selected = element.int("selectedIndex").unwrap_or(0);
        self.show_only(tabs, usize::try_from(selected).unwrap_or(0))?;
        Ok(tabs)
    }

    fn menu_bar(&mut self, element: &Element) -> Result<()> {
        let bar = self.tree.create(WidgetKind::MenuBar);
        self.generic(element, bar)?;
        self.tree
            .set_layout(bar, Some(Box::new(BoxLayout::horizontal())))?;
        for menu in element.children_named("menu") {
            let menu = self.menu(menu)?;
            self.tree.add(bar, menu, None, None)?;
        }
        self.tree.set_menu_bar(self.root, Some(bar))?;
        Ok(())
    }

    /// A menu and its hidden popup. The popup must be the first child.
    fn menu(&mut self, element: &Element) -> Result<WidgetId> {
        let menu = self.button(element, WidgetKind::Menu)?;
        let Some(popup_element) = element.children.first().filter(|c| c.name == "menupopup")
        else {
            tracing::warn!(target: "ufo::xul", label = element.label(), "menu without menupopup");
            return Ok(menu);
        };

        let popup = self.tree.create(WidgetKind::PopupMenu);
        self.generic(popup_element, popup)?;
        self.tree
            .set_layout(popup, Some(Box::new(BoxLayout::vertical())))?;
        for item in &popup_element.children {
            let widget = match item.name.as_str() {
                "menuitem" => {
                    let kind = match item.attr("type") {
                        Some("checkbox" | "radio") => WidgetKind::CheckBoxMenuItem,
                        _ => WidgetKind::MenuItem,
                    };
                    self.button(item, kind)?
                }
                "menuseparator" => {
                    let separator = self.tree.create(WidgetKind::Separator);
                    self.tree
                        .put_property(separator, ORIENTATION_KEY, Orientation::Horizontal)?;
                    separator
                }
                "menu" => self.menu(item)?,
                other => {
                    tracing::warn!(target: "ufo::xul", element = other, "unsupported menu element skipped");
                    continue;
                }
            };
            self.tree.add(popup, widget, None, None)?;
        }

        self.tree.add(menu, popup, None, None)?;
        self.tree.set_visible(popup, false)?;
        self.tree.put_property(menu, MENU_POPUP_KEY, popup)?;
        Ok(menu)
    }
}

fn orientation(element: &Element) -> Option<Orientation> {
    match element.attr("orient")? {
        "vertical" => Some(Orientation::Vertical),
        "horizontal" => Some(Orientation::Horizontal),
        _ => None,
    }
}

/// Insert the `&` mnemonic marker before the first occurrence of `key`,
/// ignoring case. Text without the key is returned unchanged.
fn mark_access_key(text: &str, key: char) -> String {
    let position = text
        .char_indices()
        .find(|(_, c)| c.eq_ignore_ascii_case(&key))
        .map(|(i, _)| i);
    match position {
        Some(i) => format!("{}&{}", &text[..i], &text[i..]),
        None => text.to_string(),
    }
}
