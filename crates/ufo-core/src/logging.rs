//! Logging and debugging facilities for UFO.
//!
//! This module provides:
//! - Debug visualization for any tree implementing [`DebugTree`]
//! - A performance span guard
//!
//! # Tracing Integration
//!
//! UFO uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("ufo::layout=debug,ufo::event=trace")
//!     .init();
//! ```
//!
//! Targets: `ufo_core::signal`, `ufo::perf`, `ufo::widget`, `ufo::layout`,
//! `ufo::event`, `ufo::laf`, `ufo::xul` and `ufo::session`.

use std::fmt::{self, Write as FmtWrite};

use crate::error::{CoreError, Result};

/// What a tree exposes for debug printing.
pub trait DebugTree {
    /// Node identifier.
    type Id: Copy + fmt::Debug;

    /// Name of a node, `None` if the id is dead.
    fn debug_name(&self, id: Self::Id) -> Option<String>;

    /// Short type name of a node.
    fn debug_type(&self, id: Self::Id) -> Option<String>;

    /// Names of dynamic properties attached to a node.
    fn debug_properties(&self, id: Self::Id) -> Vec<String> {
        let _ = id;
        Vec::new()
    }

    /// Children of a node in order.
    fn debug_children(&self, id: Self::Id) -> Vec<Self::Id>;
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Whether to show dynamic property names.
    pub show_properties: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_properties: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_properties: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_properties: false,
            ..Default::default()
        }
    }
}

/// Formats a [`DebugTree`] as indented text.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree<T: DebugTree>(&self, tree: &T, root: T::Id) -> Result<String> {
        let mut output = String::new();
        self.format_subtree_into(tree, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into<T: DebugTree>(
        &self,
        tree: &T,
        id: T::Id,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> Result<()> {
        if let Some(max) = self.options.max_depth
            && depth > max
        {
            return Ok(());
        }

        let name = tree
            .debug_name(id)
            .ok_or_else(|| CoreError::InvalidNode(format!("{id:?}")))?;

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(if name.is_empty() { "(unnamed)" } else { &name });

        if self.options.show_ids {
            write!(output, " [{:?}]", id)?;
        }
        if self.options.show_types
            && let Some(type_name) = tree.debug_type(id)
        {
            write!(output, " ({})", type_name)?;
        }
        output.push('\n');

        if self.options.show_properties {
            let prop_prefix = self.build_property_prefix(depth);
            for prop_name in tree.debug_properties(id) {
                writeln!(output, "{}  .{}", prop_prefix, prop_name)?;
            }
        }

        let children = tree.debug_children(id);
        let child_count = children.len();
        for (i, child_id) in children.into_iter().enumerate() {
            self.format_subtree_into(tree, child_id, depth + 1, i + 1 == child_count, output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }

    fn build_property_prefix(&self, depth: usize) -> String {
        let branch = match self.options.style {
            TreeStyle::Ascii => "|",
            TreeStyle::Unicode => "\u{2502}",
            TreeStyle::Compact => "",
        };

        let mut prefix = String::new();
        for _ in 0..depth {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for tracking the duration of validate and paint passes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "ufo::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal tree: node `i` has name `names[i]` and the listed children.
    struct VecTree {
        names: Vec<&'static str>,
        children: Vec<Vec<usize>>,
    }

    impl DebugTree for VecTree {
        type Id = usize;

        fn debug_name(&self, id: usize) -> Option<String> {
            self.names.get(id).map(|s| s.to_string())
        }

        fn debug_type(&self, id: usize) -> Option<String> {
            (id < self.names.len()).then(|| "Node".to_string())
        }

        fn debug_properties(&self, id: usize) -> Vec<String> {
            if id == 0 { vec!["layout".into()] } else { Vec::new() }
        }

        fn debug_children(&self, id: usize) -> Vec<usize> {
            self.children.get(id).cloned().unwrap_or_default()
        }
    }

    fn sample() -> VecTree {
        VecTree {
            names: vec!["window", "button1", "button2"],
            children: vec![vec![1, 2], vec![], vec![]],
        }
    }

    #[test]
    fn test_tree_format_hierarchy() {
        let output = TreeDebug::new().format_subtree(&sample(), 0).unwrap();
        assert!(output.starts_with("window [0] (Node)"));
        assert!(output.contains("\u{251c}\u{2500}\u{2500} button1"));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} button2"));
    }

    #[test]
    fn test_tree_format_minimal() {
        let output = TreeDebug::with_options(TreeFormatOptions::minimal())
            .format_subtree(&sample(), 0)
            .unwrap();
        assert!(output.contains("button1"));
        assert!(!output.contains("Node"));
        assert!(!output.contains('['));
    }

    #[test]
    fn test_tree_format_detailed_and_depth() {
        let options = TreeFormatOptions {
            max_depth: Some(0),
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        };
        let output = TreeDebug::with_options(options)
            .format_subtree(&sample(), 0)
            .unwrap();
        assert!(output.contains(".layout"));
        assert!(!output.contains("button1"));
    }

    #[test]
    fn test_tree_format_invalid_root() {
        let err = TreeDebug::new().format_subtree(&sample(), 7).unwrap_err();
        assert_eq!(err, CoreError::InvalidNode("7".into()));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
