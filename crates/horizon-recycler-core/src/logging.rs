//! Logging and debugging facilities for Horizon Recycler.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - Debug visualization for view trees
//!
//! # Tracing Integration
//!
//! Horizon Recycler uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_recycler=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use horizon_recycler_core::{ViewKind, ViewTree, ViewTreeDebug};
//!
//! let mut tree = ViewTree::new();
//! let row = tree.create(ViewKind::Group, None);
//! println!("{}", ViewTreeDebug::new().format_subtree(&tree, row).unwrap());
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::ViewResult;
use crate::view::{ViewId, ViewKind, ViewTree, Visibility};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_recycler_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_recycler_core::signal";
    /// Adapter view resolution target.
    pub const ADAPTER: &str = "horizon_recycler::adapter";
    /// Data set mutation target.
    pub const MUTATION: &str = "horizon_recycler::mutation";
    /// Layout inflation target.
    pub const INFLATE: &str = "horizon_recycler::inflate";
    /// Host-side recycle bin target.
    pub const RECYCLE: &str = "horizon_recycler::recycle";
}

/// Style options for view tree visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line-per-view representation.
    Compact,
}

/// Configuration for view tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Whether to show arena IDs.
    pub show_ids: bool,
    /// Whether to show text and check state.
    pub show_content: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_content: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }

    /// Options for minimal output.
    pub fn minimal() -> Self {
        Self {
            style: TreeStyle::Compact,
            show_content: false,
            ..Default::default()
        }
    }
}

/// Debug utility for rendering a row's view subtree as text.
#[derive(Debug, Clone, Default)]
pub struct ViewTreeDebug {
    options: TreeFormatOptions,
}

impl ViewTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, tree: &ViewTree, root: ViewId) -> ViewResult<String> {
        let mut output = String::new();
        self.format_into(tree, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_into(
        &self,
        tree: &ViewTree,
        id: ViewId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ViewResult<()> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let node = tree.get(id)?;
        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(node.kind().name());

        if let Some(ident) = node.ident() {
            let _ = write!(output, " {ident}");
        }
        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_content {
            match node.kind() {
                ViewKind::Text(text) => {
                    let _ = write!(output, " {:?}", text.text());
                }
                ViewKind::CheckBox(check) => {
                    let mark = if check.is_checked() { "x" } else { " " };
                    let _ = write!(output, " [{mark}] {:?}", check.text());
                }
                ViewKind::Image(image) if !image.source().is_none() => {
                    let _ = write!(output, " <{:?}>", image.source());
                }
                _ => {}
            }
        }
        match node.visibility() {
            Visibility::Visible => {}
            Visibility::Invisible => output.push_str(" (invisible)"),
            Visibility::Gone => output.push_str(" (gone)"),
        }
        output.push('\n');

        let children = node.children();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(tree, child, depth + 1, i + 1 == children.len(), output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat(' ').take(self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewIdent;
    use crate::widgets::{CheckBox, TextView};

    fn sample() -> (ViewTree, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.create(ViewKind::Group, None);
        let title = tree.create(ViewKind::Text(TextView::new("Hello")), Some(ViewIdent(1)));
        let check = tree.create(ViewKind::CheckBox(CheckBox::new("done")), Some(ViewIdent(2)));
        tree.append_child(root, title).unwrap();
        tree.append_child(root, check).unwrap();
        tree.get_mut(check).unwrap().set_visibility(Visibility::Gone);
        (tree, root)
    }

    #[test]
    fn test_format_ascii() {
        let (tree, root) = sample();
        let debug = ViewTreeDebug::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..Default::default()
        });

        let output = debug.format_subtree(&tree, root).unwrap();
        assert_eq!(
            output,
            "Group\n+-- TextView #1 \"Hello\"\n`-- CheckBox #2 [ ] \"done\" (gone)\n"
        );
    }

    #[test]
    fn test_format_minimal_respects_depth() {
        let (tree, root) = sample();
        let debug = ViewTreeDebug::with_options(TreeFormatOptions {
            max_depth: Some(0),
            ..TreeFormatOptions::minimal()
        });
        assert_eq!(debug.format_subtree(&tree, root).unwrap(), "Group\n");
    }
}
