//! Layout templates and inflation.
//!
//! A layout describes the view subtree of one row type. Adapters turn a
//! [`LayoutId`] into a fresh subtree through a [`LayoutInflater`]; the usual
//! inflater is a [`LayoutRegistry`] of declarative [`LayoutTemplate`]s.
//!
//! # Example
//!
//! ```
//! use horizon_recycler::layout::{LayoutId, LayoutInflater, LayoutRegistry, LayoutTemplate};
//! use horizon_recycler_core::{ViewIdent, ViewTree};
//!
//! const ITEM: LayoutId = LayoutId(1);
//! const TITLE: ViewIdent = ViewIdent(10);
//!
//! let registry = LayoutRegistry::new().with_layout(
//!     ITEM,
//!     LayoutTemplate::group().with_child(LayoutTemplate::text(TITLE, "")),
//! );
//!
//! let mut tree = ViewTree::new();
//! let row = registry.inflate(ITEM, &mut tree, None).unwrap();
//! assert!(tree.find_by_ident(row, TITLE).is_some());
//! ```

use std::collections::HashMap;

use horizon_recycler_core::logging::targets;
use horizon_recycler_core::{
    CheckBox, ImageView, LayoutParams, TextView, ViewId, ViewIdent, ViewKind, ViewTree, Visibility,
};

use crate::error::{Error, Result};

/// Identifies a row layout (the `@LayoutRes` of a row type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub u32);

/// Declarative description of a view subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTemplate {
    kind: ViewKind,
    ident: Option<ViewIdent>,
    visibility: Visibility,
    layout_params: Option<LayoutParams>,
    background: Option<u32>,
    children: Vec<LayoutTemplate>,
}

impl LayoutTemplate {
    /// A template for a view of any kind.
    pub fn view(kind: ViewKind) -> Self {
        Self {
            kind,
            ident: None,
            visibility: Visibility::Visible,
            layout_params: None,
            background: None,
            children: Vec::new(),
        }
    }

    /// A container.
    pub fn group() -> Self {
        Self::view(ViewKind::Group)
    }

    /// A content-less view.
    pub fn plain(ident: ViewIdent) -> Self {
        Self::view(ViewKind::Plain).with_ident(ident)
    }

    /// A text view showing `text`.
    pub fn text(ident: ViewIdent, text: impl Into<String>) -> Self {
        Self::view(ViewKind::Text(TextView::new(text))).with_ident(ident)
    }

    /// An empty image view.
    pub fn image(ident: ViewIdent) -> Self {
        Self::view(ViewKind::Image(ImageView::new())).with_ident(ident)
    }

    /// An unchecked check box labelled `text`.
    pub fn check_box(ident: ViewIdent, text: impl Into<String>) -> Self {
        Self::view(ViewKind::CheckBox(CheckBox::new(text))).with_ident(ident)
    }

    /// Assign the identifier lookups use.
    pub fn with_ident(mut self, ident: ViewIdent) -> Self {
        self.ident = Some(ident);
        self
    }

    /// Set the initial visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set explicit layout params.
    pub fn with_layout_params(mut self, params: LayoutParams) -> Self {
        self.layout_params = Some(params);
        self
    }

    /// Set the background resource.
    pub fn with_background(mut self, resource: u32) -> Self {
        self.background = Some(resource);
        self
    }

    /// Append a child template.
    pub fn with_child(mut self, child: LayoutTemplate) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child templates.
    pub fn with_children(mut self, children: impl IntoIterator<Item = LayoutTemplate>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of views this template produces.
    pub fn view_count(&self) -> usize {
        1 + self.children.iter().map(LayoutTemplate::view_count).sum::<usize>()
    }

    /// Build a detached copy of this subtree in `tree`.
    pub fn build(&self, tree: &mut ViewTree) -> Result<ViewId> {
        let id = tree.create(self.kind.clone(), self.ident);
        let node = tree.get_mut(id)?;
        node.set_visibility(self.visibility);
        if let Some(params) = self.layout_params {
            node.set_layout_params(params);
        }
        if let Some(resource) = self.background {
            node.set_background_resource(resource);
        }

        for child in &self.children {
            let child_id = child.build(tree)?;
            tree.append_child(id, child_id)?;
        }
        Ok(id)
    }
}

/// Produces the view subtree for a layout.
///
/// The returned root must be detached; the host attaches it where it wants.
/// `parent` is the container the row will eventually live in.
pub trait LayoutInflater: Send + Sync {
    fn inflate(&self, layout: LayoutId, tree: &mut ViewTree, parent: Option<ViewId>)
        -> Result<ViewId>;
}

impl<F> LayoutInflater for F
where
    F: Fn(LayoutId, &mut ViewTree) -> Result<ViewId> + Send + Sync,
{
    fn inflate(
        &self,
        layout: LayoutId,
        tree: &mut ViewTree,
        _parent: Option<ViewId>,
    ) -> Result<ViewId> {
        self(layout, tree)
    }
}

/// A table of layout templates keyed by [`LayoutId`].
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    templates: HashMap<LayoutId, LayoutTemplate>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, returning the one it replaced.
    pub fn register(&mut self, id: LayoutId, template: LayoutTemplate) -> Option<LayoutTemplate> {
        self.templates.insert(id, template)
    }

    /// Register a template, builder style.
    pub fn with_layout(mut self, id: LayoutId, template: LayoutTemplate) -> Self {
        self.register(id, template);
        self
    }

    /// Whether a template is registered for `id`.
    pub fn contains(&self, id: LayoutId) -> bool {
        self.templates.contains_key(&id)
    }

    /// The template registered for `id`.
    pub fn template(&self, id: LayoutId) -> Option<&LayoutTemplate> {
        self.templates.get(&id)
    }
}

impl LayoutInflater for LayoutRegistry {
    fn inflate(
        &self,
        layout: LayoutId,
        tree: &mut ViewTree,
        parent: Option<ViewId>,
    ) -> Result<ViewId> {
        let template = self
            .templates
            .get(&layout)
            .ok_or(Error::UnknownLayout(layout))?;

        let root = template.build(tree)?;

        // Rows inflated for a container get its default params, like any
        // child would, without being attached to it.
        if let Some(parent) = parent {
            tree.get(parent)?;
            let node = tree.get_mut(root)?;
            if node.layout_params().is_none() {
                node.set_layout_params(LayoutParams::default());
            }
        }

        tracing::trace!(
            target: targets::INFLATE,
            ?layout,
            views = template.view_count(),
            "inflated layout"
        );
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_recycler_core::Size;

    const ROW: LayoutId = LayoutId(1);
    const TITLE: ViewIdent = ViewIdent(1);
    const ICON: ViewIdent = ViewIdent(2);

    fn registry() -> LayoutRegistry {
        LayoutRegistry::new().with_layout(
            ROW,
            LayoutTemplate::group()
                .with_background(9)
                .with_child(LayoutTemplate::image(ICON))
                .with_child(
                    LayoutTemplate::text(TITLE, "title").with_visibility(Visibility::Invisible),
                ),
        )
    }

    #[test]
    fn test_template_view_count() {
        assert_eq!(registry().template(ROW).unwrap().view_count(), 3);
    }

    #[test]
    fn test_inflate_builds_detached_subtree() {
        let registry = registry();
        let mut tree = ViewTree::new();
        let root = registry.inflate(ROW, &mut tree, None).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.parent(root).unwrap(), None);
        assert_eq!(tree.get(root).unwrap().background(), Some(9));

        let title = tree.find_by_ident(root, TITLE).unwrap();
        assert_eq!(tree.text(title).unwrap().text(), "title");
        assert_eq!(tree.get(title).unwrap().visibility(), Visibility::Invisible);
    }

    #[test]
    fn test_inflate_each_call_is_fresh() {
        let registry = registry();
        let mut tree = ViewTree::new();
        let a = registry.inflate(ROW, &mut tree, None).unwrap();
        let b = registry.inflate(ROW, &mut tree, None).unwrap();
        assert_ne!(a, b);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_inflate_with_parent_sets_default_params() {
        let registry = registry();
        let mut tree = ViewTree::new();
        let list = tree.create(ViewKind::Group, None);
        let root = registry.inflate(ROW, &mut tree, Some(list)).unwrap();

        let params = tree.get(root).unwrap().layout_params().unwrap();
        assert_eq!(params.width, Size::MatchParent);
        assert!(tree.children(list).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_layout() {
        let mut tree = ViewTree::new();
        let err = registry().inflate(LayoutId(99), &mut tree, None).unwrap_err();
        assert!(matches!(err, Error::UnknownLayout(LayoutId(99))));
    }

    #[test]
    fn test_closure_inflater() {
        let inflater = |_layout: LayoutId, tree: &mut ViewTree| -> Result<ViewId> {
            Ok(tree.create(ViewKind::Plain, None))
        };
        let mut tree = ViewTree::new();
        inflater.inflate(ROW, &mut tree, None).unwrap();
        assert_eq!(tree.len(), 1);
    }
}
