//! View tree for Horizon Recycler.
//!
//! Provides the arena every row view lives in:
//! - Stable view identifiers via slotmap-based storage
//! - Parent-child structure with cascading removal
//! - Identifier lookup within a subtree
//! - Per-view visibility, layout params, listeners and an opaque tag
//!
//! # Key Types
//!
//! - [`ViewTree`] - The arena owning every view
//! - [`ViewId`] - Stable handle to one view in a tree
//! - [`ViewIdent`] - Identifier assigned to a child by its layout
//! - [`ViewNode`] - Per-view state
//! - [`ViewKind`] - Widget payload of a view

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use crate::error::{ViewError, ViewResult};
use crate::widgets::{CheckBox, ImageView, TextView};

new_key_type! {
    /// A unique identifier for a view in a [`ViewTree`].
    ///
    /// `ViewId`s stay valid while the view is alive, no matter how the tree
    /// around it changes. They become invalid when the view is removed.
    pub struct ViewId;
}

impl ViewId {
    /// Convert the ViewId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a ViewId from a raw u64 value.
    ///
    /// This does not check whether the view exists in any tree.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// The identifier a layout assigns to a view so it can be looked up later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewIdent(pub u32);

impl fmt::Display for ViewIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visibility of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Drawn and takes up space.
    #[default]
    Visible,
    /// Not drawn, but still takes up space.
    Invisible,
    /// Not drawn and takes up no space.
    Gone,
}

/// One dimension of a view's requested size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// As large as the parent.
    MatchParent,
    /// Just large enough for the content.
    WrapContent,
    /// A fixed size in logical pixels.
    Exact(f32),
}

/// Size request a view hands to its parent's layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub width: Size,
    pub height: Size,
}

impl LayoutParams {
    /// Create layout params with explicit width and height.
    pub fn new(width: Size, height: Size) -> Self {
        Self { width, height }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::new(Size::MatchParent, Size::WrapContent)
    }
}

/// Callback invoked when a view is clicked.
pub type ClickListener = Arc<dyn Fn(ViewId) + Send + Sync>;

/// Callback invoked when a view is long-pressed. Returns `true` if consumed.
pub type LongClickListener = Arc<dyn Fn(ViewId) -> bool + Send + Sync>;

/// The widget payload of a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewKind {
    /// A container whose children are laid out by the host.
    Group,
    /// A view with no content of its own.
    Plain,
    Text(TextView),
    Image(ImageView),
    CheckBox(CheckBox),
}

impl ViewKind {
    /// Short name used in diagnostics and type mismatch errors.
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Group => "Group",
            ViewKind::Plain => "View",
            ViewKind::Text(_) => "TextView",
            ViewKind::Image(_) => "ImageView",
            ViewKind::CheckBox(_) => "CheckBox",
        }
    }
}

/// State stored in the tree for each view.
pub struct ViewNode {
    ident: Option<ViewIdent>,
    kind: ViewKind,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    visibility: Visibility,
    background: Option<u32>,
    layout_params: Option<LayoutParams>,
    tag: Option<Arc<dyn Any + Send + Sync>>,
    on_click: Option<ClickListener>,
    on_long_click: Option<LongClickListener>,
}

impl ViewNode {
    fn new(kind: ViewKind, ident: Option<ViewIdent>) -> Self {
        Self {
            ident,
            kind,
            parent: None,
            children: Vec::new(),
            visibility: Visibility::Visible,
            background: None,
            layout_params: None,
            tag: None,
            on_click: None,
            on_long_click: None,
        }
    }

    /// The identifier assigned by the layout, if any.
    pub fn ident(&self) -> Option<ViewIdent> {
        self.ident
    }

    /// The widget payload.
    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }

    /// Mutable access to the widget payload.
    pub fn kind_mut(&mut self) -> &mut ViewKind {
        &mut self.kind
    }

    /// The parent view, or `None` for a detached root.
    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    /// Child views in insertion order.
    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Set the visibility.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// The background drawable resource, if any.
    pub fn background(&self) -> Option<u32> {
        self.background
    }

    /// Set the background resource.
    pub fn set_background_resource(&mut self, resource: u32) {
        self.background = Some(resource);
    }

    /// Layout params, if any have been set.
    pub fn layout_params(&self) -> Option<LayoutParams> {
        self.layout_params
    }

    /// Replace the layout params.
    pub fn set_layout_params(&mut self, params: LayoutParams) {
        self.layout_params = Some(params);
    }

    /// The opaque value attached to this view.
    pub fn tag(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.tag.as_ref()
    }

    /// Replace the opaque tag carried by this view.
    pub fn set_tag(&mut self, tag: Option<Arc<dyn Any + Send + Sync>>) {
        self.tag = tag;
    }

    /// Whether a click listener is installed.
    pub fn has_click_listener(&self) -> bool {
        self.on_click.is_some()
    }

    /// Install or clear the click listener.
    pub fn set_on_click_listener(&mut self, listener: Option<ClickListener>) {
        self.on_click = listener;
    }

    /// Whether a long-click listener is installed.
    pub fn has_long_click_listener(&self) -> bool {
        self.on_long_click.is_some()
    }

    /// Install or clear the long-click listener.
    pub fn set_on_long_click_listener(&mut self, listener: Option<LongClickListener>) {
        self.on_long_click = listener;
    }
}

impl fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("ident", &self.ident)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("visibility", &self.visibility)
            .field("background", &self.background)
            .field("layout_params", &self.layout_params)
            .field("has_tag", &self.tag.is_some())
            .field("has_click_listener", &self.on_click.is_some())
            .field("has_long_click_listener", &self.on_long_click.is_some())
            .finish()
    }
}

fn mismatch(view: ViewId, expected: &'static str, kind: &ViewKind) -> ViewError {
    ViewError::TypeMismatch {
        view,
        expected,
        actual: kind.name(),
    }
}

/// The arena holding every view of a window.
///
/// Views are created detached; [`append_child`](Self::append_child) builds
/// the hierarchy. Removing a view removes its whole subtree.
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: SlotMap<ViewId, ViewNode>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no views.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a live view.
    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Create a detached view.
    pub fn create(&mut self, kind: ViewKind, ident: Option<ViewIdent>) -> ViewId {
        self.nodes.insert(ViewNode::new(kind, ident))
    }

    /// Look up a view.
    pub fn get(&self, id: ViewId) -> ViewResult<&ViewNode> {
        self.nodes.get(id).ok_or(ViewError::InvalidViewId(id))
    }

    /// Look up a view mutably.
    pub fn get_mut(&mut self, id: ViewId) -> ViewResult<&mut ViewNode> {
        self.nodes.get_mut(id).ok_or(ViewError::InvalidViewId(id))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: ViewId, child: ViewId) -> ViewResult<()> {
        self.get(parent)?;
        if self.get(child)?.parent.is_some() {
            return Err(ViewError::AlreadyAttached(child));
        }

        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(ViewError::CircularParentage);
            }
            cursor = self.nodes[current].parent;
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Detach `child` from its parent, keeping the subtree alive.
    pub fn detach(&mut self, child: ViewId) -> ViewResult<()> {
        if let Some(parent) = self.get_mut(child)?.parent.take() {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|&c| c != child);
            }
        }
        Ok(())
    }

    /// Remove a view and all of its descendants.
    ///
    /// Returns the number of views removed.
    pub fn remove(&mut self, id: ViewId) -> ViewResult<usize> {
        self.detach(id)?;

        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// The parent of `id`.
    pub fn parent(&self, id: ViewId) -> ViewResult<Option<ViewId>> {
        Ok(self.get(id)?.parent)
    }

    /// The children of `id` in order.
    pub fn children(&self, id: ViewId) -> ViewResult<&[ViewId]> {
        Ok(&self.get(id)?.children)
    }

    /// Number of direct children of `id`.
    pub fn child_count(&self, id: ViewId) -> ViewResult<usize> {
        Ok(self.get(id)?.children.len())
    }

    /// The direct child at `index`, or `None` if out of range.
    pub fn child_at(&self, id: ViewId, index: usize) -> ViewResult<Option<ViewId>> {
        Ok(self.get(id)?.children.get(index).copied())
    }

    /// Find the first view carrying `ident` in the subtree rooted at `start`.
    ///
    /// The search is pre-order depth-first and considers `start` itself
    /// first. Returns `None` if nothing matches or `start` is not alive.
    pub fn find_by_ident(&self, start: ViewId, ident: ViewIdent) -> Option<ViewId> {
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            let node = self.nodes.get(current)?;
            if node.ident == Some(ident) {
                return Some(current);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// The text payload of `id`, or `TypeMismatch`.
    pub fn text(&self, id: ViewId) -> ViewResult<&TextView> {
        match &self.get(id)?.kind {
            ViewKind::Text(text) => Ok(text),
            other => Err(mismatch(id, "TextView", other)),
        }
    }

    /// Mutable text payload of `id`.
    pub fn text_mut(&mut self, id: ViewId) -> ViewResult<&mut TextView> {
        match &mut self.get_mut(id)?.kind {
            ViewKind::Text(text) => Ok(text),
            other => Err(mismatch(id, "TextView", other)),
        }
    }

    /// The image payload of `id`, or `TypeMismatch`.
    pub fn image(&self, id: ViewId) -> ViewResult<&ImageView> {
        match &self.get(id)?.kind {
            ViewKind::Image(image) => Ok(image),
            other => Err(mismatch(id, "ImageView", other)),
        }
    }

    /// Mutable image payload of `id`.
    pub fn image_mut(&mut self, id: ViewId) -> ViewResult<&mut ImageView> {
        match &mut self.get_mut(id)?.kind {
            ViewKind::Image(image) => Ok(image),
            other => Err(mismatch(id, "ImageView", other)),
        }
    }

    /// The check box payload of `id`, or `TypeMismatch`.
    pub fn check_box(&self, id: ViewId) -> ViewResult<&CheckBox> {
        match &self.get(id)?.kind {
            ViewKind::CheckBox(check) => Ok(check),
            other => Err(mismatch(id, "CheckBox", other)),
        }
    }

    /// Mutable check box payload of `id`.
    pub fn check_box_mut(&mut self, id: ViewId) -> ViewResult<&mut CheckBox> {
        match &mut self.get_mut(id)?.kind {
            ViewKind::CheckBox(check) => Ok(check),
            other => Err(mismatch(id, "CheckBox", other)),
        }
    }

    /// Invoke the view's click listener.
    ///
    /// Returns `true` if a listener was attached.
    pub fn perform_click(&self, id: ViewId) -> ViewResult<bool> {
        match self.get(id)?.on_click.clone() {
            Some(listener) => {
                listener(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Invoke the view's long-click listener.
    ///
    /// Returns `true` if a listener consumed the long click.
    pub fn perform_long_click(&self, id: ViewId) -> ViewResult<bool> {
        match self.get(id)?.on_long_click.clone() {
            Some(listener) => Ok(listener(id)),
            None => Ok(false),
        }
    }
}

static_assertions::assert_impl_all!(ViewTree: Send, Sync);
