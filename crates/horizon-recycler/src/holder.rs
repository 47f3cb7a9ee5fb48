//! View holders: per-row lookup caches.
//!
//! A [`ViewCache`] is created once per physical row view and lives exactly as
//! long as that view stays in the host's recycling pool. It remembers which
//! child view each identifier resolved to, so repeated lookups during
//! rebinding never search the subtree again, and it carries a small tag store
//! for per-row state the binding logic wants to keep across rebinds.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use horizon_recycler_core::{ViewId, ViewIdent, ViewTree};

use crate::error::{Error, Result};
use crate::layout::LayoutId;

/// The capability every row wrapper provides: access to its root view.
pub trait ViewHolder {
    /// The root view of the materialized row (the "convert view").
    fn convert_view(&self) -> ViewId;
}

/// A value stored in a holder's tag store.
pub type Tag = Arc<dyn Any + Send + Sync>;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Lazy child-view lookup cache and tag store for one row view.
///
/// Lookups are resolved from the *find view*, which starts as the row root
/// and can be moved to one of the root's direct children with
/// [`set_find_view_at`](Self::set_find_view_at). Cache entries are keyed by
/// the find view they were resolved from, so the same identifier used under
/// two anchors never returns the other anchor's view.
pub struct ViewCache {
    instance: u64,
    convert_view: ViewId,
    find_view: ViewId,
    layout: LayoutId,
    views: HashMap<(ViewId, ViewIdent), ViewId>,
    tags: HashMap<i32, Tag>,
    searches: usize,
}

impl ViewCache {
    /// Wrap a freshly inflated row.
    pub fn new(convert_view: ViewId, layout: LayoutId) -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            convert_view,
            find_view: convert_view,
            layout,
            views: HashMap::new(),
            tags: HashMap::new(),
            searches: 0,
        }
    }

    /// Process-unique number identifying this holder instance.
    pub fn instance_id(&self) -> u64 {
        self.instance
    }

    /// The view lookups currently start from.
    pub fn find_view(&self) -> ViewId {
        self.find_view
    }

    /// The layout this row was inflated from.
    pub fn layout_id(&self) -> LayoutId {
        self.layout
    }

    /// Resolve `ident` below the find view, searching the subtree only on
    /// the first request.
    pub fn resolve(&mut self, tree: &ViewTree, ident: ViewIdent) -> Result<ViewId> {
        let key = (self.find_view, ident);
        if let Some(&view) = self.views.get(&key) {
            return Ok(view);
        }

        self.searches += 1;
        let view = tree
            .find_by_ident(self.find_view, ident)
            .ok_or(Error::ViewNotFound {
                ident,
                anchor: self.find_view,
            })?;
        self.views.insert(key, view);
        Ok(view)
    }

    /// Move the find view to the `index`-th direct child of the row root.
    ///
    /// A negative index resets it to the root.
    pub fn set_find_view_at(&mut self, tree: &ViewTree, index: isize) -> Result<&mut Self> {
        let Ok(index) = usize::try_from(index) else {
            self.find_view = self.convert_view;
            return Ok(self);
        };

        let child_count = tree.child_count(self.convert_view)?;
        self.find_view = tree
            .child_at(self.convert_view, index)?
            .ok_or(Error::InvalidAnchor { index, child_count })?;
        Ok(self)
    }

    /// Store a tag under `key`, replacing any previous value.
    pub fn put_tag<V: Any + Send + Sync>(&mut self, key: i32, value: V) -> &mut Self {
        self.tags.insert(key, Arc::new(value));
        self
    }

    /// The tag stored under `key`.
    pub fn tag(&self, key: i32) -> Option<&Tag> {
        self.tags.get(&key)
    }

    /// The tag stored under `key`, if it has type `V`.
    pub fn tag_as<V: Any>(&self, key: i32) -> Option<&V> {
        self.tags.get(&key)?.downcast_ref::<V>()
    }

    /// Remove and return the tag stored under `key`.
    pub fn remove_tag(&mut self, key: i32) -> Option<Tag> {
        self.tags.remove(&key)
    }

    /// Number of cached identifier lookups.
    pub fn cached_view_count(&self) -> usize {
        self.views.len()
    }

    /// Number of subtree searches performed so far.
    pub fn search_count(&self) -> usize {
        self.searches
    }
}

impl ViewHolder for ViewCache {
    fn convert_view(&self) -> ViewId {
        self.convert_view
    }
}

impl fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCache")
            .field("instance", &self.instance)
            .field("convert_view", &self.convert_view)
            .field("find_view", &self.find_view)
            .field("layout", &self.layout)
            .field("cached_views", &self.views.len())
            .field("tags", &self.tags.keys().collect::<Vec<_>>())
            .finish()
    }
}

static_assertions::assert_impl_all!(ViewCache: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_recycler_core::{TextView, ViewKind};

    const ROW: LayoutId = LayoutId(1);
    const TITLE: ViewIdent = ViewIdent(1);
    const LABEL: ViewIdent = ViewIdent(2);

    /// root
    /// ├── left (group)  -> LABEL "left"
    /// └── right (group) -> LABEL "right", TITLE
    fn composite() -> (ViewTree, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.create(ViewKind::Group, None);
        for (side, with_title) in [("left", false), ("right", true)] {
            let group = tree.create(ViewKind::Group, None);
            let label = tree.create(ViewKind::Text(TextView::new(side)), Some(LABEL));
            tree.append_child(group, label).unwrap();
            if with_title {
                let title = tree.create(ViewKind::Text(TextView::new("title")), Some(TITLE));
                tree.append_child(group, title).unwrap();
            }
            tree.append_child(root, group).unwrap();
        }
        (tree, root)
    }

    fn label_text(tree: &ViewTree, view: ViewId) -> String {
        tree.text(view).unwrap().text().to_string()
    }

    #[test]
    fn test_resolve_searches_once() {
        let (tree, root) = composite();
        let mut cache = ViewCache::new(root, ROW);

        let first = cache.resolve(&tree, TITLE).unwrap();
        let second = cache.resolve(&tree, TITLE).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.search_count(), 1);
        assert_eq!(cache.cached_view_count(), 1);
    }

    #[test]
    fn test_resolve_missing_ident() {
        let (tree, root) = composite();
        let mut cache = ViewCache::new(root, ROW);

        let err = cache.resolve(&tree, ViewIdent(42)).unwrap_err();
        assert!(matches!(
            err,
            Error::ViewNotFound { ident: ViewIdent(42), anchor } if anchor == root
        ));
    }

    #[test]
    fn test_anchor_scopes_lookup() {
        let (tree, root) = composite();
        let mut cache = ViewCache::new(root, ROW);

        let from_root = cache.resolve(&tree, LABEL).unwrap();
        assert_eq!(label_text(&tree, from_root), "left");

        cache.set_find_view_at(&tree, 1).unwrap();
        let from_right = cache.resolve(&tree, LABEL).unwrap();
        assert_eq!(label_text(&tree, from_right), "right");

        cache.set_find_view_at(&tree, 0).unwrap();
        assert!(cache.resolve(&tree, TITLE).is_err());

        cache.set_find_view_at(&tree, -1).unwrap();
        assert_eq!(cache.find_view(), root);
        assert_eq!(cache.resolve(&tree, LABEL).unwrap(), from_root);
    }

    #[test]
    fn test_invalid_anchor() {
        let (tree, root) = composite();
        let mut cache = ViewCache::new(root, ROW);

        let err = cache.set_find_view_at(&tree, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAnchor {
                index: 2,
                child_count: 2
            }
        ));
        assert_eq!(cache.find_view(), root);
    }

    #[test]
    fn test_tags_are_per_instance() {
        let (tree, root) = composite();
        let mut a = ViewCache::new(root, ROW);
        let b = ViewCache::new(tree.children(root).unwrap()[0], ROW);

        a.put_tag(7, String::from("pending"));
        assert_eq!(a.tag_as::<String>(7).map(String::as_str), Some("pending"));
        assert!(a.tag_as::<u32>(7).is_none());
        assert!(b.tag(7).is_none());
        assert!(a.tag(8).is_none());

        assert!(a.remove_tag(7).is_some());
        assert!(a.tag(7).is_none());
    }

    #[test]
    fn test_instances_are_distinct() {
        let (_tree, root) = composite();
        let a = ViewCache::new(root, ROW);
        let b = ViewCache::new(root, ROW);
        assert_ne!(a.instance_id(), b.instance_id());
        assert_eq!(a.convert_view(), root);
        assert_eq!(a.layout_id(), ROW);
    }
}
