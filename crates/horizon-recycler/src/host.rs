//! A minimal host list that drives an adapter.
//!
//! [`RecycleBin`] plays the part of the list widget: it asks the adapter for
//! the rows of a position range, keeps the rows of the previous pass as scrap
//! grouped by row type, and hands scrap back only to positions of the same
//! type. Scrap beyond [`RecyclePolicy::max_scrap_per_type`] is destroyed.
//!
//! There is no viewport math: the caller picks the range, typically after
//! observing [`data_set_changed`](crate::AdapterSignals::data_set_changed).

use std::collections::HashMap;
use std::ops::Range;

use horizon_recycler_core::logging::targets;
use horizon_recycler_core::{ViewId, ViewTree};

use crate::adapter::{AdapterDelegate, CommonAdapter};
use crate::error::Result;

/// Default number of scrap rows kept per row type.
pub const DEFAULT_MAX_SCRAP: usize = 5;

/// Bounds for a [`RecycleBin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecyclePolicy {
    /// Maximum number of scrap rows kept for each row type.
    pub max_scrap_per_type: usize,
}

impl Default for RecyclePolicy {
    fn default() -> Self {
        Self {
            max_scrap_per_type: DEFAULT_MAX_SCRAP,
        }
    }
}

impl RecyclePolicy {
    /// A policy keeping at most `max_scrap_per_type` scrap rows per type.
    pub fn new(max_scrap_per_type: usize) -> Self {
        Self { max_scrap_per_type }
    }

    /// A policy that never recycles.
    pub fn disabled() -> Self {
        Self::new(0)
    }
}

/// One row on screen after a [`RecycleBin::fill`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRow {
    pub position: usize,
    pub view_type: usize,
    pub view: ViewId,
}

/// Per-row-type scrap heaps and the rows of the last pass.
#[derive(Debug, Default)]
pub struct RecycleBin {
    policy: RecyclePolicy,
    parent: Option<ViewId>,
    active: Vec<ActiveRow>,
    scrap: HashMap<usize, Vec<ViewId>>,
}

impl RecycleBin {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty bin with a custom policy.
    pub fn with_policy(policy: RecyclePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Attach filled rows under `parent`, in position order.
    pub fn with_parent(mut self, parent: ViewId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// The scrap bounds in effect.
    pub fn policy(&self) -> RecyclePolicy {
        self.policy
    }

    /// The rows produced by the last [`fill`](Self::fill).
    pub fn active_rows(&self) -> &[ActiveRow] {
        &self.active
    }

    /// Number of scrap rows held for `view_type`.
    pub fn scrap_count(&self, view_type: usize) -> usize {
        self.scrap.get(&view_type).map_or(0, Vec::len)
    }

    /// Number of scrap rows held across all row types.
    pub fn total_scrap(&self) -> usize {
        self.scrap.values().map(Vec::len).sum()
    }

    /// Run one refresh pass over `positions`.
    ///
    /// Rows of the previous pass become scrap first. The range is clipped to
    /// the adapter's current count. Returns the views in position order.
    pub fn fill<T, D>(
        &mut self,
        adapter: &CommonAdapter<T, D>,
        positions: Range<usize>,
        tree: &mut ViewTree,
    ) -> Result<Vec<ViewId>>
    where
        D: AdapterDelegate<T>,
    {
        self.scrap_active(adapter, tree)?;

        let count = adapter.count();
        let positions = positions.start.min(count)..positions.end.min(count);
        let mut views = Vec::with_capacity(positions.len());

        for position in positions {
            let view_type = adapter.item_view_type(position)?;
            let convert_view = self.scrap.get_mut(&view_type).and_then(Vec::pop);
            let view = match adapter.get_view(position, convert_view, self.parent, tree) {
                Ok(view) => view,
                Err(err) => {
                    // A failed bind leaves the recycled row untouched.
                    if let Some(scrap) = convert_view {
                        self.scrap.entry(view_type).or_default().push(scrap);
                    }
                    return Err(err);
                }
            };

            // A row inflated in place of scrap replaces it for good.
            if let Some(stale) = convert_view.filter(|&scrap| scrap != view) {
                Self::destroy(adapter, tree, stale)?;
            }

            self.active.push(ActiveRow {
                position,
                view_type,
                view,
            });
            if let Some(parent) = self.parent {
                tree.append_child(parent, view)?;
            }
            views.push(view);
        }

        tracing::trace!(
            target: targets::RECYCLE,
            rows = views.len(),
            scrap = self.total_scrap(),
            "filled rows"
        );
        Ok(views)
    }

    /// Destroy every active and scrap row.
    pub fn clear<T, D>(&mut self, adapter: &CommonAdapter<T, D>, tree: &mut ViewTree) -> Result<()>
    where
        D: AdapterDelegate<T>,
    {
        let views: Vec<ViewId> = self
            .active
            .drain(..)
            .map(|row| row.view)
            .chain(self.scrap.drain().flat_map(|(_, heap)| heap))
            .collect();
        for view in views {
            Self::destroy(adapter, tree, view)?;
        }
        Ok(())
    }

    fn scrap_active<T, D>(&mut self, adapter: &CommonAdapter<T, D>, tree: &mut ViewTree) -> Result<()>
    where
        D: AdapterDelegate<T>,
    {
        let max = self.policy.max_scrap_per_type;
        for row in std::mem::take(&mut self.active) {
            if self.parent.is_some() {
                tree.detach(row.view)?;
            }

            let heap = self.scrap.entry(row.view_type).or_default();
            if heap.len() < max {
                heap.push(row.view);
            } else {
                tracing::trace!(
                    target: targets::RECYCLE,
                    view = ?row.view,
                    view_type = row.view_type,
                    "scrap heap full, evicting row"
                );
                Self::destroy(adapter, tree, row.view)?;
            }
        }
        Ok(())
    }

    fn destroy<T, D>(adapter: &CommonAdapter<T, D>, tree: &mut ViewTree, view: ViewId) -> Result<()>
    where
        D: AdapterDelegate<T>,
    {
        adapter.discard_view(view);
        if tree.contains(view) {
            tree.remove(view)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use horizon_recycler_core::{ViewIdent, ViewKind};

    use crate::binder::RowBinder;
    use crate::layout::{LayoutId, LayoutRegistry, LayoutTemplate};

    const ROW: LayoutId = LayoutId(1);
    const TITLE: ViewIdent = ViewIdent(1);

    struct Titles;

    impl AdapterDelegate<u32> for Titles {
        fn convert(&self, row: &mut RowBinder<'_>, _position: usize, item: &u32) -> Result<()> {
            row.set_text(TITLE, item.to_string())?;
            Ok(())
        }
    }

    fn adapter(count: u32) -> CommonAdapter<u32, Titles> {
        let registry = LayoutRegistry::new().with_layout(
            ROW,
            LayoutTemplate::group().with_child(LayoutTemplate::text(TITLE, "")),
        );
        CommonAdapter::new((0..count).collect(), Arc::new(registry), vec![ROW], Titles).unwrap()
    }

    #[test]
    fn test_second_pass_reuses_rows() {
        let adapter = adapter(10);
        let mut tree = ViewTree::new();
        let mut bin = RecycleBin::new();

        let first = bin.fill(&adapter, 0..3, &mut tree).unwrap();
        let views = tree.len();
        let mut second = bin.fill(&adapter, 3..6, &mut tree).unwrap();

        second.sort();
        let mut first_sorted = first.clone();
        first_sorted.sort();
        assert_eq!(first_sorted, second);
        assert_eq!(tree.len(), views);
        assert_eq!(adapter.attached_view_count(), 3);
        assert_eq!(bin.total_scrap(), 0);
    }

    #[test]
    fn test_range_is_clipped() {
        let adapter = adapter(2);
        let mut tree = ViewTree::new();
        let mut bin = RecycleBin::new();

        let views = bin.fill(&adapter, 0..10, &mut tree).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(bin.active_rows()[1].position, 1);
    }

    #[test]
    fn test_overflow_is_destroyed() {
        let adapter = adapter(10);
        let mut tree = ViewTree::new();
        let mut bin = RecycleBin::with_policy(RecyclePolicy::new(2));

        bin.fill(&adapter, 0..5, &mut tree).unwrap();
        bin.fill(&adapter, 0..0, &mut tree).unwrap();

        assert_eq!(bin.scrap_count(0), 2);
        assert_eq!(adapter.attached_view_count(), 2);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_rows_attach_to_parent() {
        let adapter = adapter(4);
        let mut tree = ViewTree::new();
        let list = tree.create(ViewKind::Group, None);
        let mut bin = RecycleBin::new().with_parent(list);

        let views = bin.fill(&adapter, 0..2, &mut tree).unwrap();
        assert_eq!(tree.children(list).unwrap(), views.as_slice());

        let views = bin.fill(&adapter, 2..4, &mut tree).unwrap();
        assert_eq!(tree.children(list).unwrap(), views.as_slice());
    }

    /// Fails to bind any item above 9.
    struct SmallOnly;

    impl AdapterDelegate<u32> for SmallOnly {
        fn convert(&self, row: &mut RowBinder<'_>, _position: usize, item: &u32) -> Result<()> {
            if *item > 9 {
                row.view_id(ViewIdent(99))?;
            }
            row.set_text(TITLE, item.to_string())?;
            Ok(())
        }
    }

    #[test]
    fn test_failed_fill_keeps_scrap() {
        let registry = LayoutRegistry::new().with_layout(
            ROW,
            LayoutTemplate::group().with_child(LayoutTemplate::text(TITLE, "")),
        );
        let adapter =
            CommonAdapter::new(vec![1u32, 42], Arc::new(registry), vec![ROW], SmallOnly).unwrap();
        let mut tree = ViewTree::new();
        let mut bin = RecycleBin::new();

        let first = bin.fill(&adapter, 0..1, &mut tree).unwrap();
        assert!(bin.fill(&adapter, 1..2, &mut tree).is_err());

        assert!(bin.active_rows().is_empty());
        assert_eq!(bin.scrap_count(0), 1);
        assert_eq!(adapter.attached_view_count(), 1);

        let again = bin.fill(&adapter, 0..1, &mut tree).unwrap();
        assert_eq!(again, first);

        bin.clear(&adapter, &mut tree).unwrap();
        assert!(tree.is_empty());
        assert_eq!(adapter.attached_view_count(), 0);
    }

    #[test]
    fn test_clear_destroys_everything() {
        let adapter = adapter(4);
        let mut tree = ViewTree::new();
        let mut bin = RecycleBin::new();

        bin.fill(&adapter, 0..4, &mut tree).unwrap();
        bin.clear(&adapter, &mut tree).unwrap();

        assert!(tree.is_empty());
        assert_eq!(adapter.attached_view_count(), 0);
        assert!(bin.active_rows().is_empty());
    }
}
