//! Recycling list adapter.
//!
//! [`CommonAdapter<T, D>`] sits between a host list widget and a list of
//! items. For every row the host wants to show it either inflates a new row
//! view or reuses one the host hands back, then lets the caller's
//! [`AdapterDelegate`] fill it in through a [`RowBinder`].
//!
//! # Reuse
//!
//! Each row view the adapter inflates gets exactly one [`ViewCache`], kept in
//! a side table keyed by the row's [`ViewId`]. When the host passes that view
//! back as `convert_view`, the same cache is retrieved, so child lookups made
//! on earlier passes stay valid without inflating again. Hosts that drop a
//! row view for good should call [`CommonAdapter::discard_view`]; otherwise the
//! side table is bounded by the host's recycling pool.
//!
//! # Mutation
//!
//! The mutators (`add`, `insert`, `remove`, `sort`, ...) are serialized with
//! one another and each emits exactly one
//! [`data_set_changed`](AdapterSignals::data_set_changed) notification. They
//! are not serialized against a refresh pass as a whole: a host that reads
//! `count()` and then calls `get_view` while another thread mutates can see
//! the list change between the two calls.
//!
//! # Example
//!
//! ```
//! use horizon_recycler::prelude::*;
//!
//! const ITEM: LayoutId = LayoutId(1);
//! const TITLE: ViewIdent = ViewIdent(1);
//!
//! struct Titles;
//!
//! impl AdapterDelegate<String> for Titles {
//!     fn convert(&self, row: &mut RowBinder<'_>, _position: usize, item: &String) -> Result<()> {
//!         row.set_text(TITLE, item.as_str())?;
//!         Ok(())
//!     }
//! }
//!
//! let registry = LayoutRegistry::new()
//!     .with_layout(ITEM, LayoutTemplate::group().with_child(LayoutTemplate::text(TITLE, "")));
//!
//! let adapter = CommonAdapter::builder()
//!     .data(vec!["a".to_string(), "b".to_string()])
//!     .layout(ITEM)
//!     .inflater(registry)
//!     .build(Titles)
//!     .unwrap();
//!
//! let mut tree = ViewTree::new();
//! let row = adapter.get_view(0, None, None, &mut tree).unwrap();
//! let again = adapter.get_view(1, Some(row), None, &mut tree).unwrap();
//! assert_eq!(row, again);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use horizon_recycler_core::logging::targets;
use horizon_recycler_core::{Signal, ViewId, ViewTree};
use parking_lot::{Mutex, ReentrantMutex, RwLock, RwLockReadGuard};

use crate::binder::RowBinder;
use crate::error::{Error, Result};
use crate::holder::ViewCache;
use crate::layout::{LayoutId, LayoutInflater};
use crate::relay::{ActivityLauncher, Intent};

/// Caller-supplied behavior of an adapter.
///
/// Only [`convert`](Self::convert) is required. Lists with several row
/// layouts also override [`item_view_type`](Self::item_view_type).
pub trait AdapterDelegate<T>: Send + Sync {
    /// The row type of `item`, an index into the adapter's layout list.
    ///
    /// Must be below the number of layouts the adapter was built with.
    fn item_view_type(&self, _position: usize, _item: &T) -> usize {
        0
    }

    /// Fill the row for `item`.
    ///
    /// Called once per materialized or reused row per refresh pass. The row
    /// may have shown a different item before, so every child the binding
    /// touches conditionally should be reset explicitly. Must not mutate the
    /// adapter it is called from.
    fn convert(&self, row: &mut RowBinder<'_>, position: usize, item: &T) -> Result<()>;

    /// Receives the result of a launch started with
    /// [`CommonAdapter::start_activity_for_result`]. Does nothing by default.
    fn on_activity_result(&self, _request_code: i32, _result_code: i32, _data: Option<&Intent>) {}
}

/// Notifications emitted by an adapter.
pub struct AdapterSignals {
    /// The data changed; the host should re-query counts and rebind its rows.
    pub data_set_changed: Signal<()>,

    /// The data is no longer valid; the host should drop its rows.
    pub data_set_invalidated: Signal<()>,
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSignals {
    pub fn new() -> Self {
        Self {
            data_set_changed: Signal::new(),
            data_set_invalidated: Signal::new(),
        }
    }
}

/// A list adapter that recycles row views and caches their child lookups.
///
/// See the [module documentation](self) for the reuse and mutation rules.
pub struct CommonAdapter<T, D> {
    data: RwLock<Vec<T>>,
    mutation: ReentrantMutex<()>,
    layout_ids: Box<[LayoutId]>,
    inflater: Arc<dyn LayoutInflater>,
    holders: Mutex<HashMap<ViewId, ViewCache>>,
    launcher: Option<Arc<dyn ActivityLauncher>>,
    delegate: D,
    signals: AdapterSignals,
}

impl<T> CommonAdapter<T, ()> {
    /// Start configuring an adapter.
    pub fn builder() -> CommonAdapterBuilder<T> {
        CommonAdapterBuilder::new()
    }
}

impl<T, D: AdapterDelegate<T>> CommonAdapter<T, D> {
    /// Create an adapter over `data` using `layout_ids` as the row layouts.
    ///
    /// Fails with [`Error::Configuration`] if `layout_ids` is empty.
    pub fn new(
        data: Vec<T>,
        inflater: Arc<dyn LayoutInflater>,
        layout_ids: impl Into<Vec<LayoutId>>,
        delegate: D,
    ) -> Result<Self> {
        let layout_ids = layout_ids.into();
        if layout_ids.is_empty() {
            return Err(Error::configuration("at least one row layout is required"));
        }

        Ok(Self {
            data: RwLock::new(data),
            mutation: ReentrantMutex::new(()),
            layout_ids: layout_ids.into_boxed_slice(),
            inflater,
            holders: Mutex::new(HashMap::new()),
            launcher: None,
            delegate,
            signals: AdapterSignals::new(),
        })
    }

    /// The delegate that classifies and binds rows.
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Signals for host notifications.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    // -------------------------------------------------------------------------
    // Host queries
    // -------------------------------------------------------------------------

    /// Number of items, and so of rows the host should show.
    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// A copy of the item at `position`.
    pub fn item(&self, position: usize) -> Option<T>
    where
        T: Clone,
    {
        self.data.read().get(position).cloned()
    }

    /// Run `f` against the item at `position` without copying it.
    pub fn with_item<R>(&self, position: usize, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.data.read().get(position).map(f)
    }

    /// Read access to the whole list.
    pub fn data(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.data.read()
    }

    /// Stable ID of the row at `position`, which is the position itself.
    pub fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    /// Number of row types, one per layout.
    pub fn view_type_count(&self) -> usize {
        self.layout_ids.len()
    }

    /// The row layouts, indexed by row type.
    pub fn layout_ids(&self) -> &[LayoutId] {
        &self.layout_ids
    }

    /// The row type of `position`, as classified by the delegate.
    pub fn item_view_type(&self, position: usize) -> Result<usize> {
        let data = self.data.read();
        let item = data.get(position).ok_or(Error::PositionOutOfRange {
            position,
            count: data.len(),
        })?;
        self.classify(position, item)
    }

    /// The layout used for `position`.
    pub fn layout_id(&self, position: usize) -> Result<LayoutId> {
        let view_type = self.item_view_type(position)?;
        Ok(self.layout_ids[view_type])
    }

    /// Whether `position` is the first row.
    pub fn is_first(&self, position: usize) -> bool {
        position == 0
    }

    /// Whether `position` is the last row. Always `false` for an empty list.
    pub fn is_last(&self, position: usize) -> bool {
        self.count().checked_sub(1) == Some(position)
    }

    fn classify(&self, position: usize, item: &T) -> Result<usize> {
        let view_type = self.delegate.item_view_type(position, item);
        if view_type >= self.layout_ids.len() {
            return Err(Error::ViewTypeOutOfRange {
                view_type,
                count: self.layout_ids.len(),
            });
        }
        Ok(view_type)
    }

    // -------------------------------------------------------------------------
    // Row views
    // -------------------------------------------------------------------------

    /// Produce the bound row view for `position`.
    ///
    /// With no `convert_view` a new row is inflated from the position's
    /// layout. Otherwise the holder attached to `convert_view` is reused; if
    /// that view was inflated from a different layout the adapter inflates a
    /// fresh row instead of binding into the wrong one. `parent` is forwarded
    /// to the inflater and the returned view is never attached to it.
    #[tracing::instrument(skip(self, tree), target = "horizon_recycler::adapter", level = "trace")]
    pub fn get_view(
        &self,
        position: usize,
        convert_view: Option<ViewId>,
        parent: Option<ViewId>,
        tree: &mut ViewTree,
    ) -> Result<ViewId> {
        let data = self.data.read();
        let item = data.get(position).ok_or(Error::PositionOutOfRange {
            position,
            count: data.len(),
        })?;
        let layout = self.layout_ids[self.classify(position, item)?];

        let mut holders = self.holders.lock();
        let (view, inflated) =
            self.obtain_holder(&mut holders, layout, convert_view, parent, tree)?;
        let holder = holders.get_mut(&view).ok_or(Error::ViewNotAttached(view))?;

        let mut row = RowBinder::new(holder, tree);
        if let Err(err) = self.delegate.convert(&mut row, position, item) {
            // The host never sees a row whose first bind failed.
            if inflated {
                holders.remove(&view);
                if tree.contains(view) {
                    tree.remove(view)?;
                }
                tracing::debug!(
                    target: targets::ADAPTER,
                    ?view,
                    error = %err,
                    "bind failed, dropped freshly inflated row"
                );
            }
            return Err(err);
        }
        Ok(view)
    }

    /// Find or inflate the row for `layout`.
    ///
    /// Returns the row view and whether it was inflated by this call.
    fn obtain_holder(
        &self,
        holders: &mut HashMap<ViewId, ViewCache>,
        layout: LayoutId,
        convert_view: Option<ViewId>,
        parent: Option<ViewId>,
        tree: &mut ViewTree,
    ) -> Result<(ViewId, bool)> {
        let reusable = match convert_view {
            None => None,
            Some(view) => match holders.get(&view) {
                None => return Err(Error::ViewNotAttached(view)),
                Some(holder) if holder.layout_id() == layout => {
                    tracing::trace!(target: targets::ADAPTER, ?view, "reusing row view");
                    Some(view)
                }
                Some(holder) => {
                    tracing::warn!(
                        target: targets::ADAPTER,
                        ?view,
                        expected = ?layout,
                        actual = ?holder.layout_id(),
                        "recycled row has the wrong layout, inflating a new one"
                    );
                    None
                }
            },
        };

        match reusable {
            Some(view) => Ok((view, false)),
            None => {
                let root = self.inflater.inflate(layout, tree, parent)?;
                holders.insert(root, ViewCache::new(root, layout));
                tracing::debug!(
                    target: targets::ADAPTER,
                    view = ?root,
                    ?layout,
                    attached = holders.len(),
                    "inflated row view"
                );
                Ok((root, true))
            }
        }
    }

    /// Forget the holder of a row view the host will never resupply.
    ///
    /// Returns `true` if a holder was attached.
    pub fn discard_view(&self, view: ViewId) -> bool {
        let removed = self.holders.lock().remove(&view).is_some();
        if removed {
            tracing::trace!(target: targets::ADAPTER, ?view, "discarded row view");
        }
        removed
    }

    /// Number of row views with a holder attached.
    pub fn attached_view_count(&self) -> usize {
        self.holders.lock().len()
    }

    /// Inspect the holder attached to `view`.
    pub fn with_holder<R>(&self, view: ViewId, f: impl FnOnce(&ViewCache) -> R) -> Option<R> {
        self.holders.lock().get(&view).map(f)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    fn mutate<R>(&self, op: &'static str, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let _serial = self.mutation.lock();
        let result = {
            let mut data = self.data.write();
            let result = f(&mut data);
            tracing::debug!(target: targets::MUTATION, op, count = data.len(), "data set mutated");
            result
        };
        self.signals.data_set_changed.emit(());
        result
    }

    /// Append an item.
    pub fn add(&self, item: T) {
        self.mutate("add", |data| data.push(item));
    }

    /// Append every item of `items`.
    pub fn add_all(&self, items: impl IntoIterator<Item = T>) {
        self.mutate("add_all", |data| data.extend(items));
    }

    /// Insert an item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > count()`.
    pub fn insert(&self, index: usize, item: T) {
        self.mutate("insert", |data| data.insert(index, item));
    }

    /// Remove and return the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn remove(&self, index: usize) -> T {
        self.mutate("remove", |data| data.remove(index))
    }

    /// Remove the first item equal to `item`.
    ///
    /// Notifies even when nothing matched. Returns whether an item was removed.
    pub fn remove_item(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.mutate("remove_item", |data| {
            match data.iter().position(|candidate| candidate == item) {
                Some(index) => {
                    data.remove(index);
                    true
                }
                None => false,
            }
        })
    }

    /// Remove every item.
    pub fn clear(&self) {
        self.mutate("clear", Vec::clear);
    }

    /// Sort by the items' natural order.
    pub fn sort(&self)
    where
        T: Ord,
    {
        self.mutate("sort", |data| data.sort());
    }

    /// Sort with `compare`. The sort is stable.
    pub fn sort_by<F>(&self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.mutate("sort_by", |data| data.sort_by(compare));
    }

    /// Reverse the order of the items.
    pub fn reverse(&self) {
        self.mutate("reverse", |data| data.reverse());
    }

    /// Replace the whole list without notifying.
    ///
    /// Follow with [`notify_data_set_changed`](Self::notify_data_set_changed)
    /// once the host should see the new data.
    pub fn set_data(&self, data: Vec<T>) {
        let _serial = self.mutation.lock();
        *self.data.write() = data;
    }

    /// Tell the host the data changed.
    pub fn notify_data_set_changed(&self) {
        self.signals.data_set_changed.emit(());
    }

    /// Tell the host the data is no longer valid.
    pub fn notify_data_set_invalidated(&self) {
        self.signals.data_set_invalidated.emit(());
    }

    // -------------------------------------------------------------------------
    // Result relay
    // -------------------------------------------------------------------------

    /// Ask the hosting screen to start `intent` and report back with
    /// `request_code`.
    ///
    /// Returns `false` when the adapter has no launcher to forward to.
    pub fn start_activity_for_result(&self, intent: Intent, request_code: i32) -> bool {
        match &self.launcher {
            Some(launcher) => {
                launcher.start_activity_for_result(intent, request_code);
                true
            }
            None => {
                tracing::debug!(
                    target: targets::ADAPTER,
                    request_code,
                    "no activity launcher configured, dropping request"
                );
                false
            }
        }
    }

    /// Hand a launch result to the delegate.
    pub fn on_activity_result(&self, request_code: i32, result_code: i32, data: Option<&Intent>) {
        self.delegate
            .on_activity_result(request_code, result_code, data);
    }
}

/// Builder for [`CommonAdapter`].
pub struct CommonAdapterBuilder<T> {
    data: Vec<T>,
    layout_ids: Vec<LayoutId>,
    inflater: Option<Arc<dyn LayoutInflater>>,
    launcher: Option<Arc<dyn ActivityLauncher>>,
}

impl<T> Default for CommonAdapterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CommonAdapterBuilder<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            layout_ids: Vec::new(),
            inflater: None,
            launcher: None,
        }
    }

    /// The initial items.
    pub fn data(mut self, data: Vec<T>) -> Self {
        self.data = data;
        self
    }

    /// Add a row layout. Its row type is the number of layouts added before it.
    pub fn layout(mut self, id: LayoutId) -> Self {
        self.layout_ids.push(id);
        self
    }

    /// Add several row layouts in row-type order.
    pub fn layouts(mut self, ids: impl IntoIterator<Item = LayoutId>) -> Self {
        self.layout_ids.extend(ids);
        self
    }

    /// The inflater used to build rows.
    pub fn inflater(self, inflater: impl LayoutInflater + 'static) -> Self {
        self.shared_inflater(Arc::new(inflater))
    }

    /// Use an inflater shared with other adapters.
    pub fn shared_inflater(mut self, inflater: Arc<dyn LayoutInflater>) -> Self {
        self.inflater = Some(inflater);
        self
    }

    /// The screen result-bearing launches are forwarded to.
    pub fn launcher(mut self, launcher: Arc<dyn ActivityLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Build the adapter.
    ///
    /// Fails with [`Error::Configuration`] when no inflater or no layout was set.
    pub fn build<D: AdapterDelegate<T>>(self, delegate: D) -> Result<CommonAdapter<T, D>> {
        let inflater = self
            .inflater
            .ok_or_else(|| Error::configuration("no layout inflater set"))?;
        let mut adapter = CommonAdapter::new(self.data, inflater, self.layout_ids, delegate)?;
        adapter.launcher = self.launcher;
        Ok(adapter)
    }
}
