//! Tests for adapter reuse, row binding and data mutation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_recycler::prelude::*;
use parking_lot::Mutex;

const ROW: LayoutId = LayoutId(1);
const TITLE: ViewIdent = ViewIdent(1);
const LABEL: ViewIdent = ViewIdent(2);
const SEEN: i32 = 0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Root with two groups, each holding a `LABEL` text view.
fn layouts() -> LayoutRegistry {
    LayoutRegistry::new().with_layout(
        ROW,
        LayoutTemplate::group()
            .with_child(LayoutTemplate::group().with_child(LayoutTemplate::text(LABEL, "")))
            .with_child(
                LayoutTemplate::group()
                    .with_child(LayoutTemplate::text(LABEL, ""))
                    .with_child(LayoutTemplate::text(TITLE, "")),
            ),
    )
}

/// Writes the item into the left and right labels, and records the first
/// position each holder was bound to.
#[derive(Default)]
struct Labels {
    lookups: Mutex<Vec<ViewId>>,
}

impl AdapterDelegate<String> for Labels {
    fn convert(&self, row: &mut RowBinder<'_>, position: usize, item: &String) -> Result<()> {
        if row.tag(SEEN).is_none() {
            row.put_tag(SEEN, position);
        }

        row.set_find_view_at(-1)?;
        let title = row.view_id(TITLE)?;
        self.lookups.lock().push(title);

        row.set_find_view_at(0)?
            .set_text(LABEL, format!("left {item}"))?
            .set_find_view_at(1)?
            .set_text(LABEL, format!("right {item}"))?
            .set_find_view_at(-1)?
            .set_text(TITLE, item.as_str())?;
        Ok(())
    }
}

fn adapter(items: &[&str]) -> CommonAdapter<String, Labels> {
    CommonAdapter::builder()
        .data(items.iter().map(|s| s.to_string()).collect())
        .layout(ROW)
        .inflater(layouts())
        .build(Labels::default())
        .unwrap()
}

fn text_under(tree: &ViewTree, row: ViewId, child: usize, ident: ViewIdent) -> String {
    let group = tree.children(row).unwrap()[child];
    let view = tree.find_by_ident(group, ident).unwrap();
    tree.text(view).unwrap().text().to_string()
}

#[test]
fn test_recycled_row_keeps_its_holder() {
    init_tracing();
    let adapter = adapter(&["a", "b"]);
    let mut tree = ViewTree::new();

    let row = adapter.get_view(0, None, None, &mut tree).unwrap();
    let holder = adapter.with_holder(row, ViewCache::instance_id).unwrap();

    let reused = adapter.get_view(1, Some(row), None, &mut tree).unwrap();
    assert_eq!(reused, row);
    assert_eq!(adapter.with_holder(row, ViewCache::instance_id), Some(holder));
    assert_eq!(adapter.attached_view_count(), 1);
}

#[test]
fn test_lookup_is_stable_across_binds() {
    let adapter = adapter(&["a", "b", "c"]);
    let mut tree = ViewTree::new();

    let row = adapter.get_view(0, None, None, &mut tree).unwrap();
    adapter.get_view(1, Some(row), None, &mut tree).unwrap();
    adapter.get_view(2, Some(row), None, &mut tree).unwrap();

    let lookups = adapter.delegate().lookups.lock();
    assert_eq!(lookups.len(), 3);
    assert!(lookups.iter().all(|&id| id == lookups[0]));

    // TITLE, LABEL under child 0, LABEL under child 1.
    assert_eq!(adapter.with_holder(row, ViewCache::search_count), Some(3));
}

#[test]
fn test_anchor_scopes_lookups() {
    let adapter = adapter(&["a"]);
    let mut tree = ViewTree::new();

    let row = adapter.get_view(0, None, None, &mut tree).unwrap();
    assert_eq!(text_under(&tree, row, 0, LABEL), "left a");
    assert_eq!(text_under(&tree, row, 1, LABEL), "right a");
    assert_eq!(text_under(&tree, row, 1, TITLE), "a");
}

#[test]
fn test_tags_are_isolated_and_persist() {
    let adapter = adapter(&["a", "b", "c"]);
    let mut tree = ViewTree::new();

    let first = adapter.get_view(0, None, None, &mut tree).unwrap();
    let second = adapter.get_view(1, None, None, &mut tree).unwrap();
    adapter.get_view(2, Some(first), None, &mut tree).unwrap();
    adapter.get_view(0, Some(second), None, &mut tree).unwrap();

    let seen = |view| adapter.with_holder(view, |h| h.tag_as::<usize>(SEEN).copied()).flatten();
    assert_eq!(seen(first), Some(0));
    assert_eq!(seen(second), Some(1));
}

#[test]
fn test_remove_item_scenario() {
    let adapter = adapter(&["a", "b"]);
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = notifications.clone();
    adapter.signals().data_set_changed.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(adapter.remove_item(&"a".to_string()));

    assert_eq!(adapter.count(), 1);
    assert_eq!(adapter.item(0).as_deref(), Some("b"));
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[test]
fn test_mutation_then_refresh_rebinds() {
    let adapter = adapter(&["a"]);
    let mut tree = ViewTree::new();
    let row = adapter.get_view(0, None, None, &mut tree).unwrap();

    let refreshes = Arc::new(Mutex::new(Vec::new()));
    let log = refreshes.clone();
    adapter.signals().data_set_changed.connect(move |_| log.lock().push(()));

    adapter.insert(0, "z".to_string());
    assert_eq!(refreshes.lock().len(), 1);
    assert_eq!(adapter.count(), 2);

    adapter.get_view(0, Some(row), None, &mut tree).unwrap();
    assert_eq!(text_under(&tree, row, 1, TITLE), "z");
}

#[test]
fn test_invalidated_is_separate() {
    let adapter = adapter(&["a"]);
    let changed = Arc::new(AtomicUsize::new(0));
    let invalidated = Arc::new(AtomicUsize::new(0));

    let c = changed.clone();
    adapter.signals().data_set_changed.connect(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let i = invalidated.clone();
    adapter.signals().data_set_invalidated.connect(move |_| {
        i.fetch_add(1, Ordering::SeqCst);
    });

    adapter.notify_data_set_invalidated();
    assert_eq!(changed.load(Ordering::SeqCst), 0);
    assert_eq!(invalidated.load(Ordering::SeqCst), 1);
}
