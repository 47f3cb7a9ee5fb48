//! Tests for multi-type recycling through the host harness.

use std::sync::Arc;

use horizon_recycler::prelude::*;

const EVEN: LayoutId = LayoutId(1);
const ODD: LayoutId = LayoutId(2);
const TITLE: ViewIdent = ViewIdent(1);
const STRIPE: ViewIdent = ViewIdent(2);

struct Parity;

impl AdapterDelegate<u32> for Parity {
    fn item_view_type(&self, position: usize, _item: &u32) -> usize {
        position % 2
    }

    fn convert(&self, row: &mut RowBinder<'_>, position: usize, item: &u32) -> Result<()> {
        row.set_text(TITLE, item.to_string())?;
        if position % 2 == 1 {
            row.set_background_resource(STRIPE, 7)?;
        }
        Ok(())
    }
}

fn layouts() -> LayoutRegistry {
    LayoutRegistry::new()
        .with_layout(
            EVEN,
            LayoutTemplate::group().with_child(LayoutTemplate::text(TITLE, "")),
        )
        .with_layout(
            ODD,
            LayoutTemplate::group()
                .with_child(LayoutTemplate::plain(STRIPE))
                .with_child(LayoutTemplate::text(TITLE, "")),
        )
}

fn adapter(count: u32) -> CommonAdapter<u32, Parity> {
    CommonAdapter::new((0..count).collect(), Arc::new(layouts()), vec![EVEN, ODD], Parity).unwrap()
}

fn layout_of(adapter: &CommonAdapter<u32, Parity>, view: ViewId) -> Option<LayoutId> {
    adapter.with_holder(view, ViewCache::layout_id)
}

#[test]
fn test_view_types() {
    let adapter = adapter(4);
    assert_eq!(adapter.view_type_count(), 2);
    assert_eq!(adapter.item_view_type(0).unwrap(), 0);
    assert_eq!(adapter.item_view_type(3).unwrap(), 1);
    assert_eq!(adapter.layout_id(3).unwrap(), ODD);
}

#[test]
fn test_no_cross_type_recycling() {
    let adapter = adapter(20);
    let mut tree = ViewTree::new();
    let mut bin = RecycleBin::new();

    let first = bin.fill(&adapter, 0..4, &mut tree).unwrap();
    let views_after_first = tree.len();

    // Odd start, so each slot of the second pass changes row type.
    let second = bin.fill(&adapter, 5..9, &mut tree).unwrap();

    for (offset, view) in second.iter().enumerate() {
        let position = 5 + offset;
        let expected = if position % 2 == 0 { EVEN } else { ODD };
        assert_eq!(layout_of(&adapter, *view), Some(expected));
        assert!(first.contains(view));
    }
    assert_eq!(tree.len(), views_after_first);

    for row in bin.active_rows() {
        let title = tree.find_by_ident(row.view, TITLE).unwrap();
        assert_eq!(tree.text(title).unwrap().text(), row.position.to_string());
    }
}

#[test]
fn test_recycling_respects_types_after_mutation() {
    let adapter = adapter(6);
    let mut tree = ViewTree::new();
    let mut bin = RecycleBin::new();

    bin.fill(&adapter, 0..3, &mut tree).unwrap();
    adapter.remove(0);
    let views = bin.fill(&adapter, 0..3, &mut tree).unwrap();

    assert_eq!(layout_of(&adapter, views[0]), Some(EVEN));
    assert_eq!(layout_of(&adapter, views[1]), Some(ODD));
    assert_eq!(layout_of(&adapter, views[2]), Some(EVEN));

    let title = tree.find_by_ident(views[0], TITLE).unwrap();
    assert_eq!(tree.text(title).unwrap().text(), "1");
}

#[test]
fn test_odd_rows_get_stripe() {
    let adapter = adapter(2);
    let mut tree = ViewTree::new();

    let odd = adapter.get_view(1, None, None, &mut tree).unwrap();
    let stripe = tree.find_by_ident(odd, STRIPE).unwrap();
    assert_eq!(tree.get(stripe).unwrap().background(), Some(7));

    let even = adapter.get_view(0, None, None, &mut tree).unwrap();
    assert!(tree.find_by_ident(even, STRIPE).is_none());
}
