//! A list of image rows bound through an `ImageBinder`.
//!
//! Run with `RUST_LOG=horizon_recycler=trace` to see inflation and reuse.

use horizon_recycler::prelude::*;
use horizon_recycler_core::{TreeFormatOptions, ViewTreeDebug};
use tracing_subscriber::EnvFilter;

const PHOTO_ROW: LayoutId = LayoutId(1);
const PHOTO: ViewIdent = ViewIdent(1);
const CAPTION: ViewIdent = ViewIdent(2);

struct Photos<B> {
    images: B,
}

impl<B> AdapterDelegate<String> for Photos<B>
where
    B: ImageBinder + Send + Sync,
{
    fn convert(&self, row: &mut RowBinder<'_>, position: usize, url: &String) -> Result<()> {
        row.bind_image(PHOTO, url, &self.images)?
            .set_text(CAPTION, format!("#{position}"))?
            .set_on_click_listener(PHOTO, move |_| println!("clicked photo {position}"))?;
        Ok(())
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let layouts = LayoutRegistry::new().with_layout(
        PHOTO_ROW,
        LayoutTemplate::group()
            .with_child(LayoutTemplate::image(PHOTO))
            .with_child(LayoutTemplate::text(CAPTION, "")),
    );

    let images = |_target: ViewId, image: &mut ImageView, url: &str| {
        image.set_uri(url);
    };

    let urls = (0..8)
        .map(|i| format!("https://example.com/photos/{i}.png"))
        .collect();
    let adapter = CommonAdapter::builder()
        .data(urls)
        .layout(PHOTO_ROW)
        .inflater(layouts)
        .build(Photos { images })?;

    let mut tree = ViewTree::new();
    let list = tree.create(ViewKind::Group, None);
    let mut bin = RecycleBin::with_policy(RecyclePolicy::new(3)).with_parent(list);

    bin.fill(&adapter, 0..3, &mut tree)?;
    bin.fill(&adapter, 3..6, &mut tree)?;
    println!(
        "{} rows attached, {} views in the tree",
        adapter.attached_view_count(),
        tree.len()
    );

    adapter.remove(0);
    bin.fill(&adapter, 0..3, &mut tree)?;

    let debug = ViewTreeDebug::with_options(TreeFormatOptions::detailed());
    print!("{}", debug.format_subtree(&tree, list)?);

    bin.clear(&adapter, &mut tree)?;
    Ok(())
}
