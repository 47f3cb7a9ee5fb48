//! Horizon Recycler - view recycling and data binding for list widgets.
//!
//! A host list widget asks a [`CommonAdapter`] for the row view of each
//! visible position. The adapter inflates a row from one of its layouts the
//! first time, and afterwards rebinds rows the host hands back, keeping a
//! [`ViewCache`] per row so child lookups are resolved only once. The data
//! side is a thread-safe list whose mutators each emit a single
//! `data_set_changed` notification.
//!
//! - [`layout`]: layout templates and the [`LayoutInflater`] seam
//! - [`holder`]: per-row lookup cache and tag store
//! - [`binder`]: the chainable [`RowBinder`] used inside `convert`
//! - [`adapter`]: the adapter, its delegate trait and signals
//! - [`host`]: [`RecycleBin`], a minimal host list for driving an adapter
//! - [`relay`]: result-bearing launches forwarded to the hosting screen
//!
//! # Example
//!
//! ```
//! use horizon_recycler::prelude::*;
//!
//! const ROW: LayoutId = LayoutId(1);
//! const NAME: ViewIdent = ViewIdent(1);
//! const DONE: ViewIdent = ViewIdent(2);
//!
//! struct Tasks;
//!
//! impl AdapterDelegate<(String, bool)> for Tasks {
//!     fn convert(&self, row: &mut RowBinder<'_>, _position: usize, task: &(String, bool)) -> Result<()> {
//!         row.set_text(NAME, task.0.as_str())?
//!             .set_checked(DONE, task.1)?;
//!         Ok(())
//!     }
//! }
//!
//! let layouts = LayoutRegistry::new().with_layout(
//!     ROW,
//!     LayoutTemplate::group()
//!         .with_child(LayoutTemplate::text(NAME, ""))
//!         .with_child(LayoutTemplate::check_box(DONE, "")),
//! );
//!
//! let adapter = CommonAdapter::builder()
//!     .data(vec![("write docs".to_string(), false)])
//!     .layout(ROW)
//!     .inflater(layouts)
//!     .build(Tasks)
//!     .unwrap();
//!
//! let mut tree = ViewTree::new();
//! let mut bin = RecycleBin::new();
//! let rows = bin.fill(&adapter, 0..adapter.count(), &mut tree).unwrap();
//! assert_eq!(rows.len(), 1);
//!
//! adapter.add(("ship it".to_string(), true));
//! let rows = bin.fill(&adapter, 0..adapter.count(), &mut tree).unwrap();
//! assert_eq!(rows.len(), 2);
//! ```

pub mod adapter;
pub mod binder;
mod error;
pub mod holder;
pub mod host;
pub mod layout;
pub mod prelude;
pub mod relay;

pub use adapter::{AdapterDelegate, AdapterSignals, CommonAdapter, CommonAdapterBuilder};
pub use binder::{ImageBinder, RowBinder};
pub use error::{Error, Result};
pub use holder::{Tag, ViewCache, ViewHolder};
pub use host::{ActiveRow, RecycleBin, RecyclePolicy};
pub use layout::{LayoutId, LayoutInflater, LayoutRegistry, LayoutTemplate};
pub use relay::{ActivityLauncher, Intent};

