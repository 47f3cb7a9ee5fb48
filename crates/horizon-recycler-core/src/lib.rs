//! Core systems for Horizon Recycler.
//!
//! This crate provides the foundational pieces the list adapter is built on:
//!
//! - **View Tree**: An arena of views addressed by stable [`ViewId`] handles,
//!   with parent/child structure and identifier lookup
//! - **Widgets**: The payloads a view can carry (text, image, check box)
//! - **Signal/Slot System**: Type-safe change notification
//! - **Logging**: Tracing targets and a view-tree debug formatter
//!
//! # View Tree Example
//!
//! ```
//! use horizon_recycler_core::{TextView, ViewIdent, ViewKind, ViewTree};
//!
//! let mut tree = ViewTree::new();
//! let row = tree.create(ViewKind::Group, None);
//! let title = tree.create(ViewKind::Text(TextView::default()), Some(ViewIdent(1)));
//! tree.append_child(row, title).unwrap();
//!
//! assert_eq!(tree.find_by_ident(row, ViewIdent(1)), Some(title));
//! tree.text_mut(title).unwrap().set_text("Hello");
//! ```
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_recycler_core::Signal;
//!
//! let changed = Signal::<usize>::new();
//! let conn_id = changed.connect(|count| {
//!     println!("List now holds {} rows", count);
//! });
//!
//! changed.emit(3);
//! changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod view;
pub mod widgets;

pub use error::{ViewError, ViewResult};
pub use logging::{TreeFormatOptions, TreeStyle, ViewTreeDebug};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use view::{
    ClickListener, LayoutParams, LongClickListener, Size, ViewId, ViewIdent, ViewKind, ViewNode,
    ViewTree, Visibility,
};
pub use widgets::{Bitmap, CheckBox, Color, Drawable, ImageSource, ImageView, TextView};
