//! Prelude module for Horizon Recycler.
//!
//! ```
//! use horizon_recycler::prelude::*;
//! ```
//!
//! Brings in the adapter and its delegate trait, the row binder, layouts,
//! the host harness and the view tree types row bindings touch.

// ============================================================================
// Adapter
// ============================================================================

pub use crate::adapter::{AdapterDelegate, AdapterSignals, CommonAdapter};
pub use crate::error::{Error, Result};
pub use crate::relay::{ActivityLauncher, Intent};

// ============================================================================
// Row Binding
// ============================================================================

pub use crate::binder::{ImageBinder, RowBinder};
pub use crate::holder::{ViewCache, ViewHolder};
pub use crate::layout::{LayoutId, LayoutInflater, LayoutRegistry, LayoutTemplate};

// ============================================================================
// Host
// ============================================================================

pub use crate::host::{RecycleBin, RecyclePolicy};

// ============================================================================
// View Tree
// ============================================================================

pub use horizon_recycler_core::{
    Color, ImageView, LayoutParams, Signal, Size, ViewId, ViewIdent, ViewKind, ViewTree,
    Visibility,
};
