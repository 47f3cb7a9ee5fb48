//! Error types for adapters and row binding.

use horizon_recycler_core::{ViewError, ViewId, ViewIdent};

use crate::layout::LayoutId;

/// Result type alias for adapter and binder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building adapters or binding rows.
///
/// Every variant is a caller or configuration defect. Nothing here is
/// retried; errors propagate to the call site that triggered them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The adapter was configured without any layout.
    #[error("Invalid adapter configuration: {0}")]
    Configuration(String),

    /// No view with the identifier exists below the current find anchor.
    #[error("No view with identifier {ident} below anchor {anchor:?}")]
    ViewNotFound { ident: ViewIdent, anchor: ViewId },

    /// The find anchor index is past the row root's children.
    #[error("Invalid anchor index {index}: row root has {child_count} children")]
    InvalidAnchor { index: usize, child_count: usize },

    /// The resolved view is not the widget the accessor expects.
    #[error("View {ident} is a {actual}, not a {expected}")]
    TypeMismatch {
        ident: ViewIdent,
        expected: &'static str,
        actual: &'static str,
    },

    /// The inflater has no template for the layout.
    #[error("Unknown layout {0:?}")]
    UnknownLayout(LayoutId),

    /// The requested position is past the end of the data.
    #[error("Position {position} out of range for {count} items")]
    PositionOutOfRange { position: usize, count: usize },

    /// The row classifier returned a view type with no layout.
    #[error("View type {view_type} out of range for {count} layouts")]
    ViewTypeOutOfRange { view_type: usize, count: usize },

    /// A recycled view was never produced by this adapter.
    #[error("View {0:?} has no view holder attached")]
    ViewNotAttached(ViewId),

    /// View tree error.
    #[error(transparent)]
    View(#[from] ViewError),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Re-label a tree-level type mismatch with the identifier the caller used.
    pub(crate) fn from_lookup(ident: ViewIdent, err: ViewError) -> Self {
        match err {
            ViewError::TypeMismatch {
                expected, actual, ..
            } => Self::TypeMismatch {
                ident,
                expected,
                actual,
            },
            other => Self::View(other),
        }
    }
}
