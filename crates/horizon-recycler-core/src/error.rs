//! Error types for the view tree.

use std::fmt;

use crate::view::ViewId;

/// Errors that can occur during view tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The view ID is invalid or the view has been removed.
    InvalidViewId(ViewId),
    /// Attempted to attach a view under itself or one of its descendants.
    CircularParentage,
    /// The view is already attached to a parent.
    AlreadyAttached(ViewId),
    /// The view's payload is not the kind the accessor expects.
    TypeMismatch {
        /// The view that was accessed.
        view: ViewId,
        /// The kind the accessor expected.
        expected: &'static str,
        /// The kind the view actually carries.
        actual: &'static str,
    },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewId(id) => write!(f, "Invalid or removed view ID {id:?}"),
            Self::CircularParentage => {
                write!(f, "Cannot attach a view under itself or one of its descendants")
            }
            Self::AlreadyAttached(id) => write!(f, "View {id:?} already has a parent"),
            Self::TypeMismatch {
                view,
                expected,
                actual,
            } => {
                write!(f, "View {view:?} is a {actual}, not a {expected}")
            }
        }
    }
}

impl std::error::Error for ViewError {}

/// Result type for view tree operations.
pub type ViewResult<T> = std::result::Result<T, ViewError>;
