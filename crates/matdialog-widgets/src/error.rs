#![forbid(unsafe_code)]

//! Errors raised by dialog setters and dispatch.
//!
//! Every error here is a caller mistake detected synchronously at the
//! offending call. Absent content (empty title, no rows, no icon) is never an
//! error; it only hides the matching region.

use std::convert::Infallible;

use matdialog_i18n::ResourceId;

/// Coarse classification of a [`DialogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed an argument outside its documented domain.
    InvalidArgument,
    /// A resource id did not resolve.
    NotFound,
}

/// Errors from dialog operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    /// A raw button identifier was not one of the three slot ids.
    #[error("button id {0} is not BUTTON_POSITIVE (-1), BUTTON_NEGATIVE (-2) or BUTTON_NEUTRAL (-3)")]
    InvalidButtonSlot(i32),
    /// Multi-choice initial state does not cover exactly the declared rows.
    #[error("checked items length {actual} does not match row count {expected}")]
    CheckedItemsLength { expected: usize, actual: usize },
    /// Single-choice initial selection is not a row index.
    #[error("initial selection {index} is outside a list of {len} rows")]
    SelectionOutOfRange { index: usize, len: usize },
    /// A row click targeted a row that does not exist.
    #[error("row {index} is outside a list of {len} rows")]
    RowOutOfRange { index: usize, len: usize },
    /// A resource-id setter referenced an unknown resource.
    #[error("resource {0} not found")]
    ResourceNotFound(ResourceId),
}

impl DialogError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ResourceNotFound(_) => ErrorKind::NotFound,
            Self::InvalidButtonSlot(_)
            | Self::CheckedItemsLength { .. }
            | Self::SelectionOutOfRange { .. }
            | Self::RowOutOfRange { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Whether this is an `InvalidArgument`-kind error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument)
    }
}

impl From<Infallible> for DialogError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
