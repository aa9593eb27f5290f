//! Entry-level errors
//!
//! `NotFound` and `EmptyCollection` are ordinary outcomes the caller branches
//! on. `StorageUnavailable` is the only hard failure.

use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Errors returned by [`Store`](crate::Store) operations
#[derive(Error, Debug)]
pub enum EntryError {
    /// No entry with this title
    #[error("Entry not found: '{title}'")]
    NotFound { title: String },

    /// Random pick over zero entries
    #[error("The encyclopedia has no entries yet")]
    EmptyCollection,

    /// Create targeted a title that already exists, ignoring case
    #[error("An entry titled '{existing}' already exists")]
    AlreadyExists { existing: String },

    /// Draft failed validation
    #[error("Invalid entry: {0}")]
    Invalid(#[from] ValidationErrors),

    /// Backing directory could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}

impl EntryError {
    pub(crate) fn not_found(title: impl Into<String>) -> Self {
        EntryError::NotFound {
            title: title.into(),
        }
    }

    /// Whether this is a hard failure rather than an expected outcome
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, EntryError::StorageUnavailable(_))
    }
}

/// Result type for entry operations
pub type EntryResult<T> = Result<T, EntryError>;
