//! Storage layer
//!
//! Flat-file persistence for entries: one `<title>.md` file per entry in a
//! single directory, no subdirectories, no metadata beyond the file itself.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{is_storable_title, EntryStore, StorageStats, ENTRY_EXTENSION};
