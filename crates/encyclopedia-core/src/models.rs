//! Data models for Encyclopedia
//!
//! An entry is nothing more than a title and its Markdown content; the file
//! on disk carries no other metadata.

use serde::{Deserialize, Serialize};

/// A stored wiki entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Title, exactly as stored
    pub title: String,
    /// Raw Markdown
    pub content: String,
}

impl Entry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// User-supplied title and content that has not been validated yet
///
/// See [`EntryDraft::validate`](crate::validation) for the rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<Entry> for EntryDraft {
    fn from(entry: Entry) -> Self {
        Self {
            title: entry.title,
            content: entry.content,
        }
    }
}
