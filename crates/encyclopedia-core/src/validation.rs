//! Draft validation
//!
//! Checks a title/content pair before it reaches the store. This is a pure
//! function of the draft: it knows nothing about HTTP forms or about which
//! entries already exist.

use std::fmt;

use thiserror::Error;

use crate::models::EntryDraft;
use crate::storage::is_storable_title;

/// Longest accepted title, in bytes
pub const MAX_TITLE_BYTES: usize = 200;

/// A single validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Title must be at most {max} bytes")]
    TitleTooLong { max: usize },

    #[error("Title cannot start with '.' or contain '/', '\\' or control characters")]
    InvalidTitle,

    #[error("Content is required")]
    EmptyContent,
}

impl ValidationError {
    /// Name of the form field this error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle
            | ValidationError::TitleTooLong { .. }
            | ValidationError::InvalidTitle => "title",
            ValidationError::EmptyContent => "content",
        }
    }
}

/// Every failure found in one draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Errors for one form field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl EntryDraft {
    /// Validate and normalize the draft
    ///
    /// The title is trimmed. Content keeps its text but CRLF line endings
    /// (what browsers submit from a textarea) become LF. Both fields are
    /// required.
    pub fn validate(&self) -> Result<EntryDraft, ValidationErrors> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(ValidationError::EmptyTitle);
        } else if title.len() > MAX_TITLE_BYTES {
            errors.push(ValidationError::TitleTooLong {
                max: MAX_TITLE_BYTES,
            });
        } else if !is_storable_title(title) || title.chars().any(char::is_control) {
            errors.push(ValidationError::InvalidTitle);
        }

        let content = normalize_content(&self.content);
        if content.trim().is_empty() {
            errors.push(ValidationError::EmptyContent);
        }

        if errors.is_empty() {
            Ok(EntryDraft {
                title: title.to_string(),
                content,
            })
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Validate and normalize content for an entry that already exists
///
/// Same content rules as [`EntryDraft::validate`], without a title.
pub fn validate_content(content: &str) -> Result<String, ValidationErrors> {
    let content = normalize_content(content);
    if content.trim().is_empty() {
        return Err(ValidationErrors(vec![ValidationError::EmptyContent]));
    }
    Ok(content)
}

fn normalize_content(content: &str) -> String {
    content.replace("\r\n", "\n")
}
