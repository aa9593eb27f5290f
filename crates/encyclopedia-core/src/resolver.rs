//! Query resolution
//!
//! Turns a free-text query plus the current title list into one of three
//! outcomes:
//!
//! - empty query: nothing to look up
//! - exact match: the query equals a title, ignoring case
//! - search results: every title containing the query, ignoring case
//!
//! Comparison keys are Unicode lower-case folds. Titles are never modified:
//! results always carry the stored casing so the caller can address the
//! right file.

use std::collections::HashMap;

use serde::Serialize;

/// Outcome of resolving a query against the title list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "titles", rename_all = "snake_case")]
pub enum Resolution {
    /// No query was supplied
    EmptyQuery,
    /// The query names this entry
    ExactMatch(String),
    /// Titles containing the query, in title-list order; may be empty
    SearchResults(Vec<String>),
}

/// Case-insensitive comparison key
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Resolve `query` against `titles`
///
/// Exact matches win outright: a query equal to one title never falls
/// through to the substring list, even if it is contained in other titles.
pub fn resolve<S: AsRef<str>>(query: Option<&str>, titles: &[S]) -> Resolution {
    let query = match query {
        Some(q) if !q.is_empty() => q,
        _ => return Resolution::EmptyQuery,
    };

    if let Some(title) = TitleIndex::build(titles).canonical(query) {
        return Resolution::ExactMatch(title.to_string());
    }

    let key = normalize(query);
    let matches = titles
        .iter()
        .filter(|title| normalize(title.as_ref()).contains(&key))
        .map(|title| title.as_ref().to_string())
        .collect();

    Resolution::SearchResults(matches)
}

/// Titles that share a comparison key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub key: String,
    /// Stored titles in list order; the first one wins lookups
    pub titles: Vec<String>,
}

/// Transient index from comparison key to stored title
///
/// Built from a title list at query time. When two stored titles normalize
/// to the same key the first in list order is canonical and the group is
/// reported by [`TitleIndex::collisions`].
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    groups: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl TitleIndex {
    pub fn build<S: AsRef<str>>(titles: &[S]) -> Self {
        let mut index = Self::default();

        for title in titles {
            let title: &str = title.as_ref();
            let key = normalize(title);
            match index.positions.get(&key) {
                Some(&pos) => index.groups[pos].1.push(title.to_string()),
                None => {
                    index.positions.insert(key.clone(), index.groups.len());
                    index.groups.push((key, vec![title.to_string()]));
                }
            }
        }

        index
    }

    /// Stored title matching `title` ignoring case
    pub fn canonical(&self, title: &str) -> Option<&str> {
        self.positions
            .get(&normalize(title))
            .and_then(|&pos| self.groups[pos].1.first())
            .map(String::as_str)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.canonical(title).is_some()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keys shared by more than one stored title
    pub fn collisions(&self) -> Vec<Collision> {
        self.groups
            .iter()
            .filter(|(_, titles)| titles.len() > 1)
            .map(|(key, titles)| Collision {
                key: key.clone(),
                titles: titles.clone(),
            })
            .collect()
    }
}
