//! Unified entry interface
//!
//! The `Store` is what the web server and the CLI talk to. It combines:
//! - `EntryStore` (flat-file persistence, exact titles)
//! - the resolver (case-insensitive lookup and search)
//! - draft validation and case-insensitive uniqueness on create/update
//!
//! Nothing is cached. Every call re-reads the entries directory, so the
//! store is cheap to clone and safe to share between request handlers.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open()?;
//!
//! store.create(EntryDraft::new("Rust", "# Rust"))?;
//! let entry = store.find("rust")?;          // Some(Entry { title: "Rust", .. })
//! let outcome = store.resolve(Some("us"))?; // SearchResults(["Rust"])
//! ```

use anyhow::Context;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{EntryError, EntryResult};
use crate::models::{Entry, EntryDraft};
use crate::random::pick_random;
use crate::resolver::{self, Collision, Resolution, TitleIndex};
use crate::storage::{EntryStore, StorageError, StorageStats};
use crate::validation::validate_content;

/// Unified entry interface for Encyclopedia
#[derive(Debug, Clone)]
pub struct Store {
    entries: EntryStore,
    config: Config,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config).context("Failed to open entries directory")
    }

    /// Open the store with a specific configuration
    ///
    /// Creates the entries directory if it does not exist yet.
    pub fn open_with_config(config: Config) -> EntryResult<Self> {
        let entries = EntryStore::from_config(&config);
        if !entries.dir().exists() {
            std::fs::create_dir_all(entries.dir()).map_err(|source| {
                StorageError::CreateDirectory {
                    path: entries.dir().to_path_buf(),
                    source,
                }
            })?;
            info!("Created entries directory {:?}", entries.dir());
        }

        Ok(Self { entries, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the underlying flat-file store
    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    // ==================== Reads ====================

    /// All entry titles
    pub fn list_titles(&self) -> EntryResult<Vec<String>> {
        Ok(self.entries.list_titles()?)
    }

    /// Content stored under exactly `title`
    pub fn get_content(&self, title: &str) -> EntryResult<Option<String>> {
        Ok(self.entries.get_content(title)?)
    }

    /// Entry stored under exactly `title`, or `NotFound`
    pub fn get(&self, title: &str) -> EntryResult<Entry> {
        self.get_content(title)?
            .map(|content| Entry::new(title, content))
            .ok_or_else(|| EntryError::not_found(title))
    }

    /// Entry for `title`, falling back to a case-insensitive match
    ///
    /// The returned entry carries the stored title, which may differ in case
    /// from the one asked for.
    pub fn find(&self, title: &str) -> EntryResult<Option<Entry>> {
        if let Some(content) = self.get_content(title)? {
            return Ok(Some(Entry::new(title, content)));
        }

        let titles = self.list_titles()?;
        let Some(canonical) = TitleIndex::build(&titles).canonical(title).map(str::to_string)
        else {
            debug!("No entry for {:?}", title);
            return Ok(None);
        };

        Ok(self
            .get_content(&canonical)?
            .map(|content| Entry::new(canonical, content)))
    }

    /// Resolve a search query against the current titles
    pub fn resolve(&self, query: Option<&str>) -> EntryResult<Resolution> {
        let titles = self.list_titles()?;
        let resolution = resolver::resolve(query, &titles);
        debug!("Resolved {:?} to {:?}", query, resolution);
        Ok(resolution)
    }

    /// A random entry title
    pub fn random_title(&self) -> EntryResult<String> {
        self.random_title_with(&mut rand::thread_rng())
    }

    /// A random entry title drawn from `rng`
    pub fn random_title_with<R: Rng + ?Sized>(&self, rng: &mut R) -> EntryResult<String> {
        let titles = self.list_titles()?;
        pick_random(&titles, rng).map(str::to_string)
    }

    // ==================== Writes ====================

    /// Write `content` under exactly `title`
    ///
    /// No validation and no case-insensitive checks: a title differing only
    /// in case from an existing entry produces a second file. Prefer
    /// [`Store::create`] and [`Store::update`] for user input.
    pub fn save(&self, title: &str, content: &str) -> EntryResult<()> {
        Ok(self.entries.save(title, content)?)
    }

    /// Create a new entry from a draft
    ///
    /// Fails with `AlreadyExists` (naming the stored title) if any entry
    /// already has this title ignoring case.
    pub fn create(&self, draft: EntryDraft) -> EntryResult<Entry> {
        let draft = draft.validate()?;

        let titles = self.list_titles()?;
        if let Some(existing) = TitleIndex::build(&titles).canonical(&draft.title) {
            return Err(EntryError::AlreadyExists {
                existing: existing.to_string(),
            });
        }

        self.entries.save(&draft.title, &draft.content)?;
        info!("Created entry {:?}", draft.title);
        Ok(Entry::new(draft.title, draft.content))
    }

    /// Replace the content of an existing entry
    ///
    /// `title` may differ in case from the stored title; the write always
    /// goes to the stored one so no case-variant duplicate is created.
    /// A title with no stored entry is `NotFound` before content is checked.
    pub fn update(&self, title: &str, content: &str) -> EntryResult<Entry> {
        let title = title.trim();
        let titles = self.list_titles()?;
        let canonical = match titles.iter().find(|t| *t == title) {
            Some(exact) => exact.clone(),
            None => TitleIndex::build(&titles)
                .canonical(title)
                .map(str::to_string)
                .ok_or_else(|| EntryError::not_found(title))?,
        };

        let content = validate_content(content)?;

        self.entries.save(&canonical, &content)?;
        info!("Updated entry {:?}", canonical);
        Ok(Entry::new(canonical, content))
    }

    // ==================== Stats ====================

    /// Entry count and size on disk
    pub fn stats(&self) -> EntryResult<StorageStats> {
        Ok(self.entries.stats()?)
    }

    /// Groups of stored titles that differ only in case
    pub fn collisions(&self) -> EntryResult<Vec<Collision>> {
        let titles = self.list_titles()?;
        let collisions = TitleIndex::build(&titles).collisions();
        for collision in &collisions {
            warn!(
                "Titles {:?} differ only in case; lookups use {:?}",
                collision.titles, collision.titles[0]
            );
        }
        Ok(collisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            entries_dir: temp_dir.path().join("entries"),
            ..Config::default()
        }
    }

    fn test_store(temp_dir: &TempDir) -> Store {
        Store::open_with_config(test_config(temp_dir)).unwrap()
    }

    #[test]
    fn test_open_creates_entries_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let store = Store::open_with_config(config.clone()).unwrap();

        assert!(config.entries_dir.is_dir());
        assert_eq!(store.config().entries_dir, config.entries_dir);
        assert!(store.list_titles().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.save("Ruby", "# Ruby\nA language.").unwrap();

        assert_eq!(
            store.get_content("Ruby").unwrap().as_deref(),
            Some("# Ruby\nA language.")
        );
        assert_eq!(store.get("Ruby").unwrap(), Entry::new("Ruby", "# Ruby\nA language."));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(store.get_content("Ghost").unwrap().is_none());
        assert!(matches!(
            store.get("Ghost"),
            Err(EntryError::NotFound { title }) if title == "Ghost"
        ));
    }

    #[test]
    fn test_find_falls_back_to_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save("Python", "snake").unwrap();

        let entry = store.find("python").unwrap().unwrap();
        assert_eq!(entry.title, "Python");
        assert_eq!(entry.content, "snake");

        assert!(store.find("Pythons").unwrap().is_none());
    }

    #[test]
    fn test_find_prefers_exact_title() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save("Rust", "upper").unwrap();
        store.save("rust", "lower").unwrap();

        assert_eq!(store.find("rust").unwrap().unwrap().content, "lower");
        assert_eq!(store.find("Rust").unwrap().unwrap().content, "upper");
    }

    #[test]
    fn test_resolve() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        for title in ["Python", "CSS", "HTML"] {
            store.save(title, "content").unwrap();
        }

        assert_eq!(
            store.resolve(Some("ytho")).unwrap(),
            Resolution::SearchResults(vec!["Python".to_string()])
        );
        assert_eq!(
            store.resolve(Some("python")).unwrap(),
            Resolution::ExactMatch("Python".to_string())
        );
        assert_eq!(store.resolve(Some("")).unwrap(), Resolution::EmptyQuery);
        assert_eq!(store.resolve(None).unwrap(), Resolution::EmptyQuery);
        assert_eq!(
            store.resolve(Some("zz")).unwrap(),
            Resolution::SearchResults(vec![])
        );
    }

    #[test]
    fn test_random_title() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(matches!(
            store.random_title(),
            Err(EntryError::EmptyCollection)
        ));

        store.save("Only", "one").unwrap();
        assert_eq!(store.random_title().unwrap(), "Only");

        store.save("Other", "two").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let picked = store.random_title_with(&mut rng).unwrap();
        assert!(picked == "Only" || picked == "Other");
    }

    #[test]
    fn test_create() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let entry = store
            .create(EntryDraft::new(" Django ", "# Django\r\nA framework."))
            .unwrap();

        assert_eq!(entry.title, "Django");
        assert_eq!(
            store.get_content("Django").unwrap().as_deref(),
            Some("# Django\nA framework.")
        );
    }

    #[test]
    fn test_create_rejects_case_insensitive_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save("Ruby", "original").unwrap();

        let err = store.create(EntryDraft::new("ruby", "copy")).unwrap_err();
        assert!(matches!(
            err,
            EntryError::AlreadyExists { ref existing } if existing == "Ruby"
        ));

        // Nothing was written
        assert_eq!(store.list_titles().unwrap(), vec!["Ruby"]);
        assert_eq!(store.get_content("Ruby").unwrap().as_deref(), Some("original"));
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let err = store.create(EntryDraft::new("", "")).unwrap_err();
        assert!(matches!(err, EntryError::Invalid(_)));
        assert!(store.list_titles().unwrap().is_empty());
    }

    #[test]
    fn test_update_writes_to_stored_title() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save("Ruby", "old").unwrap();

        let entry = store.update("ruby", "new").unwrap();

        assert_eq!(entry.title, "Ruby");
        assert_eq!(store.list_titles().unwrap(), vec!["Ruby"]);
        assert_eq!(store.get_content("Ruby").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(matches!(
            store.update("Ghost", "boo"),
            Err(EntryError::NotFound { .. })
        ));
        assert!(store.list_titles().unwrap().is_empty());
    }

    #[test]
    fn test_update_rejects_empty_content() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save("Ruby", "old").unwrap();

        assert!(matches!(
            store.update("Ruby", "   "),
            Err(EntryError::Invalid(_))
        ));
        assert_eq!(store.get_content("Ruby").unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn test_update_unknown_title_is_not_found_before_validation() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.save("Ruby", "old").unwrap();

        for title in [".hidden", "   ", "a/b"] {
            assert!(matches!(
                store.update(title, ""),
                Err(EntryError::NotFound { .. })
            ));
        }
        assert_eq!(store.list_titles().unwrap(), vec!["Ruby"]);
    }

    #[test]
    fn test_raw_save_allows_case_variants() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.save("Rust", "a").unwrap();
        store.save("rust", "b").unwrap();

        let collisions = store.collisions().unwrap();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].titles, vec!["Rust", "rust"]);
    }

    #[test]
    fn test_stats() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.save("A", "1234").unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.total_size, 4);
    }
}
