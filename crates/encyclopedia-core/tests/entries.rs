//! End-to-end behaviour of the entry store and resolver over a real directory

use std::fs;

use encyclopedia_core::{
    Config, EntryDraft, EntryError, EntryStore, Resolution, Store, StorageError,
};
use tempfile::TempDir;

fn open_store(temp_dir: &TempDir) -> Store {
    let config = Config {
        entries_dir: temp_dir.path().join("entries"),
        ..Config::default()
    };
    Store::open_with_config(config).unwrap()
}

fn seed(store: &Store, titles: &[&str]) {
    for title in titles {
        store
            .save(title, &format!("# {}\n\nAbout {}.", title, title))
            .unwrap();
    }
}

#[test]
fn write_then_read_round_trips_exactly() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let content = "# Ruby\nA language.";
    store.save("Ruby", content).unwrap();

    assert_eq!(store.get_content("Ruby").unwrap().as_deref(), Some(content));
    // No Markdown transformation happens at the storage layer
    let on_disk = fs::read_to_string(temp_dir.path().join("entries").join("Ruby.md")).unwrap();
    assert_eq!(on_disk, content);
}

#[test]
fn entries_written_outside_the_store_are_listed() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let dir = temp_dir.path().join("entries");

    fs::write(dir.join("Git.md"), "# Git").unwrap();
    fs::write(dir.join("README"), "not an entry").unwrap();

    assert_eq!(store.list_titles().unwrap(), vec!["Git"]);
    assert_eq!(store.get_content("Git").unwrap().as_deref(), Some("# Git"));
}

#[test]
fn search_flow_matches_reference_examples() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    seed(&store, &["Python", "CSS", "HTML"]);

    assert_eq!(
        store.resolve(Some("ytho")).unwrap(),
        Resolution::SearchResults(vec!["Python".to_string()])
    );
    assert_eq!(
        store.resolve(Some("python")).unwrap(),
        Resolution::ExactMatch("Python".to_string())
    );
    assert_eq!(store.resolve(Some("")).unwrap(), Resolution::EmptyQuery);
    assert_eq!(
        store.resolve(Some("zz")).unwrap(),
        Resolution::SearchResults(vec![])
    );
}

#[test]
fn exact_match_addresses_a_readable_entry() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    seed(&store, &["Django", "Git", "GitHub"]);

    let Resolution::ExactMatch(title) = store.resolve(Some("GIT")).unwrap() else {
        panic!("expected an exact match");
    };
    assert_eq!(title, "Git");
    assert!(store.get_content(&title).unwrap().is_some());
}

#[test]
fn create_then_edit_keeps_one_file_per_entry() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    store
        .create(EntryDraft::new("Markdown", "# Markdown\nFirst draft."))
        .unwrap();
    assert!(matches!(
        store.create(EntryDraft::new("MARKDOWN", "dup")),
        Err(EntryError::AlreadyExists { .. })
    ));

    store.update("markdown", "# Markdown\nSecond draft.").unwrap();

    assert_eq!(store.list_titles().unwrap(), vec!["Markdown"]);
    assert_eq!(
        store.get_content("Markdown").unwrap().as_deref(),
        Some("# Markdown\nSecond draft.")
    );
}

#[test]
fn two_stores_over_one_directory_see_each_others_writes() {
    let temp_dir = TempDir::new().unwrap();
    let writer = open_store(&temp_dir);
    let reader = EntryStore::new(temp_dir.path().join("entries"));

    assert!(reader.list_titles().unwrap().is_empty());
    writer.save("Fresh", "content").unwrap();

    // No caching: the other handle sees the write immediately
    assert_eq!(reader.list_titles().unwrap(), vec!["Fresh"]);
}

#[test]
fn unreadable_directory_is_storage_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let dir = temp_dir.path().join("entries");

    // Replace the directory with a regular file
    fs::remove_dir_all(&dir).unwrap();
    fs::write(&dir, "not a directory").unwrap();

    let err = store.list_titles().unwrap_err();
    assert!(err.is_storage_failure());
    assert!(matches!(
        err,
        EntryError::StorageUnavailable(StorageError::ListError { .. })
    ));
}
