//! Entry command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use encyclopedia_core::{EntryDraft, EntryError, Resolution, Store};

use crate::editor::edit_text;
use crate::output::Output;

/// Where new content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Inline(String),
    File(PathBuf),
    Editor,
}

impl ContentSource {
    /// From the mutually exclusive --content / --file flags
    pub fn from_args(content: Option<String>, file: Option<PathBuf>) -> Self {
        match (content, file) {
            (Some(content), _) => ContentSource::Inline(content),
            (None, Some(path)) => ContentSource::File(path),
            (None, None) => ContentSource::Editor,
        }
    }

    /// Produce the content, opening the editor on `initial` if needed
    fn read(self, initial: &str) -> Result<String> {
        match self {
            ContentSource::Inline(content) => Ok(content),
            ContentSource::File(path) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read content file: {:?}", path)),
            ContentSource::Editor => {
                let edited = edit_text(initial).context("Failed to edit entry")?;
                if edited == initial {
                    bail!("No changes made, nothing saved");
                }
                Ok(edited)
            }
        }
    }
}

/// List all entry titles
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let titles = store.list_titles()?;
    output.print_titles(&titles)
}

/// Show one entry, resolving the title case-insensitively
pub fn show(store: &Store, title: &str, output: &Output) -> Result<()> {
    let title = title.trim();
    let entry = store
        .find(title)?
        .ok_or_else(|| EntryError::NotFound {
            title: title.to_string(),
        })?;
    output.print_entry(&entry)
}

/// Resolve a query: exact title or substring search
pub fn search(store: &Store, query: &str, output: &Output) -> Result<()> {
    let resolution = resolve_query(store, query)?;
    output.print_resolution(query.trim(), &resolution)
}

/// Trimmed query; blank counts as absent
fn search_term(query: &str) -> Option<&str> {
    Some(query.trim()).filter(|q| !q.is_empty())
}

fn resolve_query(store: &Store, query: &str) -> Result<Resolution> {
    Ok(store.resolve(search_term(query))?)
}

/// Create a new entry
pub fn create(store: &Store, title: String, source: ContentSource, output: &Output) -> Result<()> {
    let initial = format!("# {}\n\n", title.trim());
    let content = source.read(&initial)?;

    let entry = match store.create(EntryDraft::new(title, content)) {
        Ok(entry) => entry,
        Err(EntryError::AlreadyExists { existing }) => bail!(
            "An entry titled '{}' already exists. Use `encyclopedia edit \"{}\"` to change it.",
            existing,
            existing
        ),
        Err(e) => return Err(e.into()),
    };

    output.success(&format!("Created entry: {}", entry.title));
    Ok(())
}

/// Replace the content of an existing entry
pub fn edit(store: &Store, title: &str, source: ContentSource, output: &Output) -> Result<()> {
    let title = title.trim();
    let existing = store
        .find(title)?
        .ok_or_else(|| EntryError::NotFound {
            title: title.to_string(),
        })?;

    let content = source.read(&existing.content)?;
    let entry = store.update(&existing.title, &content)?;

    output.success(&format!("Updated entry: {}", entry.title));
    Ok(())
}

/// Print a random entry title
pub fn random(store: &Store, output: &Output) -> Result<()> {
    match store.random_title() {
        Ok(title) => output.print_title(&title),
        Err(EntryError::EmptyCollection) => {
            if !output.is_quiet() {
                output.message("No entries yet. Create one with `encyclopedia new <title>`.");
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use encyclopedia_core::Config;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Store, Output) {
        let temp = TempDir::new().unwrap();
        let config = Config {
            entries_dir: temp.path().join("entries"),
            ..Config::default()
        };
        let store = Store::open_with_config(config).unwrap();
        (temp, store, Output::new(OutputFormat::Quiet))
    }

    #[test]
    fn test_content_source_from_args() {
        assert_eq!(
            ContentSource::from_args(Some("text".into()), None),
            ContentSource::Inline("text".into())
        );
        assert_eq!(
            ContentSource::from_args(None, Some("a.md".into())),
            ContentSource::File("a.md".into())
        );
        assert_eq!(ContentSource::from_args(None, None), ContentSource::Editor);
    }

    #[test]
    fn test_create_inline() {
        let (_temp, store, output) = setup();
        create(
            &store,
            "Rust".into(),
            ContentSource::Inline("# Rust\nA language.".into()),
            &output,
        )
        .unwrap();

        assert_eq!(
            store.get_content("Rust").unwrap().as_deref(),
            Some("# Rust\nA language.")
        );
    }

    #[test]
    fn test_create_from_file() {
        let (temp, store, output) = setup();
        let path = temp.path().join("draft.md");
        fs::write(&path, "# Go\n").unwrap();

        create(&store, "Go".into(), ContentSource::File(path), &output).unwrap();
        assert_eq!(store.get_content("Go").unwrap().as_deref(), Some("# Go\n"));
    }

    #[test]
    fn test_create_missing_file_fails() {
        let (temp, store, output) = setup();
        let result = create(
            &store,
            "Go".into(),
            ContentSource::File(temp.path().join("nope.md")),
            &output,
        );
        assert!(result.is_err());
        assert!(store.list_titles().unwrap().is_empty());
    }

    #[test]
    fn test_create_duplicate_names_existing() {
        let (_temp, store, output) = setup();
        store.save("Python", "# Python").unwrap();

        let err = create(
            &store,
            "PYTHON".into(),
            ContentSource::Inline("other".into()),
            &output,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'Python' already exists"));
        assert_eq!(store.list_titles().unwrap(), vec!["Python"]);
    }

    #[test]
    fn test_edit_resolves_case() {
        let (_temp, store, output) = setup();
        store.save("CSS", "old").unwrap();

        edit(&store, "css", ContentSource::Inline("new".into()), &output).unwrap();

        assert_eq!(store.list_titles().unwrap(), vec!["CSS"]);
        assert_eq!(store.get_content("CSS").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_edit_missing_entry() {
        let (_temp, store, output) = setup();
        let err = edit(&store, "Cobol", ContentSource::Inline("x".into()), &output).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EntryError>(),
            Some(EntryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_show_missing_entry() {
        let (_temp, store, output) = setup();
        assert!(show(&store, "Cobol", &output).is_err());
    }

    #[test]
    fn test_search_term_trims() {
        assert_eq!(search_term(" python "), Some("python"));
        assert_eq!(search_term("   "), None);
        assert_eq!(search_term(""), None);
    }

    #[test]
    fn test_search_padded_query_matches_exactly() {
        let (_temp, store, output) = setup();
        store.save("Python", "# Python").unwrap();

        assert_eq!(
            resolve_query(&store, " python ").unwrap(),
            Resolution::ExactMatch("Python".to_string())
        );
        assert_eq!(resolve_query(&store, " \t ").unwrap(), Resolution::EmptyQuery);
        search(&store, "  ", &output).unwrap();
    }

    #[test]
    fn test_show_trims_title() {
        let (_temp, store, output) = setup();
        store.save("Python", "# Python").unwrap();
        show(&store, " python ", &output).unwrap();
    }

    #[test]
    fn test_random_on_empty_is_not_an_error() {
        let (_temp, store, output) = setup();
        random(&store, &output).unwrap();
    }
}
