//! Flat-file entry persistence
//!
//! Each entry lives in `<entries_dir>/<title>.md` as raw Markdown. The file
//! stem is the title, so the mapping is reversible without an index.
//! Writes are atomic (write to a hidden temp file, sync, rename), so a reader
//! sees either the old content or the new content, never a partial file.
//!
//! Storage location: `~/.local/share/encyclopedia/entries/` (configurable via `Config`)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::{StorageError, StorageResult};
use crate::config::Config;

/// File extension marking Markdown entry content
pub const ENTRY_EXTENSION: &str = "md";

/// Persistence layer for entries
///
/// Stateless apart from the directory path: every call goes to disk.
#[derive(Debug, Clone)]
pub struct EntryStore {
    dir: PathBuf,
}

/// Storage usage summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of entry files
    pub entry_count: usize,
    /// Combined size of entry files in bytes
    pub total_size: u64,
}

impl StorageStats {
    /// Total size formatted for humans (B, KB, MB)
    pub fn total_size_human(&self) -> String {
        format_size(self.total_size)
    }
}

impl EntryStore {
    /// Create a store over the given directory
    ///
    /// The directory does not need to exist yet; it is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store over the configured entries directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.entries_dir.clone())
    }

    /// The entries directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `title`
    pub fn entry_path(&self, title: &str) -> PathBuf {
        self.dir.join(entry_file_name(title))
    }

    /// Enumerate every persisted entry title
    ///
    /// A missing directory is an empty collection, not an error. Titles are
    /// sorted case-insensitively so listings are stable across platforms.
    pub fn list_titles(&self) -> StorageResult<Vec<String>> {
        let mut titles: Vec<String> = self
            .entry_files()?
            .into_iter()
            .map(|(title, _)| title)
            .collect();

        titles.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        debug!("Listed {} entries in {:?}", titles.len(), self.dir);
        Ok(titles)
    }

    /// Fetch the content stored under exactly `title`
    ///
    /// Returns `None` when no such entry exists. The comparison is
    /// case-sensitive even on case-insensitive filesystems.
    pub fn get_content(&self, title: &str) -> StorageResult<Option<String>> {
        if !is_storable_title(title) {
            return Ok(None);
        }

        let path = self.entry_path(title);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::from_read(e, path)),
        };

        if !self.has_exact_file(&entry_file_name(title))? {
            debug!("{:?} only matched a differently-cased file", title);
            return Ok(None);
        }

        Ok(Some(content))
    }

    /// Write `content` under exactly `title`, replacing any previous content
    ///
    /// Idempotent. Does not look for entries whose title differs only in case.
    pub fn save(&self, title: &str, content: &str) -> StorageResult<()> {
        if !is_storable_title(title) {
            return Err(StorageError::UnstorableTitle {
                title: title.to_string(),
            });
        }

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| StorageError::CreateDirectory {
                path: self.dir.clone(),
                source,
            })?;
        }

        let path = self.entry_path(title);
        atomic_write(&self.dir, &path, content.as_bytes())?;

        info!("Saved entry {:?} ({} bytes)", title, content.len());
        Ok(())
    }

    /// Count entries and their combined size
    pub fn stats(&self) -> StorageResult<StorageStats> {
        let mut stats = StorageStats::default();
        for (_, path) in self.entry_files()? {
            let metadata = fs::metadata(&path).map_err(|e| StorageError::from_read(e, path))?;
            stats.entry_count += 1;
            stats.total_size += metadata.len();
        }
        Ok(stats)
    }

    /// Every entry file as (title, path), in directory order
    fn entry_files(&self) -> StorageResult<Vec<(String, PathBuf)>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::ListError {
                    path: self.dir.clone(),
                    source: e,
                })
            }
        };

        let mut files = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|source| StorageError::ListError {
                path: self.dir.clone(),
                source,
            })?;
            let path = dir_entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(title) = title_from_path(&path) {
                files.push((title, path));
            }
        }
        Ok(files)
    }

    /// Whether a file named exactly `file_name` is in the directory
    fn has_exact_file(&self, file_name: &str) -> StorageResult<bool> {
        let read_dir = fs::read_dir(&self.dir).map_err(|source| StorageError::ListError {
            path: self.dir.clone(),
            source,
        })?;

        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|source| StorageError::ListError {
                path: self.dir.clone(),
                source,
            })?;
            if dir_entry.file_name().to_str() == Some(file_name) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Whether `title` maps to a plain file name inside the entries directory
///
/// Rejects empty titles, path separators, NUL, and leading dots (hidden
/// files are reserved for temp files and never listed).
pub fn is_storable_title(title: &str) -> bool {
    !title.is_empty()
        && !title.starts_with('.')
        && !title.contains(['/', '\\', '\0'])
}

fn entry_file_name(title: &str) -> String {
    format!("{}.{}", title, ENTRY_EXTENSION)
}

/// Recover the title from an entry file path
///
/// Skips hidden files, other extensions, and non-UTF-8 names.
fn title_from_path(path: &Path) -> Option<String> {
    if path.extension()? != ENTRY_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if !is_storable_title(stem) {
        return None;
    }
    Some(stem.to_string())
}

/// Write data to a file atomically
///
/// 1. Write to a fresh hidden temp file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// Every call gets its own temp file, so concurrent saves of one title each
/// replace the whole file and the last rename wins.
fn atomic_write(dir: &Path, path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut temp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StorageError::from_write(e, dir.to_path_buf()))?;
    let temp_path = temp.path().to_path_buf();

    temp.write_all(data)
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;

    temp.as_file()
        .sync_all()
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;

    // A failed persist drops the temp file, which removes it
    temp.persist(path)
        .map_err(|e| StorageError::AtomicWriteFailed {
            from: temp_path,
            to: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
