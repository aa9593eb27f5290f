//! Encyclopedia Core Library
//!
//! This crate provides the core functionality for Encyclopedia, a small wiki
//! whose entries are Markdown files in a flat directory.
//!
//! # Architecture
//!
//! - **Flat files**: one `<title>.md` per entry, source of truth
//! - **Resolver**: case-insensitive exact match, falling back to substring search
//!
//! Nothing is cached: every call re-reads the entries directory.
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open()?;
//!
//! // Create an entry
//! store.create(EntryDraft::new("Rust", "# Rust\nA language."))?;
//!
//! // Look something up
//! match store.resolve(Some("rust"))? {
//!     Resolution::ExactMatch(title) => println!("{}", title),
//!     Resolution::SearchResults(matches) => println!("{:?}", matches),
//!     Resolution::EmptyQuery => {}
//! }
//! ```
//!
//! # Modules
//!
//! - `store`: Unified entry interface (main entry point)
//! - `models`: Entry and draft data structures
//! - `resolver`: Query resolution and the normalized title index
//! - `random`: Uniform random entry selection
//! - `validation`: Draft validation, independent of any web framework
//! - `storage`: Flat-file persistence
//! - `error`: Entry-level error taxonomy
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod random;
pub mod resolver;
pub mod storage;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{EntryError, EntryResult};
pub use models::{Entry, EntryDraft};
pub use random::pick_random;
pub use resolver::{resolve, Collision, Resolution, TitleIndex};
pub use storage::{EntryStore, StorageError, StorageStats};
pub use store::Store;
pub use validation::{validate_content, ValidationError, ValidationErrors};
