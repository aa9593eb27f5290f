//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::{Context, Result};
use serde::Serialize;

use encyclopedia_core::{Entry, Resolution};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a list of titles
    pub fn print_titles(&self, titles: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if titles.is_empty() {
                    println!("No entries found.");
                    return Ok(());
                }
                for title in titles {
                    println!("{}", title);
                }
                println!("\n{} entr{}", titles.len(), plural_y(titles.len()));
            }
            OutputFormat::Json => print_json(&titles)?,
            OutputFormat::Quiet => {
                for title in titles {
                    println!("{}", title);
                }
            }
        }
        Ok(())
    }

    /// Print a single entry
    ///
    /// Human and quiet output is the raw Markdown so it can be piped.
    pub fn print_entry(&self, entry: &Entry) -> Result<()> {
        match self.format {
            OutputFormat::Json => print_json(entry)?,
            OutputFormat::Human | OutputFormat::Quiet => {
                print!("{}", entry.content);
                if !entry.content.ends_with('\n') {
                    println!();
                }
            }
        }
        Ok(())
    }

    /// Print the outcome of resolving `query`
    pub fn print_resolution(&self, query: &str, resolution: &Resolution) -> Result<()> {
        match self.format {
            OutputFormat::Human => match resolution {
                Resolution::EmptyQuery => println!("Nothing to search for."),
                Resolution::ExactMatch(title) => println!("{} (exact match)", title),
                Resolution::SearchResults(matches) if matches.is_empty() => {
                    println!("No results for '{}'.", query);
                }
                Resolution::SearchResults(matches) => {
                    for title in matches {
                        println!("{}", title);
                    }
                    println!(
                        "\n{} result{} for '{}'",
                        matches.len(),
                        if matches.len() == 1 { "" } else { "s" },
                        query
                    );
                }
            },
            OutputFormat::Json => print_json(resolution)?,
            OutputFormat::Quiet => match resolution {
                Resolution::EmptyQuery => {}
                Resolution::ExactMatch(title) => println!("{}", title),
                Resolution::SearchResults(matches) => {
                    for title in matches {
                        println!("{}", title);
                    }
                }
            },
        }
        Ok(())
    }

    /// Print a single title
    pub fn print_title(&self, title: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({ "title": title }))?,
            OutputFormat::Human | OutputFormat::Quiet => println!("{}", title),
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Pretty-print any serializable value as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
