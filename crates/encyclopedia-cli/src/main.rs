//! Encyclopedia CLI
//!
//! Command-line interface for Encyclopedia: run the wiki server and manage
//! entries directly from the terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use encyclopedia_core::{Config, Store};

mod commands;
mod editor;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "encyclopedia")]
#[command(about = "Encyclopedia - a Markdown wiki kept in a folder of files")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Address to bind (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List all entry titles
    #[command(alias = "ls")]
    List,
    /// Print the Markdown of an entry
    Show {
        /// Entry title (any case)
        title: String,
    },
    /// Look up a title or search for titles containing a term
    Search {
        /// Search query
        query: String,
    },
    /// Create a new entry
    #[command(alias = "add")]
    New {
        /// Entry title
        title: String,
        /// Entry content (opens editor if neither this nor --file is given)
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,
        /// Read content from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Replace the content of an existing entry
    Edit {
        /// Entry title (any case)
        title: String,
        /// New content (opens editor if neither this nor --file is given)
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,
        /// Read content from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print a random entry title
    Random,
    /// Show entries directory, counts and title collisions
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (entries_dir, host, port, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    match cli.command {
        Commands::Config { command } => handle_config_command(command, config_path, &output),
        Commands::Serve { host, port } => {
            let store = open_store(config_path, "info")?;
            commands::serve::run(store, host, port).await
        }
        Commands::List => commands::entry::list(&open_store(config_path, "warn")?, &output),
        Commands::Show { title } => {
            commands::entry::show(&open_store(config_path, "warn")?, &title, &output)
        }
        Commands::Search { query } => {
            commands::entry::search(&open_store(config_path, "warn")?, &query, &output)
        }
        Commands::New {
            title,
            content,
            file,
        } => {
            let source = commands::entry::ContentSource::from_args(content, file);
            commands::entry::create(&open_store(config_path, "warn")?, title, source, &output)
        }
        Commands::Edit {
            title,
            content,
            file,
        } => {
            let source = commands::entry::ContentSource::from_args(content, file);
            commands::entry::edit(&open_store(config_path, "warn")?, &title, source, &output)
        }
        Commands::Random => commands::entry::random(&open_store(config_path, "warn")?, &output),
        Commands::Status => commands::status::show(&open_store(config_path, "warn")?, &output),
    }
}

/// Load configuration, install logging and open the entry store
fn open_store(config_path: Option<&PathBuf>, default_level: &str) -> Result<Store> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init_logging(&config, default_level);

    Store::open_with_config(config).context("Failed to open entries directory")
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
