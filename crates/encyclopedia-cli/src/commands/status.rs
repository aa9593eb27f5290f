//! Status command handler

use anyhow::Result;

use encyclopedia_core::Store;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.stats()?;
    let collisions = store.collisions()?;
    let config = store.config();

    match output.format {
        OutputFormat::Json => {
            let collision_json: Vec<_> = collisions
                .iter()
                .map(|c| serde_json::json!({"key": c.key, "titles": c.titles}))
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "entries_dir": config.entries_dir,
                    "entry_count": stats.entry_count,
                    "total_size": stats.total_size,
                    "collisions": collision_json
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", stats.entry_count);
        }
        OutputFormat::Human => {
            println!("Encyclopedia Status");
            println!("===================");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.entries_dir.display());
            println!("  Entries:  {}", stats.entry_count);
            println!("  Size:     {}", stats.total_size_human());
            println!();
            println!("Server:");
            println!("  Address:  http://{}", config.bind_address());

            if !collisions.is_empty() {
                println!();
                println!("Titles differing only in case:");
                for collision in &collisions {
                    println!(
                        "  {} (lookups use '{}')",
                        collision.titles.join(", "),
                        collision.titles[0]
                    );
                }
            }
        }
    }

    Ok(())
}
