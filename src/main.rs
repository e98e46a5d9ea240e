// mac-journal: consolidate a journal snapshot tree into one JSON map.
// Usage: mac-journal <journal-dir> <out.json>

use anyhow::{Context, Result};
use mac_history::consolidate_journal;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn usage() -> ! {
    eprintln!("usage: mac-journal <journal-dir> <out.json>");
    process::exit(0);
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage();
    }
    let journal_dir = Path::new(&args[1]);
    let out_path = Path::new(&args[2]);

    println!("📜 Consolidating journal snapshots from {}", journal_dir.display());
    let timelines = consolidate_journal(journal_dir)?;
    println!("✓ Consolidated {} prefixes", timelines.len());

    let json = serde_json::to_string(&timelines).context("Failed to serialize timelines")?;
    fs::write(out_path, json)
        .with_context(|| format!("Failed to write output {}", out_path.display()))?;
    println!("✓ Wrote {}", out_path.display());

    Ok(())
}
