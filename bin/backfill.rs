// mac-backfill: merge a consolidated journal with the registry exports.
// Usage: mac-backfill <journal.json> <data-dir> <out.json>
//
// <data-dir> must contain mac-ages.csv and ieee/{oui,cid,iab,mam,oui36}.csv.
// Fatal data-integrity errors (registry collisions, missing age entries)
// abort before any output is written.

use anyhow::{Context, Result};
use mac_history::{load_registry, AgeTable, Reconciler, TimelineMap};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn usage() -> ! {
    eprintln!("usage: mac-backfill <journal.json> <data-dir> <out.json>");
    process::exit(0);
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        usage();
    }
    let journal_path = Path::new(&args[1]);
    let data_dir = Path::new(&args[2]);
    let out_path = Path::new(&args[3]);

    println!("📂 Loading consolidated journal {}", journal_path.display());
    let text = fs::read_to_string(journal_path)
        .with_context(|| format!("Failed to read journal {}", journal_path.display()))?;
    let timelines: TimelineMap =
        serde_json::from_str(&text).context("Failed to parse consolidated journal JSON")?;
    println!("✓ Loaded {} journal prefixes", timelines.len());

    let ages = AgeTable::load(data_dir)?;
    println!("✓ Loaded {} age entries", ages.len());

    let registry = load_registry(data_dir)?;
    println!("✓ Loaded {} registry prefixes", registry.len());

    let before = timelines.len();
    let merged = Reconciler::new(&ages).reconcile(timelines, &registry)?;
    println!("✓ Reconciled {} prefixes ({} backfilled)", merged.len(), merged.len() - before);

    let json = serde_json::to_string(&merged).context("Failed to serialize merged timelines")?;
    fs::write(out_path, json)
        .with_context(|| format!("Failed to write output {}", out_path.display()))?;
    println!("✓ Wrote {}", out_path.display());

    Ok(())
}
