// 🗂️ Source Normalizer (Registry) - IEEE export CSVs → current snapshots
// Parses the fixed set of registry export files into one (org, address)
// record per prefix. Registry files are mutually exclusive by prefix;
// a collision across files is a data-integrity failure.

use crate::model::{prefix_key, unescape_newlines};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The registry export files, in processing order, expected under
/// `<data-dir>/ieee/`.
pub const REGISTRY_FILES: [&str; 5] = ["oui.csv", "cid.csv", "iab.csv", "mam.csv", "oui36.csv"];

/// Provenance tag stamped onto events synthesized from registry data.
pub const REGISTRY_SOURCE_TAG: &str = "ieee";

// ============================================================================
// SNAPSHOT RECORD
// ============================================================================

/// The registry's CURRENT view of one prefix: organization and address,
/// no date of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub org: String,
    pub address: String,
}

/// Prefix key → current registry snapshot.
pub type RegistryMap = BTreeMap<String, RegistrySnapshot>;

// ============================================================================
// NORMALIZER
// ============================================================================

/// Load all five registry export files from `<data_dir>/ieee/` and merge
/// them into one map.
///
/// Within a single file the last row per prefix wins; the same prefix
/// appearing in TWO files aborts the run, reporting both records.
pub fn load_registry(data_dir: &Path) -> Result<RegistryMap> {
    let mut merged = RegistryMap::new();

    for name in REGISTRY_FILES {
        let path = data_dir.join("ieee").join(name);
        let file_map = load_registry_file(&path)
            .with_context(|| format!("Failed to load registry export {}", path.display()))?;

        for (key, snapshot) in file_map {
            if let Some(existing) = merged.get(&key) {
                bail!(
                    "Registry prefix collision on {}: {:?} (earlier file) vs {:?} ({})",
                    key,
                    existing,
                    snapshot,
                    name
                );
            }
            merged.insert(key, snapshot);
        }
    }

    Ok(merged)
}

/// Parse one export file into its own prefix→snapshot map.
fn load_registry_file(path: &Path) -> Result<RegistryMap> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("Failed to open registry CSV")?;

    let mut snapshots = RegistryMap::new();

    for row in reader.records() {
        let row = row.context("Failed to read registry CSV row")?;

        // Data rows are: Registry, hex_prefix, org, address.
        if row.len() < 4 {
            continue;
        }
        // Header rows repeat throughout the exports.
        if row[0].trim().starts_with("Registry") {
            continue;
        }

        let hex = row[1].trim().to_lowercase();
        // Each hex digit PAIR contributes 8 bits, truncating on odd lengths.
        let mask_bits = (hex.len() as u32 * 8) / 2;
        let key = prefix_key(&hex, mask_bits);

        snapshots.insert(
            key,
            RegistrySnapshot {
                org: row[2].trim().to_string(),
                address: unescape_newlines(row[3].trim()),
            },
        );
    }

    Ok(snapshots)
}

// ============================================================================
// TESTS
// ============================================================================
