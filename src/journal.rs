// 📜 Source Normalizer (Journal) - Snapshot files → timelines
// Walks a directory tree of per-prefix journal snapshots and reduces each
// file to a (prefix key, ordered event list) pair.

use crate::model::{prefix_key, unescape_newlines, OwnershipEvent, TimelineMap};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// ============================================================================
// SNAPSHOT FILE SHAPE
// ============================================================================

/// One raw record inside a journal snapshot file's `recs` list.
///
/// `OUI` and `OUISize` are constant across a file; only the first record's
/// values are consulted when deriving the prefix key.
#[derive(Debug, Deserialize)]
struct JournalRecord {
    #[serde(rename = "OUI")]
    oui: String,

    #[serde(rename = "OUISize")]
    oui_size: u32,

    #[serde(rename = "EventDate", default)]
    event_date: Option<String>,

    #[serde(rename = "EventType", default)]
    event_type: Option<String>,

    #[serde(rename = "OrgAddress", default)]
    org_address: Option<String>,

    #[serde(rename = "OrgCountry", default)]
    org_country: Option<String>,

    #[serde(rename = "OrgName", default)]
    org_name: Option<String>,
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Walk `dir` and consolidate every journal snapshot file into one
/// prefix→timeline map.
///
/// Files that parse to JSON `null` or lack a `recs` list are silently
/// skipped — absence of data, not failure. Malformed JSON is an error and
/// aborts the run. When two files yield the same prefix key, the later file
/// (in sorted traversal order) fully overwrites the earlier timeline.
pub fn consolidate_journal(dir: &Path) -> Result<TimelineMap> {
    let mut timelines = TimelineMap::new();
    walk(dir, &mut timelines)?;
    Ok(timelines)
}

/// Recursive descent over the snapshot tree. Entries are visited in sorted
/// path order so the overwrite-on-duplicate rule is deterministic.
fn walk(dir: &Path, timelines: &mut TimelineMap) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read journal directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(&path, timelines)?;
        } else if path.is_file() {
            if let Some((key, events)) = normalize_file(&path)? {
                timelines.insert(key, events);
            }
        }
    }

    Ok(())
}

/// Reduce one snapshot file to its `(prefix key, timeline)` pair.
///
/// Returns `Ok(None)` for files with nothing to contribute (null document,
/// no `recs`, empty `recs`).
fn normalize_file(path: &Path) -> Result<Option<(String, Vec<OwnershipEvent>)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file {}", path.display()))?;

    let doc: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse journal file {}", path.display()))?;

    let recs = match doc.get("recs") {
        Some(serde_json::Value::Array(recs)) if !recs.is_empty() => recs.clone(),
        _ => return Ok(None),
    };

    let records: Vec<JournalRecord> = serde_json::from_value(serde_json::Value::Array(recs))
        .with_context(|| format!("Malformed records in journal file {}", path.display()))?;

    // Prefix identity comes from the first record only.
    let key = prefix_key(&records[0].oui, records[0].oui_size);

    let events = records
        .into_iter()
        .map(|r| OwnershipEvent {
            date: r.event_date,
            event_type: r.event_type.unwrap_or_default(),
            address: unescape_newlines(&r.org_address.unwrap_or_default()),
            country: r.org_country,
            org: r.org_name.unwrap_or_default(),
            source: None,
        })
        .collect();

    Ok(Some((key, events)))
}

// ============================================================================
// TESTS
// ============================================================================
