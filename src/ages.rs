// 🕰️ Auxiliary Age Table - Trusted earliest-known-date per prefix
// Independent side table used only to validate/override first-event dates
// and to date backfilled registry records.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// One age entry: the earliest known registration date for a prefix and
/// the tag of whatever source established it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeRecord {
    pub date: String,
    pub source: String,
}

/// Prefix key → earliest-known-date record, loaded from `mac-ages.csv`.
#[derive(Debug, Default)]
pub struct AgeTable {
    entries: HashMap<String, AgeRecord>,
}

impl AgeTable {
    /// Load the age table from `<data_dir>/mac-ages.csv`.
    ///
    /// Rows are `prefix_key, earliest_date, origin_tag`; rows with fewer
    /// than three columns are skipped.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join("mac-ages.csv");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open age table {}", path.display()))?;

        let mut entries = HashMap::new();
        for row in reader.records() {
            let row = row.context("Failed to read age table row")?;
            if row.len() < 3 {
                continue;
            }
            entries.insert(
                row[0].trim().to_string(),
                AgeRecord {
                    date: row[1].trim().to_string(),
                    source: row[2].trim().to_string(),
                },
            );
        }

        Ok(AgeTable { entries })
    }

    /// Look up a prefix the reconciler needs an age for.
    ///
    /// Every prefix the reconciler touches is assumed to have an entry;
    /// a miss means the input dataset is inconsistent and the run must
    /// abort rather than guess a date.
    pub fn require(&self, prefix: &str) -> Result<&AgeRecord> {
        self.entries
            .get(prefix)
            .ok_or_else(|| anyhow!("No auxiliary age entry for prefix {}", prefix))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, AgeRecord)>) -> Self {
        AgeTable {
            entries: entries.into_iter().collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
