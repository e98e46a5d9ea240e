// ⚖️ Reconciler - Merge journal timelines with registry snapshots
// The only stage with cross-record dependencies. Runs strictly after both
// normalizers, in three ordered steps:
//   1. Earliest-date correction from the auxiliary age table
//   2. Backfill of prefixes the journal never saw
//   3. Current-snapshot overlay of every last event's address

use crate::ages::AgeTable;
use crate::model::{date_ordinal, OwnershipEvent, TimelineMap};
use crate::registry::{RegistryMap, REGISTRY_SOURCE_TAG};
use anyhow::{Context, Result};

// ============================================================================
// RECONCILER
// ============================================================================

pub struct Reconciler<'a> {
    ages: &'a AgeTable,
}

impl<'a> Reconciler<'a> {
    pub fn new(ages: &'a AgeTable) -> Self {
        Reconciler { ages }
    }

    /// Fold the registry's current view into the journal-derived timelines
    /// and return the merged map.
    ///
    /// Fatal conditions: any journal prefix or registry-backfilled prefix
    /// missing from the auxiliary age table aborts the run — the dataset is
    /// inconsistent and guessing a date would corrupt downstream history.
    pub fn reconcile(
        &self,
        mut timelines: TimelineMap,
        registry: &RegistryMap,
    ) -> Result<TimelineMap> {
        self.correct_earliest_dates(&mut timelines)?;
        self.backfill_missing(&mut timelines, registry)?;
        overlay_current(&mut timelines, registry);
        Ok(timelines)
    }

    /// Step 1: prefer the auxiliary table's date when it is strictly earlier
    /// than the journal's first event.
    ///
    /// Only the first event's date and source tag ever change; event count
    /// and order are untouched.
    fn correct_earliest_dates(&self, timelines: &mut TimelineMap) -> Result<()> {
        for (prefix, events) in timelines.iter_mut() {
            let age = self
                .ages
                .require(prefix)
                .context("Age lookup failed while correcting journal dates")?;

            let Some(first) = events.first_mut() else {
                continue;
            };

            let journal_date = date_ordinal(first.date.as_deref().unwrap_or(""));
            if date_ordinal(&age.date) < journal_date {
                first.date = Some(age.date.clone());
                first.source = Some(age.source.clone());
            }
        }
        Ok(())
    }

    /// Step 2: synthesize a single-event timeline for every prefix the
    /// registry knows but the journal never recorded.
    fn backfill_missing(
        &self,
        timelines: &mut TimelineMap,
        registry: &RegistryMap,
    ) -> Result<()> {
        for (prefix, snapshot) in registry {
            if timelines.contains_key(prefix) {
                continue;
            }

            let age = self
                .ages
                .require(prefix)
                .context("Age lookup failed while backfilling registry prefixes")?;

            timelines.insert(
                prefix.clone(),
                vec![OwnershipEvent {
                    date: Some(age.date.clone()),
                    event_type: "add".to_string(),
                    address: snapshot.address.clone(),
                    country: infer_country(&snapshot.address),
                    org: snapshot.org.clone(),
                    source: Some(REGISTRY_SOURCE_TAG.to_string()),
                }],
            );
        }
        Ok(())
    }
}

/// Step 3: for every registry prefix, re-normalize the LAST event's address
/// to the registry's canonical current text. The registry reflects
/// present-day ground truth more reliably than historical journal text;
/// org and date on the last event stay as they were.
fn overlay_current(timelines: &mut TimelineMap, registry: &RegistryMap) {
    for (prefix, snapshot) in registry {
        if let Some(last) = timelines.get_mut(prefix).and_then(|events| events.last_mut()) {
            last.address = snapshot.address.clone();
        }
    }
}

// ============================================================================
// COUNTRY INFERENCE
// ============================================================================

/// Guess a country code from free-text address: the LAST whitespace token
/// that is exactly two uppercase ASCII letters.
///
/// Known-imprecise heuristic, but it works for nearly all registry entries;
/// the last-token tie-break is load-bearing for downstream consumers.
pub fn infer_country(address: &str) -> Option<String> {
    address
        .split_whitespace()
        .filter(|token| token.len() == 2 && token.chars().all(|c| c.is_ascii_uppercase()))
        .last()
        .map(str::to_string)
}

// ============================================================================
// TESTS
// ============================================================================
