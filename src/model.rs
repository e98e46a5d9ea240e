// 📇 Data Model - Prefix keys and ownership timelines
// Shared shapes for both normalizers and the reconciler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// OWNERSHIP EVENT
// ============================================================================

/// One ownership-change record for a prefix, in wire form.
///
/// Field names are the short keys used by the consolidated JSON:
/// `d` date, `t` type, `a` address, `c` country, `o` organization,
/// `s` source tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipEvent {
    /// Event date, `YYYY-MM-DD`. Absent on some historical records.
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Event kind as supplied by the source (`add`, `update`, ...).
    /// Preserved verbatim; the reconciler never branches on it.
    #[serde(rename = "t", default)]
    pub event_type: String,

    /// Organization postal address, escape-normalized (real newlines).
    #[serde(rename = "a", default)]
    pub address: String,

    /// Two-letter country code, when known or inferred.
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Organization name.
    #[serde(rename = "o", default)]
    pub org: String,

    /// Provenance marker (e.g. `ieee`) when the record was backfilled
    /// rather than observed in the journal.
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Prefix key → oldest-first event timeline.
///
/// A `BTreeMap` keeps the serialized output in a stable key order.
pub type TimelineMap = BTreeMap<String, Vec<OwnershipEvent>>;

// ============================================================================
// PREFIX KEYS
// ============================================================================

/// Build a prefix key from hex text and a mask-bit count.
///
/// The hex text is lower-cased and right-padded with `0` to 12 digits,
/// then joined with the mask: `aabbcc` / 24 → `aabbcc000000/24`.
/// Padding an already-12-digit prefix is a no-op.
pub fn prefix_key(hex: &str, mask_bits: u32) -> String {
    let mut addr = hex.to_lowercase();
    while addr.len() < 12 {
        addr.push('0');
    }
    format!("{}/{}", addr, mask_bits)
}

// ============================================================================
// TEXT HELPERS
// ============================================================================

/// Replace literal `\n` escape sequences with real newline characters.
///
/// Journal and registry exports both carry addresses with the two-character
/// sequence backslash-n where the original data had a line break.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Reduce a date string to a comparable integer: `2010-05-01` → 20100501.
///
/// Strips `-` separators and parses the digits; anything that does not
/// parse (including an empty or absent date) compares as 0, i.e. earlier
/// than every real date.
pub fn date_ordinal(date: &str) -> u64 {
    date.replace('-', "").parse().unwrap_or(0)
}

// ============================================================================
// TESTS
// ============================================================================
