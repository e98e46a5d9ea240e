// End-to-end pipeline: journal snapshots + age table + registry exports
// → one merged prefix→timeline map, exactly as the two binaries chain.

use mac_history::{consolidate_journal, load_registry, AgeTable, Reconciler, TimelineMap};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Lay out a full input dataset: a journal tree, mac-ages.csv, and the five
/// registry export files.
fn build_dataset(root: &Path) {
    // Journal: one prefix with two events, nested one level deep.
    let journal = root.join("journal/00");
    fs::create_dir_all(&journal).unwrap();
    fs::write(
        journal.join("aabbcc.json"),
        r#"{"recs": [
            {"OUI": "AABBCC", "OUISize": 24, "EventDate": "2010-05-01",
             "EventType": "add", "OrgAddress": "1 Main St\\nAnytown US",
             "OrgCountry": "US", "OrgName": "Example Corp"},
            {"OUI": "AABBCC", "OUISize": 24, "EventDate": "2015-02-10",
             "EventType": "update", "OrgAddress": "2 Side St",
             "OrgCountry": "US", "OrgName": "Example Corp"}
        ]}"#,
    )
    .unwrap();
    // A snapshot with no usable records, silently skipped.
    fs::write(journal.join("empty.json"), "null").unwrap();

    let data = root.join("data");
    fs::create_dir_all(data.join("ieee")).unwrap();

    // Age table covers the journal prefix (earlier date) and the
    // registry-only prefix.
    fs::write(
        data.join("mac-ages.csv"),
        "aabbcc000000/24,2009-01-01,wireshark\n\
         deadbe000000/24,1999-12-31,ieee\n",
    )
    .unwrap();

    // oui.csv carries both prefixes; the other four exports are header-only.
    fs::write(
        data.join("ieee/oui.csv"),
        "Registry,Assignment,Organization Name,Organization Address\n\
         MA-L,AABBCC,Example Corp,1 Main Street\\nAnytown US\n\
         MA-L,DEADBE,Registry Only Org,42 Nowhere Rd Springfield US\n",
    )
    .unwrap();
    for name in ["cid.csv", "iab.csv", "mam.csv", "oui36.csv"] {
        fs::write(
            data.join("ieee").join(name),
            "Registry,Assignment,Organization Name,Organization Address\n",
        )
        .unwrap();
    }
}

#[test]
fn full_pipeline_merges_journal_and_registry() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());

    // Stage 1: journal normalizer, round-tripped through its JSON output
    // the way mac-journal hands off to mac-backfill.
    let timelines = consolidate_journal(&tmp.path().join("journal")).unwrap();
    let handoff = serde_json::to_string(&timelines).unwrap();
    let timelines: TimelineMap = serde_json::from_str(&handoff).unwrap();
    assert_eq!(timelines.len(), 1);

    // Stage 2: reconcile with ages and registry.
    let data_dir = tmp.path().join("data");
    let ages = AgeTable::load(&data_dir).unwrap();
    let registry = load_registry(&data_dir).unwrap();
    let merged = Reconciler::new(&ages).reconcile(timelines, &registry).unwrap();

    assert_eq!(merged.len(), 2);

    // Journal prefix: first date corrected from the age table, last address
    // overlaid from the registry's current record.
    let journal_events = &merged["aabbcc000000/24"];
    assert_eq!(journal_events.len(), 2);
    assert_eq!(journal_events[0].date.as_deref(), Some("2009-01-01"));
    assert_eq!(journal_events[0].source.as_deref(), Some("wireshark"));
    assert_eq!(journal_events[1].address, "1 Main Street\nAnytown US");
    assert_eq!(journal_events[1].org, "Example Corp");

    // Registry-only prefix: backfilled as a single dated "add" event.
    let backfilled = &merged["deadbe000000/24"];
    assert_eq!(backfilled.len(), 1);
    assert_eq!(backfilled[0].date.as_deref(), Some("1999-12-31"));
    assert_eq!(backfilled[0].event_type, "add");
    assert_eq!(backfilled[0].org, "Registry Only Org");
    assert_eq!(backfilled[0].country.as_deref(), Some("US"));
    assert_eq!(backfilled[0].source.as_deref(), Some("ieee"));

    // Output round-trip is structurally lossless.
    let out = serde_json::to_string(&merged).unwrap();
    let reparsed: TimelineMap = serde_json::from_str(&out).unwrap();
    assert_eq!(reparsed, merged);
}

#[test]
fn registry_collision_aborts_before_any_merge() {
    let tmp = TempDir::new().unwrap();
    build_dataset(tmp.path());

    // Duplicate the journal prefix into a second export file.
    let data_dir = tmp.path().join("data");
    fs::write(
        data_dir.join("ieee/iab.csv"),
        "IAB,AABBCC,Conflicting Org,Other Addr US\n",
    )
    .unwrap();

    let err = load_registry(&data_dir).unwrap_err();
    assert!(format!("{:#}", err).contains("aabbcc000000/24"));
}
