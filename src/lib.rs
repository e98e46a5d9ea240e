// MAC History - Core Library
// Consolidates MAC-prefix ownership records from the journal snapshot tree
// and the IEEE registry exports into one queryable prefix→timeline dataset.
// Exposes all modules for use in the two CLI binaries and tests.

pub mod ages;      // Auxiliary earliest-known-date side table
pub mod journal;   // Source Normalizer: journal snapshot files
pub mod model;     // Prefix keys, ownership events, timelines
pub mod reconcile; // Reconciliation engine (the core)
pub mod registry;  // Source Normalizer: IEEE registry exports

// Re-export commonly used types
pub use ages::{AgeRecord, AgeTable};
pub use journal::consolidate_journal;
pub use model::{date_ordinal, prefix_key, unescape_newlines, OwnershipEvent, TimelineMap};
pub use reconcile::{infer_country, Reconciler};
pub use registry::{
    load_registry, RegistryMap, RegistrySnapshot, REGISTRY_FILES, REGISTRY_SOURCE_TAG,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
