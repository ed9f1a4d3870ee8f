//! Cross-file merge with last-wins deduplication.
//!
//! Historical monthly exports and the current rolling export overlap in
//! date range; data processed later (closer to "current") supersedes
//! earlier data. A key's winner is whichever record the *last* file
//! produced – valid or anomalous – so the merged dataset holds exactly
//! one outcome per (name, date, window).

use std::collections::BTreeMap;

use attendance_core::models::{AnomalyRecord, MergedDataset, SessionKey, ValidRecord};
use tracing::debug;

use crate::pipeline::FileResult;

/// The winning record for one session key.
enum Outcome {
    Valid(ValidRecord),
    Anomaly(AnomalyRecord),
}

/// Merge per-file results in processing order.
///
/// Insertion replaces: a key seen again simply overwrites its previous
/// outcome, which makes the merge idempotent – feeding the same file
/// twice changes nothing. Output comes back in key order.
pub fn merge_results(results: Vec<FileResult>) -> MergedDataset {
    let mut outcomes: BTreeMap<SessionKey, Outcome> = BTreeMap::new();
    let mut total_in = 0usize;

    for result in results {
        // Within one file a key is either valid or anomalous, never both,
        // so the relative order of the two loops does not matter.
        total_in += result.valid.len() + result.anomalies.len();
        for record in result.valid {
            outcomes.insert(record.key(), Outcome::Valid(record));
        }
        for record in result.anomalies {
            outcomes.insert(record.key(), Outcome::Anomaly(record));
        }
    }

    let mut merged = MergedDataset::default();
    for outcome in outcomes.into_values() {
        match outcome {
            Outcome::Valid(record) => merged.valid.push(record),
            Outcome::Anomaly(record) => merged.anomalies.push(record),
        }
    }

    debug!(
        "Merged {} records into {} valid, {} anomalous",
        total_in,
        merged.valid.len(),
        merged.anomalies.len()
    );
    merged
}

// ── Tests ─────────────────────────────────────────────────────────────────────
