//! Day-column inference over a sheet's header labels.
//!
//! Attendance exports label most day columns with a bare day-of-month but
//! mark weekends with glyphs (`六` / `日`) instead of a number. Weekend
//! days are inferred from the nearest numeric column to their left.

use tracing::debug;

/// Outcome of classifying one header label.
enum HeaderKind {
    /// The label parses as a day-of-month.
    Day(u32),
    /// A weekend marker with no parseable number of its own.
    Weekend,
    /// Anything else (name column, blank, decoration).
    Other,
}

/// Explicit three-way branch: integer parse, weekend marker, pass-through.
fn classify_header(label: &str) -> HeaderKind {
    let trimmed = label.trim();
    if let Ok(day) = trimmed.parse::<u32>() {
        return HeaderKind::Day(day);
    }
    if trimmed.contains('六') || trimmed.contains('日') {
        return HeaderKind::Weekend;
    }
    HeaderKind::Other
}

/// Resolve which columns carry calendar days.
///
/// Returns `(column index, day-of-month)` pairs in header order. Weekend
/// markers inherit `last numeric day + 1`, and the inferred value feeds
/// the next marker, so two weekend columns in a row resolve to `+1` and
/// `+2` relative to the last true numeric column. A weekend marker with
/// no preceding day column is dropped. Out-of-order numeric headers are
/// taken at face value.
pub fn resolve_day_columns(headers: &[String]) -> Vec<(usize, u32)> {
    let mut resolved: Vec<(usize, u32)> = Vec::new();
    let mut last_known_day: u32 = 0;

    for (idx, label) in headers.iter().enumerate() {
        match classify_header(label) {
            HeaderKind::Day(day) => {
                last_known_day = day;
                resolved.push((idx, day));
            }
            HeaderKind::Weekend => {
                if last_known_day > 0 {
                    let inferred = last_known_day + 1;
                    resolved.push((idx, inferred));
                    last_known_day = inferred;
                } else {
                    debug!(
                        "Weekend column {:?} has no preceding day column; ignored",
                        label
                    );
                }
            }
            HeaderKind::Other => {}
        }
    }

    resolved
}

// ── Tests ─────────────────────────────────────────────────────────────────────
