//! Per-file processing: one source workbook in, validated session
//! records out.
//!
//! Runs the sheet reader, day-column inference, timestamp extraction,
//! window classification, and session validation for a single file. The
//! file supplies its own year-month context via the discovery plan.

use attendance_core::config::Config;
use attendance_core::error::{AttendanceError, Result};
use attendance_core::models::{AnomalyRecord, CheckinEvent, Roster, ValidRecord};
use attendance_core::validator::validate_sessions;
use tracing::debug;

use crate::columns::resolve_day_columns;
use crate::discovery::SourceFile;
use crate::extract::extract_timestamps;
use crate::sheet::read_sheet;

/// Session outcomes for one source file, before cross-file merging.
#[derive(Debug, Clone, Default)]
pub struct FileResult {
    pub valid: Vec<ValidRecord>,
    pub anomalies: Vec<AnomalyRecord>,
}

/// Process one source file end to end.
///
/// Returns a per-file error (workbook unreadable, sheet missing, zero day
/// columns) which the caller downgrades to a skip-with-warning; anything
/// below the file level becomes an anomaly record or is dropped, never an
/// error.
pub fn process_file(source: &SourceFile, roster: &Roster, config: &Config) -> Result<FileResult> {
    let table = read_sheet(&source.path, &config.sheet_name, config.header_row)?;

    // The first column is always the student name, whatever its header says.
    let day_columns: Vec<(usize, u32)> = resolve_day_columns(&table.headers)
        .into_iter()
        .filter(|&(idx, _)| idx != 0)
        .collect();
    if day_columns.is_empty() {
        return Err(AttendanceError::NoDayColumns(source.path.clone()));
    }

    let ym = source.year_month;
    let mut events: Vec<CheckinEvent> = Vec::new();

    for row in &table.rows {
        let Some(raw_name) = row.first() else {
            continue;
        };
        let raw_name = raw_name.trim();
        if raw_name.is_empty() {
            continue;
        }
        let name = config.correct_name(raw_name);

        for &(idx, day) in &day_columns {
            let Some(cell) = row.get(idx) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            for timestamp in extract_timestamps(cell, ym.year, ym.month, day) {
                // Out-of-window hours are discarded here, not flagged.
                if let Some(event) = CheckinEvent::classify(name.to_string(), timestamp) {
                    events.push(event);
                }
            }
        }
    }

    debug!(
        "{}: {} check-in events across {} day columns",
        source.path.display(),
        events.len(),
        day_columns.len()
    );

    let (valid, anomalies) = validate_sessions(&events, roster, config);
    Ok(FileResult { valid, anomalies })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
