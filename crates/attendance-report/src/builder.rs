//! Joins the merged session dataset with the roster into report rows.

use std::collections::HashMap;

use attendance_core::models::{MergedDataset, Roster};
use tracing::debug;

use crate::week::WeekRange;

/// Separator between multiple anomaly texts for one student.
const ANOMALY_SEPARATOR: &str = "；";

/// One student's line in the weekly report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub student_id: String,
    pub weekly_count: u32,
    pub cumulative_count: u32,
    /// Rendered anomaly texts for the week, joined with `；`; empty when
    /// the student has none.
    pub weekly_anomalies: String,
}

/// Everything the renderers need for both output artifacts.
#[derive(Debug, Clone)]
pub struct AttendanceReport {
    pub week: WeekRange,
    pub class_label: String,
    /// One row per roster student, sorted by student id ascending.
    pub rows: Vec<ReportRow>,
}

/// Build the report from merged data, the roster, and the week range.
///
/// Every roster student appears exactly once, even with zero sessions
/// (left join from the roster, counts zero-filled). Names outside the
/// roster cannot reach the valid set, so nothing is lost by joining.
pub fn build_report(
    merged: &MergedDataset,
    roster: &Roster,
    week: WeekRange,
    class_label: &str,
) -> AttendanceReport {
    let mut cumulative: HashMap<&str, u32> = HashMap::new();
    let mut weekly: HashMap<&str, u32> = HashMap::new();
    for record in &merged.valid {
        *cumulative.entry(record.name.as_str()).or_default() += 1;
        if week.contains(record.date) {
            *weekly.entry(record.name.as_str()).or_default() += 1;
        }
    }

    // Merged records arrive in key order, so each student's anomaly texts
    // are already sorted by date and window.
    let mut anomaly_texts: HashMap<&str, Vec<String>> = HashMap::new();
    for record in &merged.anomalies {
        if week.contains(record.date) {
            anomaly_texts.entry(record.name.as_str()).or_default().push(
                format!("{} {}: {}", record.date, record.window, record.reason),
            );
        }
    }

    let mut rows: Vec<ReportRow> = roster
        .iter()
        .map(|entry| ReportRow {
            name: entry.name.clone(),
            student_id: entry.student_id.clone(),
            weekly_count: weekly.get(entry.name.as_str()).copied().unwrap_or(0),
            cumulative_count: cumulative.get(entry.name.as_str()).copied().unwrap_or(0),
            weekly_anomalies: anomaly_texts
                .get(entry.name.as_str())
                .map(|texts| texts.join(ANOMALY_SEPARATOR))
                .unwrap_or_default(),
        })
        .collect();

    rows.sort_by(|a, b| a.student_id.cmp(&b.student_id));

    debug!(
        "Built report: {} rows, week {} to {}",
        rows.len(),
        week.start,
        week.end
    );

    AttendanceReport {
        week,
        class_label: class_label.to_string(),
        rows,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
