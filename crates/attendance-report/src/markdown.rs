//! Weekly Markdown report rendering.

use std::path::Path;

use attendance_core::error::{AttendanceError, Result};

use crate::builder::AttendanceReport;

const TABLE_HEADERS: [&str; 5] = ["姓名", "学号", "本周打卡次数", "累计打卡次数", "本周异常记录"];

/// Render the weekly report as a Markdown document.
///
/// A title line names the inclusive week range, followed by a pipe table
/// with one row per roster student (already sorted by student id).
pub fn render_weekly_markdown(report: &AttendanceReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# 晨曦计划周报 ({} 至 {})\n\n",
        report.week.start, report.week.end
    ));

    out.push_str(&format!("| {} |\n", TABLE_HEADERS.join(" | ")));
    out.push_str(&format!(
        "|{}\n",
        "---|".repeat(TABLE_HEADERS.len())
    ));

    for row in &report.rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.name, row.student_id, row.weekly_count, row.cumulative_count, row.weekly_anomalies
        ));
    }

    out
}

/// Write the rendered weekly report to `path`.
pub fn write_weekly_markdown(report: &AttendanceReport, path: &Path) -> Result<()> {
    std::fs::write(path, render_weekly_markdown(report)).map_err(|e| {
        AttendanceError::ReportWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
