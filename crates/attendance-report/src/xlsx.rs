//! Cumulative-count workbook rendering.

use std::path::Path;

use attendance_core::error::{AttendanceError, Result};
use rust_xlsxwriter::Workbook;

const SHEET_NAME: &str = "累计打卡统计";
const HEADERS: [&str; 4] = ["姓名", "学号", "专业班级", "累计打卡次数"];

use crate::builder::AttendanceReport;

/// Write the cumulative workbook: one sheet, one row per roster student.
///
/// Student ids are written as strings so leading zeros survive a
/// spreadsheet round trip.
pub fn write_cumulative_workbook(report: &AttendanceReport, path: &Path) -> Result<()> {
    let wrap = |message: String| AttendanceError::ReportWrite {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(|e| wrap(e.to_string()))?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| wrap(e.to_string()))?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet
            .write_string(r, 0, &row.name)
            .map_err(|e| wrap(e.to_string()))?;
        worksheet
            .write_string(r, 1, &row.student_id)
            .map_err(|e| wrap(e.to_string()))?;
        worksheet
            .write_string(r, 2, &report.class_label)
            .map_err(|e| wrap(e.to_string()))?;
        worksheet
            .write_number(r, 3, f64::from(row.cumulative_count))
            .map_err(|e| wrap(e.to_string()))?;
    }

    workbook.save(path).map_err(|e| wrap(e.to_string()))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
