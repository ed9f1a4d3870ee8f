//! Spreadsheet reading for attendance source workbooks.
//!
//! Loads one sheet of an `.xlsx` file into plain string cells so the rest
//! of the pipeline never touches spreadsheet types directly.

use std::path::Path;

use attendance_core::error::{AttendanceError, Result};
use calamine::{open_workbook_auto, Data, Reader};

/// One sheet reduced to strings: a header row plus the data rows below it.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read `sheet_name` from the workbook at `path`.
///
/// `header_row` is 1-based; rows above it are discarded. An unreadable
/// workbook or a missing sheet is a per-file error – the caller skips the
/// file and continues.
pub fn read_sheet(path: &Path, sheet_name: &str, header_row: u32) -> Result<SheetTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| AttendanceError::WorkbookRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|_| AttendanceError::MissingSheet {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
        })?;

    // `header_row` counts from the top of the sheet, but calamine's range
    // starts at the first used cell; compensate for the offset.
    let start_row = range.start().map(|(row, _)| row).unwrap_or(0) as usize;
    let skip = (header_row.saturating_sub(1) as usize).saturating_sub(start_row);
    let mut rows = range.rows().skip(skip);

    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();

    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(SheetTable { headers, rows })
}

/// Render one cell as the string the extractor and column inferencer see.
///
/// Whole floats lose their fraction (Excel stores day headers as `5.0`),
/// and native datetime cells are rendered `HH:MM` so the timestamp regex
/// still matches them.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%H:%M").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    /// Write a small attendance-shaped workbook: three banner rows, a
    /// header row at row 4, then data rows.
    fn write_fixture(dir: &Path, name: &str, sheet: &str, rows: &[&[&str]]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        worksheet.write_string(0, 0, "某某学校考勤导出").unwrap();
        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                worksheet
                    .write_string(3 + i as u32, j as u16, *cell)
                    .unwrap();
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_read_sheet_header_row_offset() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            dir.path(),
            "a.xlsx",
            "打卡时间",
            &[&["姓名", "1", "2"], &["张三", "08:00", ""]],
        );

        let table = read_sheet(&path, "打卡时间", 4).unwrap();
        assert_eq!(table.headers, vec!["姓名", "1", "2"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "张三");
        assert_eq!(table.rows[0][1], "08:00");
    }

    #[test]
    fn test_read_sheet_missing_sheet() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path(), "a.xlsx", "其他", &[&["姓名"]]);

        let err = read_sheet(&path, "打卡时间", 4).unwrap_err();
        assert!(matches!(err, AttendanceError::MissingSheet { .. }));
    }

    #[test]
    fn test_read_sheet_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not-a-workbook.xlsx");
        std::fs::write(&path, b"plain text").unwrap();

        let err = read_sheet(&path, "打卡时间", 4).unwrap_err();
        assert!(matches!(err, AttendanceError::WorkbookRead { .. }));
    }

    #[test]
    fn test_numeric_header_cells_render_without_fraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("n.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("打卡时间").unwrap();
        worksheet.write_string(3, 0, "姓名").unwrap();
        worksheet.write_number(3, 1, 5.0).unwrap();
        workbook.save(&path).unwrap();

        let table = read_sheet(&path, "打卡时间", 4).unwrap();
        assert_eq!(table.headers[1], "5");
    }
}
