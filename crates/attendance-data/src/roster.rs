//! Roster loading.
//!
//! The roster CSV (`学生名单.csv`) carries the canonical name-to-id
//! mapping. Failure to locate or parse it is fatal to the run.

use std::path::Path;

use attendance_core::error::{AttendanceError, Result};
use attendance_core::models::{Roster, RosterEntry};
use tracing::debug;

const NAME_COLUMN: &str = "姓名";
const ID_COLUMN: &str = "学号";

/// Load the student roster from a CSV file.
///
/// Requires `姓名` and `学号` header columns. Student ids stay strings so
/// leading zeros survive. Rows with a blank name are skipped.
pub fn load_roster(path: &Path) -> Result<Roster> {
    if !path.exists() {
        return Err(AttendanceError::RosterNotFound(path.to_path_buf()));
    }

    let parse_err = |message: String| AttendanceError::RosterParse {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| parse_err(e.to_string()))?;

    let headers = reader.headers().map_err(|e| parse_err(e.to_string()))?;
    let name_idx = headers
        .iter()
        .position(|h| h.trim() == NAME_COLUMN)
        .ok_or_else(|| parse_err(format!("missing {} column", NAME_COLUMN)))?;
    let id_idx = headers
        .iter()
        .position(|h| h.trim() == ID_COLUMN)
        .ok_or_else(|| parse_err(format!("missing {} column", ID_COLUMN)))?;

    let mut entries: Vec<RosterEntry> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_err(e.to_string()))?;
        let name = record.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let student_id = record.get(id_idx).unwrap_or("").trim();
        entries.push(RosterEntry {
            name: name.to_string(),
            student_id: student_id.to_string(),
        });
    }

    debug!("Loaded {} roster entries from {}", entries.len(), path.display());
    Ok(Roster::from_entries(entries))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_roster_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "学生名单.csv",
            "姓名,学号\n张三,0070123\n李四,0070124\n",
        );

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.student_id("张三"), Some("0070123"));
    }

    #[test]
    fn test_load_roster_preserves_leading_zeros() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "r.csv", "姓名,学号\n张三,0001\n");

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.student_id("张三"), Some("0001"));
    }

    #[test]
    fn test_load_roster_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "r.csv",
            "序号,姓名,学号,备注\n1,张三,001,无\n",
        );

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.student_id("张三"), Some("001"));
    }

    #[test]
    fn test_load_roster_blank_names_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "r.csv", "姓名,学号\n张三,001\n,002\n");

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_load_roster_missing_file() {
        let err = load_roster(Path::new("/tmp/daybreak-no-such-roster.csv")).unwrap_err();
        assert!(matches!(err, AttendanceError::RosterNotFound(_)));
    }

    #[test]
    fn test_load_roster_missing_id_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "r.csv", "姓名,班级\n张三,一班\n");

        let err = load_roster(&path).unwrap_err();
        match err {
            AttendanceError::RosterParse { message, .. } => {
                assert!(message.contains("学号"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
