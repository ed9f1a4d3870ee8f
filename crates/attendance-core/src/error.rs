use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the attendance pipeline.
///
/// Per-record problems (a malformed timestamp token, an unknown name,
/// too few check-ins) never surface here – they become anomaly records
/// instead. Variants in this enum are either fatal to the run (roster,
/// no-data) or abort a single source file.
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// The roster CSV does not exist. Fatal.
    #[error("Roster file not found: {0}")]
    RosterNotFound(PathBuf),

    /// The roster CSV exists but could not be parsed. Fatal.
    #[error("Failed to parse roster {path}: {message}")]
    RosterParse { path: PathBuf, message: String },

    /// A source workbook could not be opened or read. The file is skipped.
    #[error("Failed to read workbook {path}: {message}")]
    WorkbookRead { path: PathBuf, message: String },

    /// A source workbook lacks the configured sheet. The file is skipped.
    #[error("Workbook {path} has no sheet named \"{sheet}\"")]
    MissingSheet { path: PathBuf, sheet: String },

    /// A source sheet has no header that resolves to a day-of-month.
    /// The file is skipped.
    #[error("No recognisable day columns in {0}")]
    NoDayColumns(PathBuf),

    /// Zero source files yielded any data. Fatal; no artifacts are written.
    #[error("No attendance data could be processed from any source file")]
    NoData,

    /// An output artifact failed to write. The other artifact is unaffected.
    #[error("Failed to write report {path}: {message}")]
    ReportWrite { path: PathBuf, message: String },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the attendance crates.
pub type Result<T> = std::result::Result<T, AttendanceError>;
