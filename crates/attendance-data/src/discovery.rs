//! Source-file discovery and processing-order planning.
//!
//! Two filename families feed the pipeline: monthly history exports
//! (`<N>月份总记录.xlsx`) and at most one current rolling export
//! (`<name>_考勤报表_<8-digit-date>-….xlsx`), chosen by modification time
//! when several match. Processing order is a semantic contract – the
//! merger keeps the last-seen record per key – so the plan always lists
//! historical files in ascending month order with the current file last.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

// ── Plan model ────────────────────────────────────────────────────────────────

/// The year-month context a source file's day columns resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// Which filename family a source file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Historical,
    Current,
}

/// One source file scheduled for processing.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub year_month: YearMonth,
    pub kind: SourceKind,
}

// ── Filename parsing ──────────────────────────────────────────────────────────

/// Month number embedded in a historical filename, if it matches.
pub fn historical_month(file_name: &str) -> Option<u32> {
    let re = Regex::new(r"^(\d+)月份总记录\.xlsx$").expect("regex is valid");
    let captures = re.captures(file_name)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Year-month embedded in a current-report filename, if it matches.
pub fn current_year_month(file_name: &str) -> Option<YearMonth> {
    let re = Regex::new(r"_考勤报表_(\d{8})-").expect("regex is valid");
    let digits = re.captures(file_name)?.get(1)?.as_str();
    let year: i32 = digits[..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    Some(YearMonth { year, month })
}

/// Resolve a historical month number against today's calendar.
///
/// A history export for a month later than the current one must be from
/// the previous year (e.g. a 12月 file seen in January).
fn resolve_historical_year(month: u32, today: NaiveDate) -> i32 {
    if month > today.month() {
        today.year() - 1
    } else {
        today.year()
    }
}

// ── Planning ──────────────────────────────────────────────────────────────────

/// Scan `dir` (non-recursively) and build the ordered processing plan.
///
/// Files matching a pattern but carrying an impossible month are skipped
/// with a warning. An empty plan is not an error here; the driver decides
/// what "no data" means.
pub fn plan_sources(dir: &Path, today: NaiveDate) -> Vec<SourceFile> {
    let mut historical: Vec<(u32, PathBuf)> = Vec::new();
    let mut current: Vec<(SystemTime, PathBuf, YearMonth)> = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();

        if let Some(month) = historical_month(&file_name) {
            if !(1..=12).contains(&month) {
                warn!("Skipping {}: month {} is out of range", file_name, month);
                continue;
            }
            historical.push((month, entry.into_path()));
        } else if let Some(year_month) = current_year_month(&file_name) {
            if !(1..=12).contains(&year_month.month) {
                warn!("Skipping {}: embedded date is invalid", file_name);
                continue;
            }
            match entry.metadata().ok().and_then(|m| m.modified().ok()) {
                Some(modified) => current.push((modified, entry.into_path(), year_month)),
                None => warn!("Skipping {}: no modification time available", file_name),
            }
        }
    }

    historical.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut plan: Vec<SourceFile> = historical
        .into_iter()
        .map(|(month, path)| SourceFile {
            path,
            year_month: YearMonth {
                year: resolve_historical_year(month, today),
                month,
            },
            kind: SourceKind::Historical,
        })
        .collect();

    // Most recently modified current export wins.
    if let Some((_, path, year_month)) = current.into_iter().max_by_key(|(m, ..)| *m) {
        plan.push(SourceFile {
            path,
            year_month,
            kind: SourceKind::Current,
        });
    }

    debug!("Planned {} source files from {}", plan.len(), dir.display());
    plan
}

// ── Tests ─────────────────────────────────────────────────────────────────────
