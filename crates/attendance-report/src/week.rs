//! Reporting-week arithmetic.
//!
//! The program's week runs Friday through Thursday: a report generated on
//! any day covers the range ending on that week's Thursday (which may be
//! in the past – a Friday run already belongs to the next reporting week).

use chrono::{Datelike, NaiveDate, TimeDelta};

/// An inclusive date range for one reporting week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// The reporting week anchored on `anchor`.
    ///
    /// The end is the Thursday of the anchor's Monday-based week and the
    /// start the Friday six days before it.
    pub fn containing(anchor: NaiveDate) -> WeekRange {
        let offset = anchor.weekday().num_days_from_monday() as i64 - 3;
        let end = anchor - TimeDelta::days(offset);
        WeekRange {
            start: end - TimeDelta::days(6),
            end,
        }
    }

    /// Whether `date` falls inside the range, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
