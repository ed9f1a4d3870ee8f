use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::Config;

// ── Window ────────────────────────────────────────────────────────────────────

/// A named daily time-of-day bracket an attendance check must fall into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// 早自习 – check-ins with hour in `[6, 12)`.
    Morning,
    /// 晚自习 – check-ins with hour in `[18, 23)`.
    Evening,
}

impl Window {
    /// Classify an hour-of-day into a window.
    ///
    /// Returns `None` for hours outside both brackets; such check-ins are
    /// discarded and never count toward session cardinality.
    pub fn classify(hour: u32) -> Option<Window> {
        match hour {
            6..=11 => Some(Window::Morning),
            18..=22 => Some(Window::Evening),
            _ => None,
        }
    }

    /// Minimum session length in minutes for this window.
    pub fn required_minutes(self, config: &Config) -> i64 {
        match self {
            Window::Morning => config.morning_min_minutes,
            Window::Evening => config.evening_min_minutes,
        }
    }

    /// Label used in reports and anomaly text.
    pub fn label(self) -> &'static str {
        match self {
            Window::Morning => "早自习",
            Window::Evening => "晚自习",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Check-in events and session keys ──────────────────────────────────────────

/// A single badge check-in, already resolved to an absolute instant and
/// classified into a window. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinEvent {
    /// Student name after correction-table normalisation.
    pub name: String,
    /// Calendar date of the check-in.
    pub date: NaiveDate,
    /// Absolute timestamp of the check-in.
    pub timestamp: NaiveDateTime,
    /// The daily window the timestamp falls into.
    pub window: Window,
}

impl CheckinEvent {
    /// Build an event from a resolved timestamp, classifying its window.
    ///
    /// Returns `None` when the hour falls outside both windows.
    pub fn classify(name: String, timestamp: NaiveDateTime) -> Option<CheckinEvent> {
        let window = Window::classify(timestamp.hour())?;
        Some(CheckinEvent {
            name,
            date: timestamp.date(),
            timestamp,
            window,
        })
    }
}

/// The uniqueness boundary across the merged dataset: one student, one
/// calendar date, one window.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey {
    pub name: String,
    pub date: NaiveDate,
    pub window: Window,
}

// ── Session outcomes ──────────────────────────────────────────────────────────

/// A session that passed the cardinality and duration checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub name: String,
    pub date: NaiveDate,
    pub window: Window,
}

impl ValidRecord {
    /// The dedup key for this record.
    pub fn key(&self) -> SessionKey {
        SessionKey {
            name: self.name.clone(),
            date: self.date,
            window: self.window,
        }
    }
}

/// Why a session (or a name lookup) failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyReason {
    /// The name is not present in the roster.
    NotInRoster,
    /// Fewer than two check-ins were recorded for the session.
    InsufficientCheckins { count: usize },
    /// The session was shorter than the window's minimum, in truncated minutes.
    InsufficientDuration { minutes: i64 },
}

impl fmt::Display for AnomalyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyReason::NotInRoster => f.write_str("未在学生名单中"),
            AnomalyReason::InsufficientCheckins { count } => {
                write!(f, "次数不足(仅{}次)", count)
            }
            AnomalyReason::InsufficientDuration { minutes } => {
                write!(f, "时长不足({}分钟)", minutes)
            }
        }
    }
}

/// A session that failed validation, with its reason code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyRecord {
    pub name: String,
    pub date: NaiveDate,
    pub window: Window,
    pub reason: AnomalyReason,
}

impl AnomalyRecord {
    /// The dedup key for this record.
    pub fn key(&self) -> SessionKey {
        SessionKey {
            name: self.name.clone(),
            date: self.date,
            window: self.window,
        }
    }
}

/// The cross-file union of session outcomes after last-wins deduplication.
///
/// For every key at most one record exists across the two sets – a later
/// file's anomaly replaces an earlier file's valid record and vice versa.
#[derive(Debug, Clone, Default)]
pub struct MergedDataset {
    pub valid: Vec<ValidRecord>,
    pub anomalies: Vec<AnomalyRecord>,
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// One row of the canonical student registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Student name – the unique key.
    pub name: String,
    /// Student id, kept as a string so leading zeros survive.
    pub student_id: String,
}

/// The authoritative name-to-id registry, loaded once and immutable for
/// the run. Preserves file order for report output.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster from parsed entries. A duplicate name overwrites the
    /// earlier entry's id, keeping the original position.
    pub fn from_entries(entries: Vec<RosterEntry>) -> Roster {
        let mut roster = Roster::default();
        for entry in entries {
            match roster.index.get(&entry.name) {
                Some(&pos) => roster.entries[pos].student_id = entry.student_id,
                None => {
                    roster.index.insert(entry.name.clone(), roster.entries.len());
                    roster.entries.push(entry);
                }
            }
        }
        roster
    }

    /// Whether `name` is a known student.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up the student id for `name`.
    pub fn student_id(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&pos| self.entries[pos].student_id.as_str())
    }

    /// Iterate entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
