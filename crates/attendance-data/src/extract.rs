//! `HH:MM` token extraction from free-text cells.
//!
//! A cell may mix timestamps with arbitrary text (`"08:00 打卡 08:50补卡"`)
//! and yields zero, one, or many tokens.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

fn time_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{2}:\d{2}").expect("regex is valid"))
}

/// Extract every `HH:MM` token in `text`, left to right, and resolve each
/// against the given calendar day.
///
/// Tokens that do not form a valid instant – an impossible time like
/// `25:61`, or a day that does not exist in the month – are dropped
/// silently; they never become events or anomalies.
pub fn extract_timestamps(text: &str, year: i32, month: u32, day: u32) -> Vec<NaiveDateTime> {
    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return Vec::new();
    };

    time_token_regex()
        .find_iter(text)
        .filter_map(|m| {
            let (h, min) = m.as_str().split_once(':')?;
            let hour: u32 = h.parse().ok()?;
            let minute: u32 = min.parse().ok()?;
            let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
            Some(date.and_time(time))
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
