//! Session validation: cardinality and duration rules.
//!
//! Groups one file's check-in events by (name, date, window) and decides,
//! per group, whether the session counts or is flagged as an anomaly.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::Config;
use crate::models::{
    AnomalyReason, AnomalyRecord, CheckinEvent, Roster, SessionKey, ValidRecord,
};

/// Validate all check-in events of one source file.
///
/// Each (name, date, window) group produces exactly one outcome:
///
/// 1. the name is not in the roster → anomaly, no further checks;
/// 2. fewer than two check-ins → anomaly;
/// 3. the span from earliest to latest check-in, truncated to whole
///    minutes, is compared against the window's minimum – pass gives a
///    valid record, fail an anomaly.
///
/// The grouping key alone determines the output; input order is
/// irrelevant. Results come back in key order.
pub fn validate_sessions(
    events: &[CheckinEvent],
    roster: &Roster,
    config: &Config,
) -> (Vec<ValidRecord>, Vec<AnomalyRecord>) {
    // BTreeMap keeps per-file output deterministic.
    let mut groups: BTreeMap<SessionKey, Vec<&CheckinEvent>> = BTreeMap::new();
    for event in events {
        let key = SessionKey {
            name: event.name.clone(),
            date: event.date,
            window: event.window,
        };
        groups.entry(key).or_default().push(event);
    }

    let mut valid: Vec<ValidRecord> = Vec::new();
    let mut anomalies: Vec<AnomalyRecord> = Vec::new();

    for (key, group) in groups {
        if !roster.contains(&key.name) {
            anomalies.push(anomaly(key, AnomalyReason::NotInRoster));
            continue;
        }

        if group.len() < 2 {
            let count = group.len();
            anomalies.push(anomaly(key, AnomalyReason::InsufficientCheckins { count }));
            continue;
        }

        let mut earliest = group[0].timestamp;
        let mut latest = group[0].timestamp;
        for event in &group[1..] {
            if event.timestamp < earliest {
                earliest = event.timestamp;
            }
            if event.timestamp > latest {
                latest = event.timestamp;
            }
        }

        let minutes = (latest - earliest).num_minutes();
        if minutes >= key.window.required_minutes(config) {
            valid.push(ValidRecord {
                name: key.name,
                date: key.date,
                window: key.window,
            });
        } else {
            anomalies.push(anomaly(key, AnomalyReason::InsufficientDuration { minutes }));
        }
    }

    debug!(
        "Validated {} events into {} valid sessions, {} anomalies",
        events.len(),
        valid.len(),
        anomalies.len()
    );

    (valid, anomalies)
}

fn anomaly(key: SessionKey, reason: AnomalyReason) -> AnomalyRecord {
    AnomalyRecord {
        name: key.name,
        date: key.date,
        window: key.window,
        reason,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
