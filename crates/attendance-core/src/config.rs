use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

// ── Config ────────────────────────────────────────────────────────────────────

/// Immutable run configuration threaded through the pipeline.
///
/// Defaults mirror the production setup; a JSON file may override any
/// subset of fields (missing fields keep their defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum morning-session length in minutes.
    pub morning_min_minutes: i64,
    /// Minimum evening-session length in minutes.
    pub evening_min_minutes: i64,
    /// 1-based row number of the header row in the attendance sheet.
    pub header_row: u32,
    /// Static corrections applied to known misspelled or garbled names
    /// before roster lookup.
    pub name_corrections: HashMap<String, String>,
    /// Class label written into the cumulative workbook.
    pub class_label: String,
    /// Name of the sheet holding check-in times in every source workbook.
    pub sheet_name: String,
}

impl Default for Config {
    fn default() -> Config {
        let mut name_corrections = HashMap::new();
        name_corrections.insert("D".to_string(), "邓博".to_string());
        name_corrections.insert("何沅政DZ250027".to_string(), "何沅政".to_string());

        Config {
            morning_min_minutes: 45,
            evening_min_minutes: 60,
            header_row: 4,
            name_corrections,
            class_label: "信息管理与信息系统01".to_string(),
            sheet_name: "打卡时间".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Falls back to the defaults when the file is absent or unparsable,
    /// logging a warning in the latter case.
    pub fn load_from(path: &Path) -> Config {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Config::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unparsable config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Normalise a raw name through the correction table.
    pub fn correct_name<'a>(&'a self, raw: &'a str) -> &'a str {
        self.name_corrections
            .get(raw)
            .map(String::as_str)
            .unwrap_or(raw)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
