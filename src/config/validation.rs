//! Config validation: unknown-key detection with Levenshtein suggestions
//! and calendar sanity checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::calendar::{get_holiday_info, is_weekend};

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for TimetableConfig.
///
/// Keys inside `[[vetting]]` entries are listed under `vetting.` since
/// every array element shares one schema.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [calendar]
        "calendar",
        "calendar.exclude_weekends",
        "calendar.exclude_holidays",
        "calendar.custom_holidays",
        // [timetable]
        "timetable",
        "timetable.adjust_for_holidays",
        "timetable.require_shareholder_approval",
        "timetable.default_transaction_type",
        // [collaborators]
        "collaborators",
        "collaborators.timeout_ms",
        // [[vetting]]
        "vetting",
        "vetting.keyword",
        "vetting.vetting_days",
        "vetting.headline_category",
        "vetting.rule_reference",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// A table `{ a = { b = 1 } }` yields `["a", "a.b"]`. Arrays of tables are
/// walked element by element under the array's own path, so
/// `[[v]] k = 1` yields `["v", "v.k"]`. Duplicates are removed.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            } else if let Some(items) = v.as_array() {
                for item in items.iter().filter(|i| i.is_table()) {
                    for key in walk_toml_keys(item, &path) {
                        if !keys.contains(&key) {
                            keys.push(key);
                        }
                    }
                }
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys. It only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Calendar Sanity
// ============================================================================

/// Suspicious-but-legal calendar settings.
///
/// Custom holidays that already fall on a weekend or a gazetted holiday
/// have no effect; switching off both exclusions makes every day a
/// business day.
pub fn validate_calendar_sanity(config: &super::TimetableConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let cal = &config.calendar;

    if !cal.exclude_weekends && !cal.exclude_holidays {
        warnings.push(ValidationWarning {
            field: "calendar".to_string(),
            message: "exclude_weekends and exclude_holidays are both false; every day counts as a business day"
                .to_string(),
            suggestion: None,
        });
    }

    for date in &cal.custom_holidays {
        if let Some(holiday) = get_holiday_info(*date) {
            warnings.push(ValidationWarning {
                field: "calendar.custom_holidays".to_string(),
                message: format!("custom holiday {date} is already a public holiday ({})", holiday.name),
                suggestion: None,
            });
        } else if cal.exclude_weekends && is_weekend(*date) {
            warnings.push(ValidationWarning {
                field: "calendar.custom_holidays".to_string(),
                message: format!("custom holiday {date} falls on a weekend"),
                suggestion: None,
            });
        }
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================
