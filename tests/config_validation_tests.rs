//! Config Validation Tests
//!
//! Typo detection, consistency validation and file loading for
//! `TimetableConfig`, exercised independently from the engine.

use std::io::Write;

use chrono::NaiveDate;
use hkex_timetable::config::validation::{
    known_config_keys, suggest_correction, validate_calendar_sanity, validate_unknown_keys,
};
use hkex_timetable::config::{ConfigError, TimetableConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_calendar_key_warns_with_suggestion() {
    let toml_str = r#"
[calendar]
exclude_weekend = false
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("exclude_weekend"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("calendar.exclude_weekends"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_inside_vetting_entry_warns() {
    let toml_str = r#"
[[vetting]]
keyword = "rights issue"
vetting_dayz = 10
headline_category = "Rights Issue"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "vetting.vetting_dayz");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("vetting.vetting_days"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[calendar]
exclude_weekends = true
exclude_holidays = true
custom_holidays = ["2025-09-10"]

[timetable]
adjust_for_holidays = true
require_shareholder_approval = true
default_transaction_type = "generic transaction"

[collaborators]
timeout_ms = 5000

[[vetting]]
keyword = "rights issue"
vetting_days = 10
headline_category = "Rights Issue"
rule_reference = "Rule 7.19A"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn unknown_section_warns_without_suggestion() {
    let warnings = validate_unknown_keys("[dashboard]\nport = 8080\n");
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
}

#[test]
fn empty_toml_produces_zero_warnings() {
    assert!(validate_unknown_keys("").is_empty());
}

#[test]
fn known_keys_set_is_complete() {
    let known = known_config_keys();
    for key in [
        "calendar.custom_holidays",
        "timetable.default_transaction_type",
        "collaborators.timeout_ms",
        "vetting.rule_reference",
    ] {
        assert!(known.contains(key), "missing {key}");
    }
}

#[test]
fn suggest_correction_returns_none_for_garbage() {
    let known = known_config_keys();
    assert_eq!(suggest_correction("zzzzzzzzzzzzzzzz", &known), None);
}

#[test]
fn unknown_keys_do_not_break_loading() {
    let config = TimetableConfig::from_toml_str("[timetable]\nadjust_for_holiday = false\n").unwrap();
    // Misspelt key is ignored, default stays in force
    assert!(config.timetable.adjust_for_holidays);
}

// ============================================================================
// Consistency Validation
// ============================================================================

#[test]
fn all_defaults_pass_validation() {
    assert!(TimetableConfig::default().validate().is_ok());
}

#[test]
fn duplicate_custom_holiday_is_error() {
    let err = TimetableConfig::from_toml_str(
        r#"
[calendar]
custom_holidays = ["2025-09-10", "2025-09-10"]
"#,
    )
    .unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("2025-09-10"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn excessive_vetting_days_is_error() {
    let err = TimetableConfig::from_toml_str(
        r#"
[[vetting]]
keyword = "rights issue"
vetting_days = 121
headline_category = "Rights Issue"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = TimetableConfig::from_toml_str("[collaborators\ntimeout_ms = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
}

#[test]
fn wrong_value_type_is_parse_error() {
    let err = TimetableConfig::from_toml_str("[collaborators]\ntimeout_ms = \"fast\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
}

#[test]
fn calendar_sanity_flags_redundant_custom_holidays() {
    let mut config = TimetableConfig::default();
    config.calendar.custom_holidays = vec![
        // Christmas Day, already gazetted
        NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
        // Saturday
        NaiveDate::from_ymd_opt(2025, 9, 13).unwrap(),
        // Wednesday, a genuine ad-hoc closure
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
    ];
    let warnings = validate_calendar_sanity(&config);
    assert_eq!(warnings.len(), 2, "{warnings:?}");
    assert!(warnings[0].message.contains("Christmas"));
    assert!(warnings[1].message.contains("weekend"));
}

#[test]
fn calendar_sanity_flags_disabled_exclusions() {
    let mut config = TimetableConfig::default();
    config.calendar.exclude_weekends = false;
    config.calendar.exclude_holidays = false;
    assert_eq!(validate_calendar_sanity(&config).len(), 1);
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn load_from_file_reads_all_sections() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[calendar]
custom_holidays = ["2025-09-10"]

[timetable]
require_shareholder_approval = false

[collaborators]
timeout_ms = 250

[[vetting]]
keyword = "open offer"
vetting_days = 5
headline_category = "Open Offer"
"#
    )
    .unwrap();

    let config = TimetableConfig::load_from_file(file.path()).unwrap();
    assert_eq!(
        config.calendar.custom_holidays,
        vec![NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()]
    );
    assert!(!config.timetable.require_shareholder_approval);
    assert_eq!(config.collaborators.timeout_ms, 250);
    assert_eq!(config.vetting.len(), 1);
    assert_eq!(config.vetting[0].rule_reference, None);
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TimetableConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn save_then_load_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timetable.toml");

    let mut config = TimetableConfig::default();
    config.collaborators.timeout_ms = 1_500;
    config.timetable.default_transaction_type = "placing".to_string();
    config.save_to_file(&path).unwrap();

    let reloaded = TimetableConfig::load_from_file(&path).unwrap();
    assert_eq!(reloaded, config);
    assert!(reloaded.validate().is_ok());
}
