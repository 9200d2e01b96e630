//! Timetable events

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One milestone in a generated timetable.
///
/// `day_offset` is signed: 0 is the anchor day, negative offsets are
/// preparatory steps (e.g. pre-vetting) before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEvent {
    pub day_offset: i64,
    pub date: NaiveDate,
    pub event_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_key_event: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vetting_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_reference: Option<String>,
}

impl TimetableEvent {
    pub fn new(day_offset: i64, date: NaiveDate, event_name: impl Into<String>) -> Self {
        Self {
            day_offset,
            date,
            event_name: event_name.into(),
            description: None,
            is_key_event: false,
            vetting_required: None,
            rule_reference: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(mut self) -> Self {
        self.is_key_event = true;
        self
    }

    pub fn vetted(mut self) -> Self {
        self.vetting_required = Some(true);
        self
    }

    pub fn rule(mut self, reference: impl Into<String>) -> Self {
        self.rule_reference = Some(reference.into());
        self
    }
}

/// A caller-supplied event appended to a generated timetable.
///
/// With `date` set the event is taken verbatim. Without it the engine
/// realizes the date from `day_offset` using the same calendar rules as
/// the built-in events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub day_offset: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub event_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_key_event: bool,
    #[serde(default)]
    pub rule_reference: Option<String>,
}

impl CustomEvent {
    pub fn new(day_offset: i64, event_name: impl Into<String>) -> Self {
        Self {
            day_offset,
            date: None,
            event_name: event_name.into(),
            description: None,
            is_key_event: false,
            rule_reference: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn key(mut self) -> Self {
        self.is_key_event = true;
        self
    }

    /// Materialize with a resolved date.
    pub fn into_event(self, date: NaiveDate) -> TimetableEvent {
        TimetableEvent {
            day_offset: self.day_offset,
            date,
            event_name: self.event_name,
            description: self.description,
            is_key_event: self.is_key_event,
            vetting_required: None,
            rule_reference: self.rule_reference,
        }
    }
}
