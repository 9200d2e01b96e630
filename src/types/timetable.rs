//! Generated timetable

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::{ReferenceDocument, TimetableEvent, VettingInfo};
use crate::calendar::BusinessDayOptions;
use crate::classify::TransactionArchetype;

/// How far the engine had to degrade to produce a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// The matched builder succeeded.
    #[default]
    None,
    /// The matched builder failed and the generic builder stood in.
    GenericBuilder,
    /// Even the generic builder failed; a single announcement placeholder was returned.
    Placeholder,
}

/// Result of one `generate_timetable` call.
#[derive(Debug, Clone)]
pub struct Timetable {
    /// Transaction type as the caller phrased it (after empty-input substitution).
    pub transaction_type: String,
    pub archetype: TransactionArchetype,
    pub start_date: NaiveDate,
    /// Approval-required scenario selected. Only rights issues and open
    /// offers have a standard alternative.
    pub approval_required: bool,
    /// Offsets realized as business days (false: calendar days).
    pub adjust_for_holidays: bool,
    /// Effective calendar rules, after request overrides.
    pub calendar: BusinessDayOptions,
    /// Sorted by `day_offset`, ties in insertion order.
    pub events: Vec<TimetableEvent>,
    pub vetting: VettingInfo,
    pub references: Vec<ReferenceDocument>,
    pub generated_at: DateTime<Tz>,
    pub fallback: Fallback,
}

impl Timetable {
    pub fn key_events(&self) -> impl Iterator<Item = &TimetableEvent> {
        self.events.iter().filter(|e| e.is_key_event)
    }

    pub fn find(&self, event_name: &str) -> Option<&TimetableEvent> {
        self.events.iter().find(|e| e.event_name == event_name)
    }

    pub fn is_degraded(&self) -> bool {
        self.fallback != Fallback::None
    }
}
