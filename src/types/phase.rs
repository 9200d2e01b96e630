//! Timetable phase classification

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    CIRCULAR_PREPARATION_LAST_DAY, REGULATORY_REVIEW_LAST_DAY, SHAREHOLDER_APPROVAL_LAST_DAY,
};

/// Coarse display bucket for a day offset. Not a state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimetablePhase {
    Announcement,
    CircularPreparation,
    RegulatoryReview,
    ShareholderApproval,
    Completion,
}

impl TimetablePhase {
    pub fn display_name(&self) -> &'static str {
        match self {
            TimetablePhase::Announcement => "Announcement",
            TimetablePhase::CircularPreparation => "Circular Preparation",
            TimetablePhase::RegulatoryReview => "Regulatory Review",
            TimetablePhase::ShareholderApproval => "Shareholder Approval",
            TimetablePhase::Completion => "Completion",
        }
    }
}

impl std::fmt::Display for TimetablePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Classify a day offset.
///
/// Offsets at or before the anchor (including negative pre-vetting days)
/// are `Announcement`.
pub fn get_phase_for_day(day: i64) -> TimetablePhase {
    match day {
        d if d <= 0 => TimetablePhase::Announcement,
        d if d <= CIRCULAR_PREPARATION_LAST_DAY => TimetablePhase::CircularPreparation,
        d if d <= REGULATORY_REVIEW_LAST_DAY => TimetablePhase::RegulatoryReview,
        d if d <= SHAREHOLDER_APPROVAL_LAST_DAY => TimetablePhase::ShareholderApproval,
        _ => TimetablePhase::Completion,
    }
}
