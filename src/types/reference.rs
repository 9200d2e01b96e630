//! Inputs supplied by external collaborators

use serde::{Deserialize, Serialize};

/// Vetting requirement for a transaction, as reported by the vetting lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VettingInfo {
    pub is_required: bool,
    /// Business days of pre-vetting before the anchor day.
    pub vetting_days: u32,
    pub headline_category: String,
    #[serde(default)]
    pub rule_reference: Option<String>,
}

impl VettingInfo {
    /// The "no additional context" value used when the lookup is absent or fails.
    pub fn not_required(transaction_type: &str) -> Self {
        Self {
            is_required: false,
            vetting_days: 0,
            headline_category: transaction_type.to_string(),
            rule_reference: None,
        }
    }
}

/// A historical or precedent timetable surfaced by reference search.
///
/// Display only. The engine never derives offsets from these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    pub title: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
}
