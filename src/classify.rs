//! Transaction classification
//!
//! Maps the caller's free-text transaction type onto a [`TransactionArchetype`].
//! Parsing intent is kept apart from building the timetable: the engine only
//! ever dispatches on the enum.
//!
//! ## Matching
//!
//! The input is lowercased and separators (`_`, `-`, `/`, runs of whitespace)
//! collapse to single spaces, so `"Rights_Issue"` and `"rights-issue"` both
//! read as `"rights issue"`. Aliases match on whole words only, which keeps
//! `"rto"` from firing inside `"portfolio"`.
//!
//! Archetypes are tried in [`PRIORITY`] order. More specific phrases come
//! first: a "very substantial acquisition" is never a plain major transaction,
//! and a "major connected transaction" is a connected transaction.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionArchetype {
    ReverseTakeover,
    VerySubstantialAcquisition,
    VerySubstantialDisposal,
    ConnectedTransaction,
    MajorTransaction,
    RightsIssue,
    OpenOffer,
    /// Anything without a recognisable keyword.
    Generic,
}

/// Match order. `Generic` is the implicit fall-through and is not listed.
pub const PRIORITY: [TransactionArchetype; 7] = [
    TransactionArchetype::ReverseTakeover,
    TransactionArchetype::VerySubstantialAcquisition,
    TransactionArchetype::VerySubstantialDisposal,
    TransactionArchetype::ConnectedTransaction,
    TransactionArchetype::MajorTransaction,
    TransactionArchetype::RightsIssue,
    TransactionArchetype::OpenOffer,
];

impl TransactionArchetype {
    /// Normalized phrases that select this archetype.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            TransactionArchetype::ReverseTakeover => &["reverse takeover", "rto"],
            TransactionArchetype::VerySubstantialAcquisition => {
                &["very substantial acquisition", "vsa"]
            }
            TransactionArchetype::VerySubstantialDisposal => &["very substantial disposal", "vsd"],
            TransactionArchetype::ConnectedTransaction => &["connected transaction", "connected"],
            TransactionArchetype::MajorTransaction => &["major transaction", "major"],
            TransactionArchetype::RightsIssue => &["rights issue", "rights"],
            TransactionArchetype::OpenOffer => &["open offer"],
            TransactionArchetype::Generic => &[],
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionArchetype::ReverseTakeover => "Reverse Takeover",
            TransactionArchetype::VerySubstantialAcquisition => "Very Substantial Acquisition",
            TransactionArchetype::VerySubstantialDisposal => "Very Substantial Disposal",
            TransactionArchetype::ConnectedTransaction => "Connected Transaction",
            TransactionArchetype::MajorTransaction => "Major Transaction",
            TransactionArchetype::RightsIssue => "Rights Issue",
            TransactionArchetype::OpenOffer => "Open Offer",
            TransactionArchetype::Generic => "Generic Transaction",
        }
    }

    /// Whether the approval-required / standard split applies.
    pub fn has_approval_scenarios(&self) -> bool {
        matches!(
            self,
            TransactionArchetype::RightsIssue | TransactionArchetype::OpenOffer
        )
    }
}

impl std::fmt::Display for TransactionArchetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[\s_\-/]+").expect("separator pattern compiles"))
}

/// Lowercase, trim, and collapse separators to single spaces.
pub fn normalize_transaction_type(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    separators().replace_all(&lowered, " ").trim().to_string()
}

/// Whether `phrase` occurs in `normalized` on word boundaries.
pub fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    format!(" {normalized} ").contains(&format!(" {phrase} "))
}

/// Classify a free-text transaction type. Never fails.
pub fn classify_transaction(input: &str) -> TransactionArchetype {
    let normalized = normalize_transaction_type(input);
    PRIORITY
        .into_iter()
        .find(|archetype| {
            archetype
                .aliases()
                .iter()
                .any(|alias| contains_phrase(&normalized, alias))
        })
        .unwrap_or(TransactionArchetype::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_transaction_type("  Rights_Issue "), "rights issue");
        assert_eq!(normalize_transaction_type("open-offer"), "open offer");
        assert_eq!(normalize_transaction_type("VSA / Major"), "vsa major");
        assert_eq!(normalize_transaction_type(""), "");
    }

    #[test]
    fn test_basic_aliases() {
        assert_eq!(classify_transaction("rights_issue"), TransactionArchetype::RightsIssue);
        assert_eq!(classify_transaction("open_offer"), TransactionArchetype::OpenOffer);
        assert_eq!(classify_transaction("Major"), TransactionArchetype::MajorTransaction);
        assert_eq!(classify_transaction("VSA"), TransactionArchetype::VerySubstantialAcquisition);
        assert_eq!(classify_transaction("vsd"), TransactionArchetype::VerySubstantialDisposal);
        assert_eq!(classify_transaction("RTO"), TransactionArchetype::ReverseTakeover);
        assert_eq!(
            classify_transaction("Connected Transaction"),
            TransactionArchetype::ConnectedTransaction
        );
    }

    #[test]
    fn test_priority_resolves_overlaps() {
        assert_eq!(
            classify_transaction("very substantial acquisition"),
            TransactionArchetype::VerySubstantialAcquisition
        );
        assert_eq!(
            classify_transaction("major connected transaction"),
            TransactionArchetype::ConnectedTransaction
        );
        assert_eq!(
            classify_transaction("reverse takeover via very substantial acquisition"),
            TransactionArchetype::ReverseTakeover
        );
        assert_eq!(
            classify_transaction("major transaction funded by rights issue"),
            TransactionArchetype::MajorTransaction
        );
    }

    #[test]
    fn test_whole_word_matching() {
        assert_eq!(classify_transaction("portfolio rebalancing"), TransactionArchetype::Generic);
        assert_eq!(classify_transaction("copyrights licence"), TransactionArchetype::Generic);
        assert_eq!(classify_transaction("majority placing"), TransactionArchetype::Generic);
    }

    #[test]
    fn test_unrecognised_falls_through() {
        assert_eq!(classify_transaction(""), TransactionArchetype::Generic);
        assert_eq!(classify_transaction("share consolidation"), TransactionArchetype::Generic);
    }

    #[test]
    fn test_approval_scenarios() {
        assert!(TransactionArchetype::RightsIssue.has_approval_scenarios());
        assert!(TransactionArchetype::OpenOffer.has_approval_scenarios());
        assert!(!TransactionArchetype::MajorTransaction.has_approval_scenarios());
    }
}
