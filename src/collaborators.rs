//! External collaborator seams
//!
//! The engine consults two outside services per generation:
//!
//! - **Vetting lookup**: whether the transaction's documents need pre-vetting
//!   and for how long
//! - **Reference timetable search**: precedent timetables shown alongside the
//!   generated one
//!
//! Both are async and may fail or hang. The engine treats any failure as
//! "no additional context" and carries on with its built-in tables.

use anyhow::Result;
use async_trait::async_trait;

use crate::classify::{contains_phrase, normalize_transaction_type};
use crate::config::{TimetableConfig, VettingRule};
use crate::types::{ReferenceDocument, VettingInfo};

/// Vetting requirement lookup
#[async_trait]
pub trait VettingLookup: Send + Sync {
    async fn lookup(&self, transaction_type: &str) -> Result<VettingInfo>;

    /// Name for logging
    fn name(&self) -> &'static str;
}

/// Reference timetable search
#[async_trait]
pub trait ReferenceTimetableSearch: Send + Sync {
    async fn search(&self, transaction_type: &str) -> Result<Vec<ReferenceDocument>>;

    /// Name for logging
    fn name(&self) -> &'static str;
}

/// Reports that no vetting is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVettingLookup;

#[async_trait]
impl VettingLookup for NoVettingLookup {
    async fn lookup(&self, transaction_type: &str) -> Result<VettingInfo> {
        Ok(VettingInfo::not_required(transaction_type))
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferenceSearch;

#[async_trait]
impl ReferenceTimetableSearch for NoReferenceSearch {
    async fn search(&self, _transaction_type: &str) -> Result<Vec<ReferenceDocument>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Vetting lookup backed by `[[vetting]]` config entries.
///
/// Rules are tried in order; the first keyword found (on word boundaries) in
/// the normalized transaction type wins.
#[derive(Debug, Clone, Default)]
pub struct StaticVettingTable {
    rules: Vec<(String, VettingRule)>,
}

impl StaticVettingTable {
    pub fn new(rules: Vec<VettingRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| (normalize_transaction_type(&rule.keyword), rule))
            .collect();
        Self { rules }
    }

    pub fn from_config(config: &TimetableConfig) -> Self {
        Self::new(config.vetting.clone())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn matching_rule(&self, transaction_type: &str) -> Option<&VettingRule> {
        let normalized = normalize_transaction_type(transaction_type);
        self.rules
            .iter()
            .find(|(keyword, _)| !keyword.is_empty() && contains_phrase(&normalized, keyword))
            .map(|(_, rule)| rule)
    }
}

#[async_trait]
impl VettingLookup for StaticVettingTable {
    async fn lookup(&self, transaction_type: &str) -> Result<VettingInfo> {
        Ok(match self.matching_rule(transaction_type) {
            Some(rule) => VettingInfo {
                is_required: true,
                vetting_days: rule.vetting_days,
                headline_category: rule.headline_category.clone(),
                rule_reference: rule.rule_reference.clone(),
            },
            None => VettingInfo::not_required(transaction_type),
        })
    }

    fn name(&self) -> &'static str {
        "static-table"
    }
}
