//! Timetable Orchestrator
//!
//! End-to-end generation of a timetable from a start date and a free-text
//! transaction type.
//!
//! ## Pipeline
//!
//! 1. Sanitize input: empty type → configured default, bad start date → today
//! 2. Classify the transaction type into an archetype
//! 3. Fan out to the vetting lookup and reference search (joined, each bounded)
//! 4. Pre-vetting events (when vetting is required)
//! 5. Archetype builder, falling back to the generic builder on failure
//! 6. Custom events, realized from their offset when undated
//! 7. Stable sort by day offset
//!
//! ## Failure Policy
//!
//! Generation never fails. A failing builder degrades to the generic
//! timetable; if that fails too the result is a single day-0
//! "Transaction Announcement" placeholder. Pre-vetting events that cannot be
//! dated are dropped. Collaborator errors and timeouts degrade to "no
//! additional context". The degradation level is recorded in
//! [`Timetable::fallback`].

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::calendar::{covers_year, parse_date, Clock, SystemClock};
use crate::classify::{classify_transaction, TransactionArchetype};
use crate::collaborators::{
    NoReferenceSearch, NoVettingLookup, ReferenceTimetableSearch, StaticVettingTable,
    VettingLookup,
};
use crate::config::defaults::PLACEHOLDER_EVENT_NAME;
use crate::config::TimetableConfig;
use crate::phases::{build_phase, PhaseContext, PhaseError};
use crate::render;
use crate::types::{
    CustomEvent, Fallback, ReferenceDocument, Timetable, TimetableEvent, VettingInfo,
};

// ============================================================================
// Request
// ============================================================================

/// Where the timetable is anchored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartDate {
    /// The engine clock's current Hong Kong date.
    #[default]
    Today,
    On(NaiveDate),
    /// Raw caller input, parsed with [`parse_date`]. Invalid text falls back to today.
    Text(String),
}

/// Parameters of one generation. Unset options fall back to the engine config.
#[derive(Debug, Clone, Default)]
pub struct TimetableRequest {
    pub start: StartDate,
    pub transaction_type: String,
    pub include_weekends: Option<bool>,
    pub adjust_for_holidays: Option<bool>,
    /// Override of the approval-required default for rights issues and open offers.
    pub shareholder_approval: Option<bool>,
    pub custom_events: Vec<CustomEvent>,
}

impl TimetableRequest {
    pub fn new(transaction_type: impl Into<String>) -> Self {
        Self {
            transaction_type: transaction_type.into(),
            ..Self::default()
        }
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start = StartDate::On(date);
        self
    }

    pub fn starting_str(mut self, text: impl Into<String>) -> Self {
        self.start = StartDate::Text(text.into());
        self
    }

    pub fn including_weekends(mut self, include: bool) -> Self {
        self.include_weekends = Some(include);
        self
    }

    pub fn adjusting_for_holidays(mut self, adjust: bool) -> Self {
        self.adjust_for_holidays = Some(adjust);
        self
    }

    pub fn with_shareholder_approval(mut self, required: bool) -> Self {
        self.shareholder_approval = Some(required);
        self
    }

    pub fn with_custom_event(mut self, event: CustomEvent) -> Self {
        self.custom_events.push(event);
        self
    }
}

// ============================================================================
// Engine
// ============================================================================

pub struct TimetableEngine {
    config: TimetableConfig,
    clock: Arc<dyn Clock>,
    vetting: Arc<dyn VettingLookup>,
    references: Arc<dyn ReferenceTimetableSearch>,
}

impl TimetableEngine {
    /// Engine on the system clock. Vetting comes from the config's
    /// `[[vetting]]` table when it has entries.
    pub fn new(config: TimetableConfig) -> Self {
        let vetting: Arc<dyn VettingLookup> = if config.vetting.is_empty() {
            Arc::new(NoVettingLookup)
        } else {
            Arc::new(StaticVettingTable::from_config(&config))
        };
        Self {
            config,
            clock: Arc::new(SystemClock),
            vetting,
            references: Arc::new(NoReferenceSearch),
        }
    }

    /// Engine configured through [`TimetableConfig::load`].
    pub fn from_env() -> Self {
        Self::new(TimetableConfig::load())
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_vetting_lookup(mut self, lookup: Arc<dyn VettingLookup>) -> Self {
        self.vetting = lookup;
        self
    }

    pub fn with_reference_search(mut self, search: Arc<dyn ReferenceTimetableSearch>) -> Self {
        self.references = search;
        self
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Generate a timetable. Always returns at least one event.
    pub async fn generate_timetable(&self, request: &TimetableRequest) -> Timetable {
        let transaction_type = match request.transaction_type.trim() {
            "" => self.config.timetable.default_transaction_type.clone(),
            t => t.to_string(),
        };
        let start_date = self.resolve_start(&request.start);
        let archetype = classify_transaction(&transaction_type);
        let approval_required = request
            .shareholder_approval
            .unwrap_or(self.config.timetable.require_shareholder_approval);
        let adjust_for_holidays = request
            .adjust_for_holidays
            .unwrap_or(self.config.timetable.adjust_for_holidays);

        let mut options = self.config.calendar.clone();
        if let Some(include) = request.include_weekends {
            options.exclude_weekends = !include;
        }

        info!(
            transaction_type = %transaction_type,
            archetype = %archetype,
            start = %start_date,
            approval_required,
            adjust_for_holidays,
            "Generating timetable"
        );

        if adjust_for_holidays && options.exclude_holidays && !covers_year(start_date.year()) {
            warn!(
                year = start_date.year(),
                "Holiday table does not cover the start year; only weekends and custom holidays are excluded"
            );
        }

        let (vetting, references) = self.fetch_context(&transaction_type).await;

        let ctx = PhaseContext::new(start_date, adjust_for_holidays, options.clone());
        let (events, fallback) = match assemble(
            archetype,
            &ctx,
            approval_required,
            &vetting,
            &request.custom_events,
        ) {
            Ok(assembled) => assembled,
            Err(e) => {
                error!(
                    archetype = %archetype,
                    error = %e,
                    "Timetable pipeline failed, returning placeholder"
                );
                (vec![placeholder_event(start_date)], Fallback::Placeholder)
            }
        };

        Timetable {
            transaction_type,
            archetype,
            start_date,
            approval_required,
            adjust_for_holidays,
            calendar: options,
            events,
            vetting,
            references,
            generated_at: self.clock.now(),
            fallback,
        }
    }

    /// Generate from today's date and render as markdown.
    pub async fn generate_dynamic_timetable(&self, transaction_type: &str) -> String {
        let timetable = self
            .generate_timetable(&TimetableRequest::new(transaction_type))
            .await;
        render::to_markdown(&timetable)
    }

    fn resolve_start(&self, start: &StartDate) -> NaiveDate {
        match start {
            StartDate::Today => self.clock.today(),
            StartDate::On(date) => *date,
            StartDate::Text(text) => parse_date(text).unwrap_or_else(|e| {
                warn!(input = %text, error = %e, "Invalid start date, using today");
                self.clock.today()
            }),
        }
    }

    /// Query both collaborators concurrently. Failures and timeouts become
    /// "no additional context".
    async fn fetch_context(&self, transaction_type: &str) -> (VettingInfo, Vec<ReferenceDocument>) {
        let timeout = self.config.collaborators.timeout();
        let (vetting, references) = tokio::join!(
            tokio::time::timeout(timeout, self.vetting.lookup(transaction_type)),
            tokio::time::timeout(timeout, self.references.search(transaction_type)),
        );

        let vetting = match vetting {
            Ok(Ok(info)) => info,
            Ok(Err(e)) => {
                warn!(collaborator = self.vetting.name(), error = %e, "Vetting lookup failed, assuming no vetting");
                VettingInfo::not_required(transaction_type)
            }
            Err(_) => {
                warn!(
                    collaborator = self.vetting.name(),
                    timeout_ms = self.config.collaborators.timeout_ms,
                    "Vetting lookup timed out, assuming no vetting"
                );
                VettingInfo::not_required(transaction_type)
            }
        };

        let references = match references {
            Ok(Ok(docs)) => docs,
            Ok(Err(e)) => {
                warn!(collaborator = self.references.name(), error = %e, "Reference search failed");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    collaborator = self.references.name(),
                    timeout_ms = self.config.collaborators.timeout_ms,
                    "Reference search timed out"
                );
                Vec::new()
            }
        };

        debug!(
            vetting_required = vetting.is_required,
            vetting_days = vetting.vetting_days,
            references = references.len(),
            "Collaborator context fetched"
        );
        (vetting, references)
    }
}

impl Default for TimetableEngine {
    fn default() -> Self {
        Self::new(TimetableConfig::default())
    }
}

/// Produced interface: today's timetable for `transaction_type`, as markdown,
/// using the config found by [`TimetableConfig::load`].
pub async fn generate_dynamic_timetable(transaction_type: &str) -> String {
    TimetableEngine::from_env()
        .generate_dynamic_timetable(transaction_type)
        .await
}

// ============================================================================
// Assembly
// ============================================================================

fn assemble(
    archetype: TransactionArchetype,
    ctx: &PhaseContext,
    approval_required: bool,
    vetting: &VettingInfo,
    custom_events: &[CustomEvent],
) -> Result<(Vec<TimetableEvent>, Fallback), PhaseError> {
    let mut events = vetting_events(ctx, vetting).unwrap_or_else(|e| {
        warn!(error = %e, "Cannot place pre-vetting events, omitting them");
        Vec::new()
    });

    let (built, fallback) = match build_phase(archetype, ctx, approval_required) {
        Ok(built) => (built, Fallback::None),
        Err(e) if archetype != TransactionArchetype::Generic => {
            warn!(
                archetype = %archetype,
                error = %e,
                "Phase builder failed, substituting generic timetable"
            );
            (
                build_phase(TransactionArchetype::Generic, ctx, approval_required)?,
                Fallback::GenericBuilder,
            )
        }
        Err(e) => return Err(e),
    };
    events.extend(built);
    events.extend(realize_custom_events(ctx, custom_events));

    // Stable: equal offsets keep insertion order
    events.sort_by_key(|e| e.day_offset);
    Ok((events, fallback))
}

/// Pre-vetting submission at `-vetting_days` and clearance at `-1`.
fn vetting_events(
    ctx: &PhaseContext,
    vetting: &VettingInfo,
) -> Result<Vec<TimetableEvent>, PhaseError> {
    if !vetting.is_required {
        return Ok(Vec::new());
    }

    let category = &vetting.headline_category;
    let mut submission = ctx
        .event(-i64::from(vetting.vetting_days), "Pre-Vetting Submission")?
        .described(format!("Submit draft {category} documents to the Exchange for pre-vetting"))
        .vetted()
        .key();
    let mut clearance = ctx
        .event(-1, "Vetting Clearance Received")?
        .described(format!(
            "Exchange confirms no further comments on the {category} documents"
        ))
        .vetted();
    if let Some(rule) = &vetting.rule_reference {
        submission = submission.rule(rule.clone());
        clearance = clearance.rule(rule.clone());
    }
    Ok(vec![submission, clearance])
}

/// Dated custom events pass through verbatim; undated ones are realized from
/// their offset. Events whose date cannot be realized are dropped.
fn realize_custom_events(ctx: &PhaseContext, custom_events: &[CustomEvent]) -> Vec<TimetableEvent> {
    custom_events
        .iter()
        .filter_map(|custom| {
            let date = match custom.date {
                Some(date) => date,
                None => match ctx.date_at(custom.day_offset) {
                    Ok(date) => date,
                    Err(e) => {
                        warn!(
                            event = %custom.event_name,
                            day = custom.day_offset,
                            error = %e,
                            "Dropping custom event with unrealizable date"
                        );
                        return None;
                    }
                },
            };
            Some(custom.clone().into_event(date))
        })
        .collect()
}

fn placeholder_event(start: NaiveDate) -> TimetableEvent {
    TimetableEvent::new(0, start, PLACEHOLDER_EVENT_NAME)
        .described("Announce the transaction; a detailed timetable could not be generated")
        .key()
}
