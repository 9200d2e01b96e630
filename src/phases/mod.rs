//! Phase Builders
//!
//! One builder per transaction archetype. Each encodes the fixed sequence of
//! regulatory milestones as day offsets from an anchor date and realizes them
//! into calendar dates through [`PhaseContext`].
//!
//! ## Offset Realization
//!
//! - `adjust_for_holidays = true`: offsets are Hong Kong business days
//! - `adjust_for_holidays = false`: offsets are plain calendar days
//!
//! Rights-issue and open-offer trading events are always business-day offsets
//! from the realized record date, since they track trading days.
//!
//! ## Scenarios
//!
//! Rights issues and open offers come in an approval-required and a standard
//! variant. The other archetypes have a single sequence.

pub mod connected;
pub mod entitlement;
pub mod generic;
pub mod notifiable;
pub mod reverse_takeover;

pub use entitlement::OfferKind;
pub use notifiable::SubstantialSide;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::calendar::{self, BusinessDayOptions, CalendarError};
use crate::classify::TransactionArchetype;
use crate::types::TimetableEvent;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseError {
    #[error("Cannot place '{event}' at day {day}: {source}")]
    Calendar {
        day: i64,
        event: String,
        #[source]
        source: CalendarError,
    },

    #[error("{0} builder produced no events")]
    Empty(TransactionArchetype),
}

// ============================================================================
// Phase Context
// ============================================================================

/// Anchor date plus the calendar rules used to realize offsets.
#[derive(Debug, Clone)]
pub struct PhaseContext {
    pub anchor: NaiveDate,
    pub adjust_for_holidays: bool,
    pub options: BusinessDayOptions,
}

impl PhaseContext {
    pub fn new(anchor: NaiveDate, adjust_for_holidays: bool, options: BusinessDayOptions) -> Self {
        Self {
            anchor,
            adjust_for_holidays,
            options,
        }
    }

    /// Calendar date of a day offset from the anchor.
    pub fn date_at(&self, offset: i64) -> Result<NaiveDate, CalendarError> {
        if self.adjust_for_holidays {
            calendar::add_business_days(self.anchor, offset, &self.options)
        } else {
            calendar::add_calendar_days(self.anchor, offset)
        }
    }

    /// An event at `day`, dated through [`PhaseContext::date_at`].
    pub fn event(&self, day: i64, name: &str) -> Result<TimetableEvent, PhaseError> {
        let date = self.date_at(day).map_err(|source| PhaseError::Calendar {
            day,
            event: name.to_string(),
            source,
        })?;
        Ok(TimetableEvent::new(day, date, name))
    }

    /// An event `trading_days` business days from `base`, recorded at `day`.
    pub fn trading_event(
        &self,
        base: NaiveDate,
        trading_days: i64,
        day: i64,
        name: &str,
    ) -> Result<TimetableEvent, PhaseError> {
        let date = calendar::add_business_days(base, trading_days, &self.options).map_err(
            |source| PhaseError::Calendar {
                day,
                event: name.to_string(),
                source,
            },
        )?;
        Ok(TimetableEvent::new(day, date, name))
    }
}

/// Run the builder for `archetype`.
///
/// `approval_required` selects the scenario for rights issues and open
/// offers and is ignored elsewhere.
pub fn build_phase(
    archetype: TransactionArchetype,
    ctx: &PhaseContext,
    approval_required: bool,
) -> Result<Vec<TimetableEvent>, PhaseError> {
    let events = match archetype {
        TransactionArchetype::RightsIssue => {
            entitlement::build(ctx, OfferKind::RightsIssue, approval_required)
        }
        TransactionArchetype::OpenOffer => {
            entitlement::build(ctx, OfferKind::OpenOffer, approval_required)
        }
        TransactionArchetype::MajorTransaction => notifiable::major_transaction(ctx),
        TransactionArchetype::VerySubstantialAcquisition => {
            notifiable::very_substantial(ctx, SubstantialSide::Acquisition)
        }
        TransactionArchetype::VerySubstantialDisposal => {
            notifiable::very_substantial(ctx, SubstantialSide::Disposal)
        }
        TransactionArchetype::ConnectedTransaction => connected::build(ctx),
        TransactionArchetype::ReverseTakeover => reverse_takeover::build(ctx),
        TransactionArchetype::Generic => generic::build(ctx),
    }?;

    if events.is_empty() {
        return Err(PhaseError::Empty(archetype));
    }

    debug!(
        archetype = %archetype,
        approval_required,
        events = events.len(),
        "Phase builder completed"
    );
    Ok(events)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_date_at_business_vs_calendar() {
        let business = ctx();
        // Tue 19 Aug + 5 business days = Tue 26 Aug
        assert_eq!(business.date_at(5), Ok(date(2025, 8, 26)));

        let calendar_days = PhaseContext::new(date(2025, 8, 19), false, BusinessDayOptions::default());
        assert_eq!(calendar_days.date_at(5), Ok(date(2025, 8, 24)));
    }

    #[test]
    fn test_event_reports_failing_milestone() {
        let ctx = PhaseContext::new(NaiveDate::MAX, true, BusinessDayOptions::default());
        let err = ctx.event(1, "Publication of Announcement").unwrap_err();
        match err {
            PhaseError::Calendar { day, event, .. } => {
                assert_eq!(day, 1);
                assert_eq!(event, "Publication of Announcement");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_every_archetype_builds_sorted_non_empty() {
        let archetypes = [
            TransactionArchetype::RightsIssue,
            TransactionArchetype::OpenOffer,
            TransactionArchetype::MajorTransaction,
            TransactionArchetype::VerySubstantialAcquisition,
            TransactionArchetype::VerySubstantialDisposal,
            TransactionArchetype::ConnectedTransaction,
            TransactionArchetype::ReverseTakeover,
            TransactionArchetype::Generic,
        ];
        for archetype in archetypes {
            for approval in [true, false] {
                let events = build_phase(archetype, &ctx(), approval).unwrap();
                assert!(!events.is_empty(), "{archetype} produced no events");
                assert!(events.iter().all(|e| !e.event_name.is_empty()));
                assert!(
                    events.windows(2).all(|w| w[0].day_offset <= w[1].day_offset),
                    "{archetype} events out of order"
                );
                assert!(
                    events.windows(2).all(|w| w[0].date <= w[1].date),
                    "{archetype} dates out of order"
                );
            }
        }
    }
}
