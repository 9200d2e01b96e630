//! Rights issues and open offers
//!
//! Both are pre-emptive offers of new shares to existing shareholders and
//! share one timetable shape. The difference that matters for the timetable:
//! a rights issue creates nil-paid rights that trade on the exchange for a
//! window after dispatch, while open-offer entitlements are not tradable.
//! The open-offer sequence therefore has no nil-paid trading window.
//!
//! ## Composition
//!
//! - Standard: preparation milestones, then the trading sub-sequence
//!   starting at day 20 (record date day 22).
//! - Approval required: circular + EGM milestones up to the prospectus at
//!   day 60, then the same trading sub-sequence re-anchored to start at day 61.

use serde::{Deserialize, Serialize};

use super::{PhaseContext, PhaseError};
use crate::calendar;
use crate::config::defaults::{APPROVAL_TRADING_START_DAY, STANDARD_TRADING_START_DAY};
use crate::types::TimetableEvent;

/// Business days from the first trading milestone (last cum day) to the record date.
const RECORD_DATE_LEAD: i64 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    RightsIssue,
    OpenOffer,
}

impl OfferKind {
    fn noun(self) -> &'static str {
        match self {
            OfferKind::RightsIssue => "rights issue",
            OfferKind::OpenOffer => "open offer",
        }
    }

    /// "Rights" / "Entitlement" as used in cum/ex milestone names.
    fn entitlement_term(self) -> &'static str {
        match self {
            OfferKind::RightsIssue => "Rights",
            OfferKind::OpenOffer => "Entitlement",
        }
    }

    fn approval_rule(self) -> &'static str {
        match self {
            OfferKind::RightsIssue => "Rule 7.19A",
            OfferKind::OpenOffer => "Rule 7.24A",
        }
    }

    fn has_nil_paid_trading(self) -> bool {
        matches!(self, OfferKind::RightsIssue)
    }
}

/// Build the sequence for `kind` under the selected scenario.
pub fn build(
    ctx: &PhaseContext,
    kind: OfferKind,
    approval_required: bool,
) -> Result<Vec<TimetableEvent>, PhaseError> {
    let (mut events, trading_start) = if approval_required {
        (approval_phase(ctx, kind)?, APPROVAL_TRADING_START_DAY)
    } else {
        (standard_phase(ctx, kind)?, STANDARD_TRADING_START_DAY)
    };
    events.extend(trading_phase(ctx, kind, trading_start)?);
    Ok(events)
}

/// Circular, EGM and listing-document milestones (days 1 to 60).
pub fn approval_phase(ctx: &PhaseContext, kind: OfferKind) -> Result<Vec<TimetableEvent>, PhaseError> {
    let noun = kind.noun();
    Ok(vec![
        ctx.event(1, "Publication of Announcement")?
            .described(format!("Announce the proposed {noun}, conditional on shareholders' approval"))
            .key()
            .rule(kind.approval_rule()),
        ctx.event(3, "Circular Preparation")?
            .described("Draft circular with board letter, IBC recommendation and IFA advice"),
        ctx.event(8, "Circular Submitted for Vetting")?
            .described("Submit draft circular to the Exchange for review")
            .vetted(),
        ctx.event(23, "Circular Dispatch and EGM Notice")?
            .described("Despatch circular and notice of EGM to shareholders")
            .key()
            .rule("Rule 13.73"),
        ctx.event(44, "EGM")?
            .described(format!("Independent shareholders vote on the {noun}"))
            .key()
            .rule("Rule 13.39(4)"),
        ctx.event(45, "Listing Document Preparation")?
            .described("Finalise prospectus and application forms"),
        ctx.event(50, "Listing Document Submitted for Vetting")?
            .described("Submit prospectus to the Exchange for authorisation and registration")
            .vetted(),
        ctx.event(60, "Prospectus Publication")?
            .described("Prospectus registered and published")
            .key(),
    ])
}

/// Preparation milestones when no shareholder approval is needed (days 1 to 18).
pub fn standard_phase(ctx: &PhaseContext, kind: OfferKind) -> Result<Vec<TimetableEvent>, PhaseError> {
    let noun = kind.noun();
    Ok(vec![
        ctx.event(1, "Publication of Announcement")?
            .described(format!("Announce the {noun} and expected timetable"))
            .key(),
        ctx.event(3, "Listing Document Preparation")?
            .described("Draft prospectus and application forms"),
        ctx.event(8, "Listing Document Submitted for Vetting")?
            .described("Submit prospectus to the Exchange for authorisation and registration")
            .vetted(),
        ctx.event(18, "Prospectus Publication")?
            .described("Prospectus registered and published")
            .key(),
    ])
}

/// Record-date centred trading milestones starting at `start_day`.
///
/// The last cum day is the first business day on or after `start_day`, so it
/// never precedes the milestones before it, also with calendar-day offsets.
/// Ex-date and record date follow it by business days. Offsets after the
/// record date are business days from the realized record date (T), so
/// `day_offset` is `record_day + k` for a T+k milestone.
pub fn trading_phase(
    ctx: &PhaseContext,
    kind: OfferKind,
    start_day: i64,
) -> Result<Vec<TimetableEvent>, PhaseError> {
    let term = kind.entitlement_term();
    let cum_name = format!("Last Day of Dealings Cum-{term}");
    let cum_date = ctx
        .date_at(start_day)
        .and_then(|d| calendar::adjust_to_next_business_day(d, &ctx.options))
        .map_err(|source| PhaseError::Calendar {
            day: start_day,
            event: cum_name.clone(),
            source,
        })?;
    let record_day = start_day + RECORD_DATE_LEAD;
    let record = ctx.trading_event(cum_date, RECORD_DATE_LEAD, record_day, "Record Date")?;
    let t = record.date;
    let at = |k: i64, name: &str| ctx.trading_event(t, k, record_day + k, name);

    let mut events = vec![
        TimetableEvent::new(start_day, cum_date, cum_name)
            .described(format!("Last day of dealings in shares on a cum-{} basis", term.to_lowercase())),
        ctx.trading_event(cum_date, 1, start_day + 1, &format!("Ex-{term} Date"))?
            .described(format!("Shares trade ex-{}", term.to_lowercase()))
            .key(),
        record
            .described("Register closes to determine qualifying shareholders")
            .key(),
    ];

    match kind {
        OfferKind::RightsIssue => events.push(
            at(5, "Provisional Allotment Letter Dispatch")?
                .described("Despatch prospectus documents including PALs to qualifying shareholders"),
        ),
        OfferKind::OpenOffer => events.push(
            at(5, "Application Form Dispatch")?
                .described("Despatch prospectus documents including application forms to qualifying shareholders"),
        ),
    }

    if kind.has_nil_paid_trading() {
        events.push(
            at(6, "Nil-Paid Rights Trading Start")?
                .described("First day of dealings in nil-paid rights")
                .key(),
        );
        events.push(
            at(16, "Nil-Paid Rights Trading End")?
                .described("Last day of dealings in nil-paid rights")
                .key(),
        );
    }

    events.push(
        at(20, "Latest Time for Acceptance")?
            .described("Latest time for acceptance of and payment for the offer shares")
            .key(),
    );
    events.push(
        at(27, "New Shares Listing")?
            .described("Dealings in fully-paid new shares commence")
            .key(),
    );

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn names(events: &[TimetableEvent]) -> Vec<&str> {
        events.iter().map(|e| e.event_name.as_str()).collect()
    }

    #[test]
    fn test_rights_standard_offsets() {
        let events = build(&ctx(), OfferKind::RightsIssue, false).unwrap();
        assert_eq!(offsets(&events), vec![1, 3, 8, 18, 20, 21, 22, 27, 28, 38, 42, 49]);
        let n = names(&events);
        assert!(n.contains(&"Nil-Paid Rights Trading Start"));
        assert!(n.contains(&"Nil-Paid Rights Trading End"));
    }

    #[test]
    fn test_rights_approval_offsets() {
        let events = build(&ctx(), OfferKind::RightsIssue, true).unwrap();
        assert_eq!(
            offsets(&events),
            vec![1, 3, 8, 23, 44, 45, 50, 60, 61, 62, 63, 68, 69, 79, 83, 90]
        );
        let egm = events.iter().find(|e| e.event_name == "EGM").unwrap();
        assert_eq!(egm.day_offset, 44);
        assert!(egm.is_key_event);
    }

    #[test]
    fn test_open_offer_has_no_nil_paid_window() {
        for approval in [true, false] {
            let events = build(&ctx(), OfferKind::OpenOffer, approval).unwrap();
            assert!(events.iter().all(|e| !e.event_name.contains("Nil-Paid")));
            assert!(events.iter().any(|e| e.event_name == "Application Form Dispatch"));
            assert!(events.iter().any(|e| e.event_name == "Ex-Entitlement Date"));
        }
        let standard = build(&ctx(), OfferKind::OpenOffer, false).unwrap();
        assert_eq!(offsets(&standard), vec![1, 3, 8, 18, 20, 21, 22, 27, 42, 49]);
    }

    #[test]
    fn test_trading_dates_are_business_days_from_record_date() {
        let events = build(&ctx(), OfferKind::RightsIssue, false).unwrap();
        let find = |name: &str| events.iter().find(|e| e.event_name == name).unwrap().date;
        // 19 Aug 2025 + 22 business days = Thu 18 Sep 2025
        assert_eq!(find("Record Date"), date(2025, 9, 18));
        assert_eq!(find("Ex-Rights Date"), date(2025, 9, 17));
        assert_eq!(find("Last Day of Dealings Cum-Rights"), date(2025, 9, 16));
        assert_eq!(find("Nil-Paid Rights Trading Start"), date(2025, 9, 26));
        // T+16 crosses National Day (1 Oct) and the Mid-Autumn holiday (7 Oct)
        assert_eq!(find("Nil-Paid Rights Trading End"), date(2025, 10, 14));
    }

    #[test]
    fn test_calendar_day_offsets_keep_trading_after_prospectus() {
        use crate::calendar::BusinessDayOptions;

        // Monday start: day 61 and day 20 both land on a Saturday or Sunday
        let ctx = PhaseContext::new(date(2025, 8, 18), false, BusinessDayOptions::default());
        for kind in [OfferKind::RightsIssue, OfferKind::OpenOffer] {
            for approval in [true, false] {
                let events = build(&ctx, kind, approval).unwrap();
                assert!(
                    events.windows(2).all(|w| w[0].date <= w[1].date),
                    "{kind:?} approval={approval} dates out of order"
                );
                let prospectus = events
                    .iter()
                    .find(|e| e.event_name == "Prospectus Publication")
                    .unwrap();
                let cum = events
                    .iter()
                    .find(|e| e.event_name.starts_with("Last Day of Dealings Cum-"))
                    .unwrap();
                assert!(cum.date > prospectus.date);
            }
        }

        let approval = build(&ctx, OfferKind::RightsIssue, true).unwrap();
        let find = |name: &str| approval.iter().find(|e| e.event_name == name).unwrap().date;
        assert_eq!(find("Prospectus Publication"), date(2025, 10, 17));
        // Day 61 is Saturday 18 Oct; the last cum day rolls to Monday
        assert_eq!(find("Last Day of Dealings Cum-Rights"), date(2025, 10, 20));
        assert_eq!(find("Ex-Rights Date"), date(2025, 10, 21));
        assert_eq!(find("Record Date"), date(2025, 10, 22));

        let standard = build(&ctx, OfferKind::RightsIssue, false).unwrap();
        let find = |name: &str| standard.iter().find(|e| e.event_name == name).unwrap().date;
        assert_eq!(find("Prospectus Publication"), date(2025, 9, 5));
        assert_eq!(find("Last Day of Dealings Cum-Rights"), date(2025, 9, 8));
    }

    #[test]
    fn test_vetting_flags() {
        let events = build(&ctx(), OfferKind::RightsIssue, true).unwrap();
        let vetted: Vec<&str> = events
            .iter()
            .filter(|e| e.vetting_required == Some(true))
            .map(|e| e.event_name.as_str())
            .collect();
        assert_eq!(
            vetted,
            vec!["Circular Submitted for Vetting", "Listing Document Submitted for Vetting"]
        );
    }
}
