//! Major transactions and very substantial acquisitions / disposals
//!
//! Chapter 14 notifiable transactions that need a circular and shareholders'
//! approval at a general meeting. Very substantial transactions carry a
//! longer review window and a long-stop date for the conditions.

use serde::{Deserialize, Serialize};

use super::{PhaseContext, PhaseError};
use crate::types::TimetableEvent;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubstantialSide {
    Acquisition,
    Disposal,
}

impl SubstantialSide {
    fn noun(self) -> &'static str {
        match self {
            SubstantialSide::Acquisition => "acquisition",
            SubstantialSide::Disposal => "disposal",
        }
    }

    fn classification_rule(self) -> &'static str {
        match self {
            SubstantialSide::Acquisition => "Rule 14.06(5)",
            SubstantialSide::Disposal => "Rule 14.06(4)",
        }
    }
}

/// Days 1, 14, 28, 42, 44.
pub fn major_transaction(ctx: &PhaseContext) -> Result<Vec<TimetableEvent>, PhaseError> {
    Ok(vec![
        ctx.event(1, "Submit Draft Circular to HKEX")?
            .described("Draft circular for the major transaction submitted for pre-vetting")
            .vetted()
            .rule("Rule 14.06(3)"),
        ctx.event(14, "HKEX Comments on Circular")?
            .described("Exchange feedback received; responses and revised draft prepared"),
        ctx.event(28, "Circular Dispatch and EGM Notice")?
            .described("Despatch circular and notice of EGM to shareholders")
            .key()
            .rule("Rule 14.41"),
        ctx.event(42, "EGM")?
            .described("Shareholders vote on the major transaction")
            .key()
            .rule("Rule 13.39(4)"),
        ctx.event(44, "Announcement of EGM Results")?
            .described("Poll results published")
            .key(),
    ])
}

/// Days 1, 21, 35, 49, 51, 65.
pub fn very_substantial(
    ctx: &PhaseContext,
    side: SubstantialSide,
) -> Result<Vec<TimetableEvent>, PhaseError> {
    let noun = side.noun();
    Ok(vec![
        ctx.event(1, "Submit Draft Circular to HKEX")?
            .described(format!(
                "Draft circular for the very substantial {noun}, including accountants' report"
            ))
            .vetted()
            .rule(side.classification_rule()),
        ctx.event(21, "HKEX Comments on Circular")?
            .described("Exchange feedback received; responses and revised draft prepared"),
        ctx.event(35, "Circular Dispatch and EGM Notice")?
            .described("Despatch circular and notice of EGM to shareholders")
            .key()
            .rule("Rule 14.41"),
        ctx.event(49, "EGM")?
            .described(format!("Shareholders vote on the very substantial {noun}"))
            .key()
            .rule("Rule 13.39(4)"),
        ctx.event(51, "Announcement of EGM Results")?
            .described("Poll results published")
            .key(),
        ctx.event(65, "Long Stop Date")?
            .described(format!(
                "Latest date for fulfilment of the conditions precedent to the {noun}"
            )),
    ])
}
