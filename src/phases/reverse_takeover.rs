//! Reverse takeovers
//!
//! The listed issuer is treated as a new listing applicant, so the
//! timetable runs through a full listing application before the EGM.

use super::{PhaseContext, PhaseError};
use crate::types::TimetableEvent;

/// Days 1, 28, 60, 90, 120, 135, 137, 150, 165.
pub fn build(ctx: &PhaseContext) -> Result<Vec<TimetableEvent>, PhaseError> {
    Ok(vec![
        ctx.event(1, "Initial Announcement")?
            .described("Announce the proposed reverse takeover; trading halt as required")
            .key()
            .rule("Rule 14.06B"),
        ctx.event(28, "New Listing Application Submitted")?
            .described("File new listing application with draft listing document")
            .vetted()
            .rule("Rule 14.54"),
        ctx.event(60, "First Round Regulatory Comments")?
            .described("Exchange and SFC comments on the listing application"),
        ctx.event(90, "Listing Committee Hearing")?
            .described("Listing Committee considers the application"),
        ctx.event(120, "Circular Dispatch and EGM Notice")?
            .described("Despatch circular and notice of EGM to shareholders")
            .key(),
        ctx.event(135, "EGM")?
            .described("Shareholders vote on the reverse takeover")
            .key()
            .rule("Rule 13.39(4)"),
        ctx.event(137, "Announcement of EGM Results")?
            .described("Poll results published")
            .key(),
        ctx.event(150, "Completion")?
            .described("Completion of the acquisition")
            .key(),
        ctx.event(165, "Resumption of Trading")?
            .described("Dealings in the enlarged issuer's shares resume")
            .key(),
    ])
}
