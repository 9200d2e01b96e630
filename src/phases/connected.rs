//! Connected transactions (Chapter 14A)
//!
//! Same circular/EGM shape as a major transaction, plus the independent
//! financial adviser whose opinion letter goes into the circular.

use super::{PhaseContext, PhaseError};
use crate::types::TimetableEvent;

/// Days 1, 5, 14, 21, 28, 42, 44.
pub fn build(ctx: &PhaseContext) -> Result<Vec<TimetableEvent>, PhaseError> {
    Ok(vec![
        ctx.event(1, "Submit Draft Circular to HKEX")?
            .described("Draft circular for the connected transaction submitted for pre-vetting")
            .vetted()
            .rule("Rule 14A.36"),
        ctx.event(5, "Appointment of Independent Financial Adviser")?
            .described("IFA appointed to advise the independent board committee and shareholders")
            .rule("Rule 14A.39"),
        ctx.event(14, "HKEX Comments on Circular")?
            .described("Exchange feedback received; responses and revised draft prepared"),
        ctx.event(21, "IFA Opinion Letter")?
            .described("IFA letter on whether the terms are fair and reasonable")
            .key(),
        ctx.event(28, "Circular Dispatch and EGM Notice")?
            .described("Despatch circular, IBC letter and IFA letter with notice of EGM")
            .key(),
        ctx.event(42, "EGM")?
            .described("Independent shareholders vote; connected persons abstain")
            .key()
            .rule("Rule 13.39(4)"),
        ctx.event(44, "Announcement of EGM Results")?
            .described("Poll results published")
            .key(),
    ])
}
