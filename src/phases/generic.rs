//! Generic transaction timetable
//!
//! Used for unrecognised transaction types and as the stand-in whenever an
//! archetype-specific builder fails.

use super::{PhaseContext, PhaseError};
use crate::types::TimetableEvent;

/// Days 7, 14, 21, 35, 42.
pub fn build(ctx: &PhaseContext) -> Result<Vec<TimetableEvent>, PhaseError> {
    Ok(vec![
        ctx.event(7, "Due Diligence Completion")?
            .described("Legal, financial and business due diligence completed"),
        ctx.event(14, "Draft Documents Prepared")?
            .described("Announcement and transaction documents in agreed draft"),
        ctx.event(21, "Regulatory Submission")?
            .described("Documents submitted to the Exchange / SFC where required")
            .vetted()
            .key(),
        ctx.event(35, "Expected Regulatory Approval")?
            .described("Clearance or no-further-comment received"),
        ctx.event(42, "Transaction Completion")?
            .described("Completion of the transaction")
            .key(),
    ])
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(offsets(&build(&ctx()).unwrap()), vec![7, 14, 21, 35, 42]);
    }
}
