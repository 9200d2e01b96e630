//! Markdown rendering
//!
//! Layout:
//!
//! ```text
//! # RIGHTS ISSUE Execution Timetable
//!
//! *Generated: Tue, 19 Aug 2025 09:00 HKT*
//!
//! | Business Day | Date | Event | Description |
//! |---|---|---|---|
//! | T+1 | Wed, 20 Aug 2025 | **Publication of Announcement** | ... |
//!
//! **Note:** methodology
//! ```

use chrono::NaiveDate;

use crate::calendar::BusinessDayOptions;
use crate::classify::normalize_transaction_type;
use crate::types::{Fallback, Timetable, TimetableEvent};

/// `T` for the anchor, `T+n` after it, `T-n` before it.
pub fn business_day_label(offset: i64) -> String {
    match offset {
        0 => "T".to_string(),
        n if n > 0 => format!("T+{n}"),
        n => format!("T{n}"),
    }
}

/// `Wed, 20 Aug 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %d %b %Y").to_string()
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn description_cell(event: &TimetableEvent) -> String {
    let mut cell = event.description.clone().unwrap_or_default();
    if let Some(rule) = &event.rule_reference {
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(&format!("({rule})"));
    }
    if event.vetting_required == Some(true) {
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str("[vetting]");
    }
    escape_cell(&cell)
}

fn heading(timetable: &Timetable) -> String {
    let normalized = normalize_transaction_type(&timetable.transaction_type);
    if normalized.is_empty() {
        timetable.archetype.display_name().to_uppercase()
    } else {
        normalized.to_uppercase()
    }
}

/// What the offset count skips, worded from the effective calendar rules.
fn exclusions(options: &BusinessDayOptions) -> Vec<String> {
    let mut skipped = Vec::new();
    if options.exclude_weekends {
        skipped.push("weekends".to_string());
    }
    if options.exclude_holidays {
        skipped.push("Hong Kong public holidays".to_string());
    }
    match options.custom_holidays.len() {
        0 => {}
        1 => skipped.push("1 additional market closure".to_string()),
        n => skipped.push(format!("{n} additional market closures")),
    }
    skipped
}

fn join_words(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn methodology_note(timetable: &Timetable) -> String {
    let anchor = format_date(timetable.start_date);
    let skipped = exclusions(&timetable.calendar);
    let counting = if timetable.adjust_for_holidays {
        if skipped.is_empty() {
            format!("Day offsets count every calendar day from T = {anchor}; nothing is excluded.")
        } else {
            let kind = if timetable.calendar.exclude_weekends && timetable.calendar.exclude_holidays {
                "Hong Kong business days"
            } else {
                "business days"
            };
            let mut text = format!(
                "Business days are {kind} counted from T = {anchor}. The count excludes {}.",
                join_words(&skipped)
            );
            if !timetable.calendar.exclude_weekends {
                text.push_str(" Weekends count as business days.");
            }
            text
        }
    } else {
        format!(
            "Day offsets are calendar days counted from T = {anchor}, without \
             weekend or holiday adjustment."
        )
    };
    format!(
        "**Note:** {counting} Trading events are business days counted from the \
         record date. All dates are indicative and subject to Exchange review."
    )
}

/// Render a timetable as a markdown document.
pub fn to_markdown(timetable: &Timetable) -> String {
    let mut out = String::with_capacity(256 + timetable.events.len() * 96);

    out.push_str(&format!("# {} Execution Timetable\n\n", heading(timetable)));
    out.push_str(&format!(
        "*Generated: {}*\n\n",
        timetable.generated_at.format("%a, %d %b %Y %H:%M HKT")
    ));

    if timetable.archetype.has_approval_scenarios() {
        let scenario = if timetable.approval_required {
            "shareholder approval required"
        } else {
            "no shareholder approval"
        };
        out.push_str(&format!(
            "**Scenario:** {}, {scenario}\n\n",
            timetable.archetype.display_name()
        ));
    }

    if timetable.vetting.is_required {
        out.push_str(&format!(
            "**Vetting:** {} documents require pre-vetting ({} business days",
            escape_cell(&timetable.vetting.headline_category),
            timetable.vetting.vetting_days
        ));
        if let Some(rule) = &timetable.vetting.rule_reference {
            out.push_str(&format!(", {rule}"));
        }
        out.push_str(")\n\n");
    }

    match timetable.fallback {
        Fallback::None => {}
        Fallback::GenericBuilder => out.push_str(
            "> A generic timetable is shown because the transaction-specific timetable could not be generated.\n\n",
        ),
        Fallback::Placeholder => out.push_str(
            "> Only the announcement date is shown because no timetable could be generated.\n\n",
        ),
    }

    out.push_str("| Business Day | Date | Event | Description |\n");
    out.push_str("|---|---|---|---|\n");
    for event in &timetable.events {
        let name = escape_cell(&event.event_name);
        let name = if event.is_key_event {
            format!("**{name}**")
        } else {
            name
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            business_day_label(event.day_offset),
            format_date(event.date),
            name,
            description_cell(event)
        ));
    }

    if !timetable.references.is_empty() {
        out.push_str("\n## Reference Timetables\n\n");
        for doc in &timetable.references {
            out.push_str(&format!("- {}", doc.title));
            if let Some(source) = &doc.source {
                out.push_str(&format!(" ({source})"));
            }
            if let Some(excerpt) = &doc.excerpt {
                out.push_str(&format!(": {}", excerpt.replace(['\r', '\n'], " ")));
            }
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&methodology_note(timetable));
    out.push('\n');
    out
}
