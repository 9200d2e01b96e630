//! HKEX Timetable: Hong Kong business-day timetables for listed-company transactions
//!
//! Generates execution timetables for corporate actions under the HKEX Listing
//! Rules (rights issues, open offers, notifiable and connected transactions,
//! reverse takeovers) from a start date and a free-text transaction type.
//!
//! ## Architecture
//!
//! - **Calendar**: Hong Kong holiday table and business-day arithmetic
//! - **Classify**: free-text transaction type → archetype
//! - **Phases**: one milestone sequence per archetype
//! - **Engine**: fail-soft orchestration with vetting and reference collaborators
//! - **Render**: markdown table output

pub mod calendar;
pub mod classify;
pub mod collaborators;
pub mod config;
pub mod engine;
pub mod phases;
pub mod render;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, TimetableConfig};

// Re-export calendar primitives
pub use calendar::{
    add_business_days, get_business_days_between, is_business_day, is_hong_kong_holiday,
    BusinessDayOptions, CalendarError, Clock, FixedClock, SystemClock,
};

// Re-export domain types
pub use classify::{classify_transaction, TransactionArchetype};
pub use types::{
    get_phase_for_day, CustomEvent, Fallback, ReferenceDocument, Timetable, TimetableEvent,
    TimetablePhase, VettingInfo,
};

// Re-export orchestration
pub use collaborators::{ReferenceTimetableSearch, VettingLookup};
pub use engine::{generate_dynamic_timetable, StartDate, TimetableEngine, TimetableRequest};
pub use render::to_markdown;
