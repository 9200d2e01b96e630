//! Timetable Configuration Module
//!
//! Operator-tunable engine defaults loaded from TOML: business-day rules,
//! generation defaults, collaborator guards and static vetting rules.
//!
//! ## Loading Order
//!
//! 1. `HKEX_TIMETABLE_CONFIG` environment variable (path to TOML file)
//! 2. `timetable.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! The config is passed to the engine explicitly; there is no global.
//!
//! ```ignore
//! let engine = TimetableEngine::new(TimetableConfig::load());
//! ```

mod timetable_config;
pub mod defaults;
pub mod validation;

pub use timetable_config::*;
