//! Shared data structures for timetable generation
//!
//! - `TimetableEvent` / `CustomEvent`: the unit of output and caller-supplied additions
//! - `VettingInfo` / `ReferenceDocument`: inputs from external collaborators
//! - `TimetablePhase`: display classification of a day offset
//! - `Timetable`: a generated result with provenance

mod event;
mod phase;
mod reference;
mod timetable;

pub use event::*;
pub use phase::*;
pub use reference::*;
pub use timetable::*;
