//! System-wide default constants.
//!
//! Centralises the fixed numbers of the timetable engine. Grouped by
//! subsystem for easy discovery.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable holding the path of the TOML config file.
pub const CONFIG_ENV_VAR: &str = "HKEX_TIMETABLE_CONFIG";

/// Config file looked up in the current working directory.
pub const CONFIG_FILE_NAME: &str = "timetable.toml";

// ============================================================================
// Orchestrator
// ============================================================================

/// Substituted when the caller's transaction type is empty.
pub const DEFAULT_TRANSACTION_TYPE: &str = "generic transaction";

/// Last-resort bound on each external collaborator call (ms).
///
/// Collaborators are expected to enforce their own timeouts; this only stops
/// a misbehaving one from stalling generation.
pub const COLLABORATOR_TIMEOUT_MS: u64 = 5_000;

/// Name of the single event returned when every builder fails.
pub const PLACEHOLDER_EVENT_NAME: &str = "Transaction Announcement";

/// Upper bound accepted for `vetting_days` in config.
pub const MAX_VETTING_DAYS: u32 = 120;

// ============================================================================
// Phase Builders
// ============================================================================

/// First trading milestone (last cum day) of a standard rights issue / open offer.
/// The record date follows two business days later, at day 22.
pub const STANDARD_TRADING_START_DAY: i64 = 20;

/// First trading milestone after the approval phase (prospectus at day 60).
pub const APPROVAL_TRADING_START_DAY: i64 = 61;

// ============================================================================
// Phase Classification
// ============================================================================

/// Last day offset classed as circular preparation.
pub const CIRCULAR_PREPARATION_LAST_DAY: i64 = 14;

/// Last day offset classed as regulatory review.
pub const REGULATORY_REVIEW_LAST_DAY: i64 = 28;

/// Last day offset classed as shareholder approval. Later days are completion.
pub const SHAREHOLDER_APPROVAL_LAST_DAY: i64 = 42;
