//! Application constants
//!
//! Centralized location for domain-level constants shared by the grid
//! builder, the source adapters and the HR API client.

// Grid layout
pub const DAYS_PER_WEEK: usize = 7;
pub const MAX_GRID_WEEKS: usize = 6;
pub const FULL_GRID_CELLS: usize = DAYS_PER_WEEK * MAX_GRID_WEEKS;

// Title synthesis
pub const LEAVE_TITLE_SUFFIX: &str = " - Leave";
pub const INTERVIEW_TITLE_SUFFIX: &str = " - Interview";
pub const UNKNOWN_STAFF_NAME: &str = "Unknown staff";
pub const UNKNOWN_CANDIDATE_NAME: &str = "Candidate";

// Leave scoping
pub const APPROVED_STATUS: &str = "approved";

// HR API defaults
pub const DEFAULT_EVENTS_PATH: &str = "/events";
pub const DEFAULT_HOLIDAYS_PATH: &str = "/holidays";
pub const DEFAULT_MEETINGS_PATH: &str = "/meetings";
pub const DEFAULT_LEAVES_PATH: &str = "/leave-applications";
pub const DEFAULT_INTERVIEWS_PATH: &str = "/interviews";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: usize = 1;
pub const DEFAULT_MAX_PAGES: u32 = 10;
pub const MAX_ENVELOPE_DEPTH: usize = 4;

// Logging
pub const DEFAULT_LOG_FILTER: &str = "hrcal=info,hrcal_core=info,hrcal_infra=info";
