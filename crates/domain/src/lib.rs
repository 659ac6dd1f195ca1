//! # HRCal Domain
//!
//! Business domain types and models for the HR calendar.
//!
//! This crate contains:
//! - Calendar types (CalendarDate, MonthKey, CalendarEvent, MonthGrid)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other HRCal crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::calendar_date::parse_calendar_date;
