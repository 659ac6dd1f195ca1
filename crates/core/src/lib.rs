//! # HRCal Core
//!
//! Pure calendar logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for calendar sources
//! - Per-source field mapping
//! - Event aggregation, month grid construction and the calendar service
//!
//! ## Architecture Principles
//! - Only depends on `hrcal-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod calendar;
pub mod calendar_ports;

// Re-export specific items to avoid ambiguity
pub use calendar::{
    build_grid, days_in_month, events_for_day, first_weekday_of_month, AggregatedMonth,
    CalendarService, EventAggregator, MonthView, SourceFailure,
};
pub use calendar_ports::CalendarSource;
