//! Application commands

pub mod calendar;

pub use calendar::{get_current_month_view, get_month_view, MonthViewDto, SourceFailureDto};
