//! Domain types and models

pub mod calendar;
pub mod grid;

pub use calendar::{CalendarDate, CalendarEvent, EventFilter, EventType, MonthKey, WeekStart};
pub use grid::{DayCell, GridCell, GridOptions, MonthGrid};
