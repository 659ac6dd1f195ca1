//! Calendar aggregation and month layout
//!
//! - [`adapters`]: per-source field mapping into `CalendarEvent`
//! - [`aggregator`]: concurrent fetch + failure-isolated merge
//! - [`grid`]: month grid and per-day lookup
//! - [`service`]: month loading with stale-response protection

pub mod adapters;
pub mod aggregator;
pub mod grid;
pub mod service;

pub use adapters::{mapping_for, normalize_record, FieldMapping, SkipReason, TitleRule};
pub use aggregator::{AggregatedMonth, EventAggregator, SourceFailure};
pub use grid::{
    build_grid, days_in_month, events_for_day, first_weekday_of_month, today_in, DayBuckets,
};
pub use service::{CalendarService, GenerationTicket, MonthView, RequestGeneration, TodayProvider};
