//! Calendar commands

use std::time::Instant;

use hrcal_core::{MonthView, SourceFailure};
use hrcal_domain::{CalendarEvent, EventFilter, EventType, GridCell, MonthKey, Result, WeekStart};
use serde::Serialize;
use tracing::info;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// A source that could not be fetched for the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFailureDto {
    pub category: EventType,
    pub error_type: &'static str,
    pub message: String,
}

impl From<&SourceFailure> for SourceFailureDto {
    fn from(failure: &SourceFailure) -> Self {
        Self {
            category: failure.category,
            error_type: failure.error.label(),
            message: failure.error.to_string(),
        }
    }
}

/// Month page for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthViewDto {
    pub year: i32,
    pub month: u32,
    /// `YYYY-MM`
    pub label: String,
    pub filter: EventFilter,
    pub week_start: WeekStart,
    pub leading_blanks: usize,
    pub cells: Vec<GridCell>,
    /// Every aggregated event, unfiltered, in source order.
    pub events: Vec<CalendarEvent>,
    pub failed_sources: Vec<SourceFailureDto>,
    pub skipped_records: usize,
    pub complete: bool,
}

impl From<MonthView> for MonthViewDto {
    fn from(view: MonthView) -> Self {
        let MonthView { month, events, grid, failures, skipped } = view;
        Self {
            year: month.year(),
            month: month.month(),
            label: month.to_string(),
            filter: grid.filter,
            week_start: grid.week_start,
            leading_blanks: grid.leading_blanks(),
            cells: grid.cells,
            events,
            complete: failures.is_empty(),
            failed_sources: failures.iter().map(SourceFailureDto::from).collect(),
            skipped_records: skipped,
        }
    }
}

/// Load and lay out `(year, month)`.
///
/// Returns `Ok(None)` when a newer month request superseded this one.
pub async fn get_month_view(
    ctx: &AppContext,
    year: i32,
    month: u32,
    filter: EventFilter,
) -> Result<Option<MonthViewDto>> {
    let command_name = "calendar::get_month_view";
    let start = Instant::now();

    info!(command = command_name, year, month, ?filter, "Loading month view");
    let result = ctx.calendar.load_month(year, month, filter).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err());
    result.map(|view| view.map(MonthViewDto::from))
}

/// Load the month containing today in the configured timezone.
pub async fn get_current_month_view(
    ctx: &AppContext,
    filter: EventFilter,
) -> Result<Option<MonthViewDto>> {
    let current = MonthKey::containing(ctx.today())?;
    get_month_view(ctx, current.year(), current.month(), filter).await
}
