//! Calendar service - month loading with stale-response protection
//!
//! Every `load_month` call takes a generation ticket before fetching. When
//! the fetch completes, the result is only used if no newer call started in
//! the meantime; otherwise it is dropped and `Ok(None)` is returned. Rapid
//! month navigation therefore cannot overwrite a newer month with an older,
//! slower response.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hrcal_domain::{
    CalendarDate, CalendarEvent, EventFilter, GridOptions, MonthGrid, MonthKey, Result,
};
use serde::Serialize;
use tracing::{debug, instrument};

use super::aggregator::{AggregatedMonth, EventAggregator, SourceFailure};
use super::grid::{build_grid, today_in};

/// Supplies the date used for the today-marker.
pub type TodayProvider = Arc<dyn Fn() -> CalendarDate + Send + Sync>;

/// Monotonic request counter.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

/// Ticket handed out by [`RequestGeneration::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl RequestGeneration {
    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&self) -> GenerationTicket {
        GenerationTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the most recent request.
    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// One rendered month: the aggregated events plus their grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub month: MonthKey,
    pub events: Vec<CalendarEvent>,
    pub grid: MonthGrid,
    pub failures: Vec<SourceFailure>,
    pub skipped: usize,
}

/// Calendar service
pub struct CalendarService {
    aggregator: EventAggregator,
    options: GridOptions,
    today: TodayProvider,
    generation: RequestGeneration,
}

impl CalendarService {
    /// Create a service using the local date for the today-marker.
    pub fn new(aggregator: EventAggregator, options: GridOptions) -> Self {
        Self {
            aggregator,
            options,
            today: Arc::new(|| today_in(None)),
            generation: RequestGeneration::default(),
        }
    }

    /// Replace the today-marker source (timezone-aware clocks, tests).
    pub fn with_today(mut self, today: TodayProvider) -> Self {
        self.today = today;
        self
    }

    pub fn options(&self) -> GridOptions {
        self.options
    }

    pub fn aggregator(&self) -> &EventAggregator {
        &self.aggregator
    }

    /// Fetch, aggregate and lay out `(year, month)`.
    ///
    /// Returns `Ok(None)` when a newer `load_month` call started while this
    /// one was fetching.
    ///
    /// # Errors
    /// `HrCalError::InvalidInput` for an invalid month. Source failures are
    /// reported inside the view.
    #[instrument(skip(self))]
    pub async fn load_month(
        &self,
        year: i32,
        month: u32,
        filter: EventFilter,
    ) -> Result<Option<MonthView>> {
        let key = MonthKey::new(year, month)?;
        let ticket = self.generation.begin();

        let aggregated = self.aggregator.aggregate_month(key).await;

        if !self.generation.is_current(ticket) {
            debug!(%key, ticket = ticket.value(), "discarding stale month response");
            return Ok(None);
        }

        Ok(Some(self.view(aggregated, filter)))
    }

    /// Rebuild the grid of `view` for another filter without refetching.
    pub fn regrid(&self, view: &MonthView, filter: EventFilter) -> MonthGrid {
        build_grid(view.month, &view.events, filter, (self.today)(), self.options)
    }

    fn view(&self, aggregated: AggregatedMonth, filter: EventFilter) -> MonthView {
        let AggregatedMonth { month, events, failures, skipped } = aggregated;
        let grid = build_grid(month, &events, filter, (self.today)(), self.options);
        MonthView { month, events, grid, failures, skipped }
    }
}
