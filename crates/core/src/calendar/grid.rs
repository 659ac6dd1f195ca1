//! Month grid construction and per-day event lookup.
//!
//! Everything here is a pure function of its arguments: the viewed month,
//! the aggregated events, the type filter and "today" are all passed in.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use hrcal_domain::constants::FULL_GRID_CELLS;
use hrcal_domain::{
    CalendarDate, CalendarEvent, DayCell, EventFilter, GridCell, GridOptions, MonthGrid,
    MonthKey, Result,
};

/// Number of days in `month` of `year` (leap years included).
///
/// # Errors
/// `HrCalError::InvalidInput` for a year below 1 or a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    MonthKey::new(year, month).map(MonthKey::days_in_month)
}

/// Weekday of the 1st of the month, 0 = Sunday through 6 = Saturday.
///
/// # Errors
/// `HrCalError::InvalidInput` for a year below 1 or a month outside 1..=12.
pub fn first_weekday_of_month(year: i32, month: u32) -> Result<u32> {
    MonthKey::new(year, month).map(|key| key.first_weekday().num_days_from_sunday())
}

/// Events whose normalized date is `day` of `month`, in aggregation order.
pub fn events_for_day(events: &[CalendarEvent], month: MonthKey, day: u32) -> Vec<&CalendarEvent> {
    let Some(date) = month.date(day) else {
        return Vec::new();
    };
    events.iter().filter(|event| event.is_on(date)).collect()
}

/// Day-of-month index over one month's events, built in a single pass.
#[derive(Debug, Clone)]
pub struct DayBuckets<'a> {
    month: MonthKey,
    // slot 0 unused so that slot `d` holds day `d`
    buckets: Vec<Vec<&'a CalendarEvent>>,
}

impl<'a> DayBuckets<'a> {
    /// Bucket `events` that match `filter` and fall inside `month`.
    pub fn build(month: MonthKey, events: &'a [CalendarEvent], filter: EventFilter) -> Self {
        let mut buckets = vec![Vec::new(); month.days_in_month() as usize + 1];
        for event in events {
            if filter.matches(event.event_type) && month.contains(event.date) {
                buckets[event.date.day() as usize].push(event);
            }
        }
        Self { month, buckets }
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    /// Events on `day`; empty for days outside the month.
    pub fn day(&self, day: u32) -> &[&'a CalendarEvent] {
        match self.buckets.get(day as usize) {
            Some(bucket) if day > 0 => bucket,
            _ => &[],
        }
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// Lay out `month` with `events` bucketed onto their days.
///
/// Cells are the leading blanks for the first weekday, then days
/// `1..=days_in_month`. Trailing blanks are only added when
/// `options.pad_trailing` is set.
pub fn build_grid(
    month: MonthKey,
    events: &[CalendarEvent],
    filter: EventFilter,
    today: CalendarDate,
    options: GridOptions,
) -> MonthGrid {
    let buckets = DayBuckets::build(month, events, filter);
    let leading = options.week_start.column_of(month.first_weekday()) as usize;
    let days = month.days_in_month();

    let mut cells = Vec::with_capacity(FULL_GRID_CELLS);
    cells.extend(std::iter::repeat_with(|| GridCell::Empty).take(leading));

    for day in 1..=days {
        let Some(date) = month.date(day) else { continue };
        cells.push(GridCell::Day(DayCell {
            day,
            date,
            is_today: date == today,
            events: buckets.day(day).iter().map(|event| (*event).clone()).collect(),
        }));
    }

    if options.pad_trailing {
        while cells.len() < FULL_GRID_CELLS {
            cells.push(GridCell::Empty);
        }
    }

    MonthGrid { month, filter, week_start: options.week_start, cells }
}

/// Today's date in `timezone`, or in the local zone when `None`.
pub fn today_in(timezone: Option<Tz>) -> CalendarDate {
    let date: NaiveDate = match timezone {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => chrono::Local::now().date_naive(),
    };
    CalendarDate::from(date)
}
