//! Month grid layout types.

use serde::Serialize;

use super::calendar::{CalendarDate, CalendarEvent, EventFilter, MonthKey, WeekStart};
use crate::constants::DAYS_PER_WEEK;

/// Layout options for the month grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridOptions {
    pub week_start: WeekStart,
    /// Pad with trailing blanks up to six full weeks.
    pub pad_trailing: bool,
}

/// A numbered day cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day: u32,
    pub date: CalendarDate,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

/// One grid position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell {
    Empty,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Day(cell) => Some(cell),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Calendar page for one month: leading blanks, then days `1..=N`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub month: MonthKey,
    pub filter: EventFilter,
    pub week_start: WeekStart,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_empty()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }

    /// Rows of seven cells; the last row may be short when unpadded.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }
}
