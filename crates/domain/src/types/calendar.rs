//! Calendar domain types: dates, months, event kinds and normalized events.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{HrCalError, Result};
use crate::impl_domain_str_conversions;
use crate::utils::calendar_date::parse_calendar_date;

/// Time-zone-less calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self).ok_or_else(|| {
            HrCalError::InvalidInput(format!("invalid calendar date {year}-{month}-{day}"))
        })
    }

    /// Normalize a raw API date string; see [`parse_calendar_date`].
    pub fn parse(raw: &str) -> Result<Self> {
        parse_calendar_date(raw).map(Self)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// Same month and day in another year. `None` for Feb 29 in a common year.
    pub fn with_year(self, year: i32) -> Option<Self> {
        self.0.with_year(year).map(Self)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A validated calendar month (`year >= 1`, `month` in `1..=12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
    first: NaiveDate,
    days: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if year < 1 {
            return Err(HrCalError::InvalidInput(format!("year must be >= 1, got {year}")));
        }
        if !(1..=12).contains(&month) {
            return Err(HrCalError::InvalidInput(format!("month must be 1..=12, got {month}")));
        }

        let out_of_range =
            || HrCalError::InvalidInput(format!("{year}-{month:02} is outside the supported range"));
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        // Last day of the month is day 0 of the next month.
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;

        Ok(Self { year, month, first, days: last.day() })
    }

    /// Month containing `date`.
    pub fn containing(date: CalendarDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> CalendarDate {
        CalendarDate(self.first)
    }

    pub fn days_in_month(self) -> u32 {
        self.days
    }

    pub fn first_weekday(self) -> Weekday {
        self.first.weekday()
    }

    /// Date of `day` in this month, if the day exists.
    pub fn date(self, day: u32) -> Option<CalendarDate> {
        if day == 0 || day > self.days {
            return None;
        }
        self.first.with_day(day).map(CalendarDate)
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(self) -> Result<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn prev(self) -> Result<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MonthKey", 2)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month)?;
        state.end()
    }
}

/// Kind of calendar entry, one per source category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Event,
    Holiday,
    Meeting,
    Leave,
    Interview,
}

impl_domain_str_conversions!(EventType {
    Event => "event",
    Holiday => "holiday",
    Meeting => "meeting",
    Leave => "leave",
    Interview => "interview",
});

impl EventType {
    /// Canonical source order used when aggregating.
    pub const ALL: [EventType; 5] =
        [Self::Event, Self::Holiday, Self::Meeting, Self::Leave, Self::Interview];

    /// Capitalized label used as a last-resort title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Event => "Event",
            Self::Holiday => "Holiday",
            Self::Meeting => "Meeting",
            Self::Leave => "Leave",
            Self::Interview => "Interview",
        }
    }
}

/// First column of the month grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl_domain_str_conversions!(WeekStart {
    Sunday => "sunday",
    Monday => "monday",
});

impl WeekStart {
    /// Column index (0-based) of `weekday` in a grid starting on this day.
    pub fn column_of(self, weekday: Weekday) -> u32 {
        match self {
            Self::Sunday => weekday.num_days_from_sunday(),
            Self::Monday => weekday.num_days_from_monday(),
        }
    }
}

/// Type filter applied when laying out a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "type")]
pub enum EventFilter {
    #[default]
    All,
    Only(EventType),
}

impl EventFilter {
    pub fn matches(self, event_type: EventType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == event_type,
        }
    }
}

impl std::str::FromStr for EventFilter {
    type Err = HrCalError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.trim().parse::<EventType>().map(Self::Only).map_err(HrCalError::InvalidInput)
    }
}

/// Normalized calendar entry built from one source record.
///
/// Rebuilt on every fetch cycle; never persisted or mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub title: String,
    pub date: CalendarDate,
    pub end_date: Option<CalendarDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub source_record: serde_json::Value,
}

impl CalendarEvent {
    /// Whether the event falls on `date` (calendar-component equality).
    pub fn is_on(&self, date: CalendarDate) -> bool {
        self.date == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(MonthKey::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthKey::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthKey::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthKey::new(1900, 2).unwrap().days_in_month(), 28);
    }

    #[test]
    fn days_in_month_for_every_month() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            let month = MonthKey::new(2023, index as u32 + 1).unwrap();
            assert_eq!(month.days_in_month(), *days, "month {}", index + 1);
        }
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!(matches!(MonthKey::new(2024, 0), Err(HrCalError::InvalidInput(_))));
        assert!(matches!(MonthKey::new(2024, 13), Err(HrCalError::InvalidInput(_))));
        assert!(matches!(MonthKey::new(0, 5), Err(HrCalError::InvalidInput(_))));
    }

    #[test]
    fn navigation_crosses_year_boundaries() {
        let dec = MonthKey::new(2023, 12).unwrap();
        assert_eq!(dec.next().unwrap(), MonthKey::new(2024, 1).unwrap());
        assert_eq!(MonthKey::new(2024, 1).unwrap().prev().unwrap(), dec);
        assert!(MonthKey::new(1, 1).unwrap().prev().is_err());
    }

    #[test]
    fn first_weekday_of_january_2024_is_monday() {
        assert_eq!(MonthKey::new(2024, 1).unwrap().first_weekday(), Weekday::Mon);
    }

    #[test]
    fn date_lookup_is_bounded() {
        let april = MonthKey::new(2024, 4).unwrap();
        assert_eq!(april.date(30).unwrap().to_string(), "2024-04-30");
        assert!(april.date(31).is_none());
        assert!(april.date(0).is_none());
    }

    #[test]
    fn month_key_serializes_year_and_month_only() {
        let json = serde_json::to_value(MonthKey::new(2024, 6).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "year": 2024, "month": 6 }));
    }

    #[test]
    fn week_start_columns() {
        assert_eq!(WeekStart::Sunday.column_of(Weekday::Sun), 0);
        assert_eq!(WeekStart::Sunday.column_of(Weekday::Mon), 1);
        assert_eq!(WeekStart::Monday.column_of(Weekday::Sun), 6);
        assert_eq!(WeekStart::Monday.column_of(Weekday::Mon), 0);
    }

    #[test]
    fn filter_parsing() {
        assert_eq!("all".parse::<EventFilter>().unwrap(), EventFilter::All);
        assert_eq!("Holiday".parse::<EventFilter>().unwrap(), EventFilter::Only(EventType::Holiday));
        assert!("birthday".parse::<EventFilter>().is_err());
        assert!(EventFilter::Only(EventType::Leave).matches(EventType::Leave));
        assert!(!EventFilter::Only(EventType::Leave).matches(EventType::Meeting));
    }

    #[test]
    fn event_serializes_type_field() {
        let event = CalendarEvent {
            id: "7".into(),
            event_type: EventType::Meeting,
            title: "Standup".into(),
            date: CalendarDate::from_ymd(2024, 6, 3).unwrap(),
            end_date: None,
            start_time: Some("09:30".into()),
            end_time: None,
            source_record: serde_json::json!({ "id": 7 }),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "meeting");
        assert_eq!(json["date"], "2024-06-03");
        assert_eq!(json["startTime"], "09:30");
    }
}
