//! Calendar date normalization.
//!
//! HR API records carry dates in several shapes: plain `2024-03-15`,
//! `2024-03-15 09:00:00`, or full RFC 3339 timestamps such as
//! `2024-03-15T23:30:00Z`. Calendar bucketing only cares about the calendar
//! day the record was entered for, so the leading `YYYY-MM-DD` component is
//! taken verbatim. The time-of-day and offset are never applied: converting
//! `23:30Z` into a viewer's zone would move the record to a neighbouring day.
//!
//! Month and day may be one or two digits (`2024-6-5`); the year must have
//! four. Anything after the first `T` or space is ignored.

use chrono::NaiveDate;

use crate::errors::{HrCalError, Result};

/// Extract the calendar date from a raw API date string.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HrCalError::Parse("empty date".into()));
    }

    let (year, month, day) = date_parts(trimmed)
        .ok_or_else(|| HrCalError::Parse(format!("no calendar date in '{trimmed}'")))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| HrCalError::Parse(format!("invalid calendar date '{trimmed}'")))
}

/// `(year, month, day)` from the text before the first time separator.
fn date_parts(value: &str) -> Option<(i32, u32, u32)> {
    let head = value.split(['T', 't', ' ']).next()?;
    let mut parts = head.split('-');
    let year = numeric(parts.next()?, 4..=4)?;
    let month = numeric(parts.next()?, 1..=2)?;
    let day = numeric(parts.next()?, 1..=2)?;
    if parts.next().is_some() {
        return None;
    }
    Some((i32::try_from(year).ok()?, month, day))
}

fn numeric(part: &str, digits: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(parse_calendar_date("2024-06-10").unwrap(), ymd(2024, 6, 10));
        assert_eq!(parse_calendar_date("  2024-06-10 ").unwrap(), ymd(2024, 6, 10));
    }

    #[test]
    fn ignores_time_and_offset() {
        assert_eq!(parse_calendar_date("2024-03-15T23:30:00Z").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_calendar_date("2024-03-15T00:30:00+05:30").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_calendar_date("2024-03-15T23:59:59-08:00").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_calendar_date("2024-03-15 09:00:00").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_calendar_date("2024-03-15T10:00:00.000000Z").unwrap(), ymd(2024, 3, 15));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_calendar_date(""), Err(HrCalError::Parse(_))));
        assert!(parse_calendar_date("tomorrow").is_err());
        assert!(parse_calendar_date("15/03/2024").is_err());
        assert!(parse_calendar_date("2024-03-150").is_err());
        assert!(parse_calendar_date("24-03-15").is_err());
        assert!(parse_calendar_date("2024-03-15-01").is_err());
        assert!(parse_calendar_date("2024-03-15x").is_err());
    }

    #[test]
    fn accepts_unpadded_month_and_day() {
        assert_eq!(parse_calendar_date("2024-6-5").unwrap(), ymd(2024, 6, 5));
        assert_eq!(parse_calendar_date("2024-03-1").unwrap(), ymd(2024, 3, 1));
        assert_eq!(parse_calendar_date("2024-6-5 09:00:00").unwrap(), ymd(2024, 6, 5));
        assert_eq!(parse_calendar_date("2024-6-5T23:30:00Z").unwrap(), ymd(2024, 6, 5));
    }

    #[test]
    fn rejects_impossible_days() {
        assert!(parse_calendar_date("2023-02-29").is_err());
        assert!(parse_calendar_date("2024-13-01").is_err());
        assert_eq!(parse_calendar_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
    }
}
