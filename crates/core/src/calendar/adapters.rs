//! Per-source field extraction.
//!
//! Each source category names its date, title and time fields differently.
//! The mapping table below is the single place those differences live; a
//! record is resolved once, at ingestion, into a [`CalendarEvent`].
//!
//! | Source    | date field                                   | title                                   |
//! |-----------|----------------------------------------------|-----------------------------------------|
//! | event     | `start_date` ?? `date`                       | `title`                                 |
//! | holiday   | `holiday_date` ?? `date`                     | `occasion` ?? `name`                    |
//! | meeting   | `meeting_date` ?? `date`                     | `title`                                 |
//! | leave     | `start_date`                                 | `"{staff full name} - Leave"`           |
//! | interview | `interview_date` ?? `scheduled_date` ?? `date` | `title` ?? `"{candidate} - Interview"` |

use std::fmt;

use hrcal_domain::constants::{
    APPROVED_STATUS, INTERVIEW_TITLE_SUFFIX, LEAVE_TITLE_SUFFIX, UNKNOWN_CANDIDATE_NAME,
    UNKNOWN_STAFF_NAME,
};
use hrcal_domain::{CalendarDate, CalendarEvent, EventType, MonthKey};
use serde_json::{Map, Value};

/// How the title of a record is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    /// First non-empty field, in order.
    Fields(&'static [&'static str]),
    /// `"{staff full name} - Leave"`.
    StaffLeave,
    /// `title`, else `"{candidate name} - Interview"`.
    Interview,
}

/// Field-extraction rule for one source category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub category: EventType,
    pub date_fields: &'static [&'static str],
    pub title: TitleRule,
    pub end_date_fields: &'static [&'static str],
    pub start_time_fields: &'static [&'static str],
    pub end_time_fields: &'static [&'static str],
}

/// Mapping table, one row per [`EventType`] in canonical order.
pub const FIELD_MAPPINGS: [FieldMapping; 5] = [
    FieldMapping {
        category: EventType::Event,
        date_fields: &["start_date", "date"],
        title: TitleRule::Fields(&["title"]),
        end_date_fields: &["end_date"],
        start_time_fields: &["start_time"],
        end_time_fields: &["end_time"],
    },
    FieldMapping {
        category: EventType::Holiday,
        date_fields: &["holiday_date", "date"],
        title: TitleRule::Fields(&["occasion", "name"]),
        end_date_fields: &[],
        start_time_fields: &[],
        end_time_fields: &[],
    },
    FieldMapping {
        category: EventType::Meeting,
        date_fields: &["meeting_date", "date"],
        title: TitleRule::Fields(&["title"]),
        end_date_fields: &[],
        start_time_fields: &["start_time"],
        end_time_fields: &["end_time"],
    },
    FieldMapping {
        category: EventType::Leave,
        date_fields: &["start_date"],
        title: TitleRule::StaffLeave,
        end_date_fields: &["end_date"],
        start_time_fields: &[],
        end_time_fields: &[],
    },
    FieldMapping {
        category: EventType::Interview,
        date_fields: &["interview_date", "scheduled_date", "date"],
        title: TitleRule::Interview,
        end_date_fields: &[],
        start_time_fields: &["interview_time", "start_time"],
        end_time_fields: &["end_time"],
    },
];

/// Mapping row for `category`.
pub fn mapping_for(category: EventType) -> &'static FieldMapping {
    match category {
        EventType::Event => &FIELD_MAPPINGS[0],
        EventType::Holiday => &FIELD_MAPPINGS[1],
        EventType::Meeting => &FIELD_MAPPINGS[2],
        EventType::Leave => &FIELD_MAPPINGS[3],
        EventType::Interview => &FIELD_MAPPINGS[4],
    }
}

/// Why a raw record did not produce an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingDate,
    InvalidDate(String),
    NotApproved(String),
    /// Recurring holiday on Feb 29 projected onto a common year.
    NoRecurrence(CalendarDate),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "record is not a JSON object"),
            Self::MissingDate => write!(f, "record has no date field"),
            Self::InvalidDate(raw) => write!(f, "unparseable date '{raw}'"),
            Self::NotApproved(status) => write!(f, "leave status is '{status}', not approved"),
            Self::NoRecurrence(date) => write!(f, "recurring date {date} has no counterpart"),
        }
    }
}

/// Normalize one raw record of `category` fetched for `month`.
///
/// `index` is the record's position in its source list and only used to
/// synthesize an id when the record has none.
pub fn normalize_record(
    category: EventType,
    raw: &Value,
    index: usize,
    month: MonthKey,
) -> Result<CalendarEvent, SkipReason> {
    let record = raw.as_object().ok_or(SkipReason::NotAnObject)?;
    let mapping = mapping_for(category);

    if category == EventType::Leave {
        if let Some(status) = text_field(record, "status") {
            if !status.eq_ignore_ascii_case(APPROVED_STATUS) {
                return Err(SkipReason::NotApproved(status));
            }
        }
    }

    let raw_date = first_text(record, mapping.date_fields).ok_or(SkipReason::MissingDate)?;
    let mut date =
        CalendarDate::parse(&raw_date).map_err(|_| SkipReason::InvalidDate(raw_date.clone()))?;

    if category == EventType::Holiday && is_recurring(record) && date.year() != month.year() {
        date = date.with_year(month.year()).ok_or(SkipReason::NoRecurrence(date))?;
    }

    let end_date = first_text(record, mapping.end_date_fields)
        .and_then(|raw| CalendarDate::parse(&raw).ok());

    Ok(CalendarEvent {
        id: text_field(record, "id").unwrap_or_else(|| format!("{category}-{index}")),
        event_type: category,
        title: resolve_title(mapping, record),
        date,
        end_date,
        start_time: first_text(record, mapping.start_time_fields),
        end_time: first_text(record, mapping.end_time_fields),
        source_record: raw.clone(),
    })
}

fn resolve_title(mapping: &FieldMapping, record: &Map<String, Value>) -> String {
    match mapping.title {
        TitleRule::Fields(fields) => first_text(record, fields)
            .unwrap_or_else(|| mapping.category.label().to_string()),
        TitleRule::StaffLeave => format!("{}{LEAVE_TITLE_SUFFIX}", staff_name(record)),
        TitleRule::Interview => first_text(record, &["title"])
            .unwrap_or_else(|| format!("{}{INTERVIEW_TITLE_SUFFIX}", candidate_name(record))),
    }
}

fn staff_name(record: &Map<String, Value>) -> String {
    let Some(staff) = record.get("staff_member").and_then(Value::as_object) else {
        return UNKNOWN_STAFF_NAME.to_string();
    };
    if let Some(full) = text_field(staff, "full_name") {
        return full;
    }
    let parts: Vec<String> =
        ["first_name", "last_name"].iter().filter_map(|key| text_field(staff, key)).collect();
    if parts.is_empty() {
        UNKNOWN_STAFF_NAME.to_string()
    } else {
        parts.join(" ")
    }
}

fn candidate_name(record: &Map<String, Value>) -> String {
    record
        .get("candidate")
        .and_then(Value::as_object)
        .and_then(|candidate| text_field(candidate, "full_name"))
        .or_else(|| text_field(record, "candidate_name"))
        .unwrap_or_else(|| UNKNOWN_CANDIDATE_NAME.to_string())
}

fn is_recurring(record: &Map<String, Value>) -> bool {
    match record.get("is_recurring") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => matches!(s.as_str(), "1" | "true"),
        _ => false,
    }
}

/// First field in `keys` that holds non-empty text.
fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_field(record, key))
}

/// String or number field as trimmed text; `null` and blank strings are absent.
fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn june() -> MonthKey {
        MonthKey::new(2024, 6).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn mapping_table_covers_every_type_in_order() {
        for (row, expected) in FIELD_MAPPINGS.iter().zip(EventType::ALL) {
            assert_eq!(row.category, expected);
            assert_eq!(mapping_for(expected).category, expected);
        }
    }

    #[test]
    fn event_prefers_start_date_over_date() {
        let raw = json!({ "id": 3, "title": "Town Hall", "start_date": "2024-06-10", "date": "2024-06-11" });
        let event = normalize_record(EventType::Event, &raw, 0, june()).unwrap();
        assert_eq!(event.id, "3");
        assert_eq!(event.title, "Town Hall");
        assert_eq!(event.date, date(2024, 6, 10));
        assert_eq!(event.source_record, raw);
    }

    #[test]
    fn event_falls_back_to_date() {
        let raw = json!({ "title": "Offsite", "start_date": null, "date": "2024-06-20T08:00:00Z" });
        let event = normalize_record(EventType::Event, &raw, 4, june()).unwrap();
        assert_eq!(event.date, date(2024, 6, 20));
        assert_eq!(event.id, "event-4");
    }

    #[test]
    fn holiday_title_prefers_occasion() {
        let raw = json!({ "occasion": "Independence Day", "name": "IDay", "date": "2024-06-10" });
        let event = normalize_record(EventType::Holiday, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Independence Day");

        let raw = json!({ "name": "Founders Day", "holiday_date": "2024-06-14" });
        let event = normalize_record(EventType::Holiday, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Founders Day");
        assert_eq!(event.date, date(2024, 6, 14));
    }

    #[test]
    fn recurring_holiday_is_projected_onto_requested_year() {
        let raw = json!({ "name": "Founders Day", "date": "2019-06-14", "is_recurring": true });
        let event = normalize_record(EventType::Holiday, &raw, 0, june()).unwrap();
        assert_eq!(event.date, date(2024, 6, 14));

        let raw = json!({ "name": "One-off", "date": "2019-06-14", "is_recurring": false });
        let event = normalize_record(EventType::Holiday, &raw, 0, june()).unwrap();
        assert_eq!(event.date, date(2019, 6, 14));
    }

    #[test]
    fn recurring_leap_day_has_no_counterpart_in_common_year() {
        let raw = json!({ "name": "Leap Day", "date": "2024-02-29", "is_recurring": 1 });
        let feb_2023 = MonthKey::new(2023, 2).unwrap();
        let err = normalize_record(EventType::Holiday, &raw, 0, feb_2023).unwrap_err();
        assert_eq!(err, SkipReason::NoRecurrence(date(2024, 2, 29)));
    }

    #[test]
    fn meeting_carries_times() {
        let raw = json!({
            "id": "m-1",
            "title": "Payroll review",
            "meeting_date": "2024-06-12",
            "start_time": "10:00",
            "end_time": "11:00"
        });
        let event = normalize_record(EventType::Meeting, &raw, 0, june()).unwrap();
        assert_eq!(event.start_time.as_deref(), Some("10:00"));
        assert_eq!(event.end_time.as_deref(), Some("11:00"));
        assert_eq!(event.event_type, EventType::Meeting);
    }

    #[test]
    fn leave_title_is_synthesized_from_staff_name() {
        let raw = json!({
            "id": 11,
            "staff_member": { "full_name": "Ada Lovelace" },
            "start_date": "2024-06-03",
            "end_date": "2024-06-05",
            "status": "Approved"
        });
        let event = normalize_record(EventType::Leave, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Ada Lovelace - Leave");
        assert_eq!(event.date, date(2024, 6, 3));
        assert_eq!(event.end_date, Some(date(2024, 6, 5)));
    }

    #[test]
    fn leave_name_falls_back_to_name_parts_then_placeholder() {
        let raw = json!({
            "staff_member": { "first_name": "Grace", "last_name": "Hopper" },
            "start_date": "2024-06-03"
        });
        let event = normalize_record(EventType::Leave, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Grace Hopper - Leave");

        let raw = json!({ "start_date": "2024-06-03" });
        let event = normalize_record(EventType::Leave, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Unknown staff - Leave");
    }

    #[test]
    fn leave_ignores_date_field_and_rejects_unapproved() {
        let raw = json!({ "staff_member": { "full_name": "A" }, "date": "2024-06-03" });
        assert_eq!(
            normalize_record(EventType::Leave, &raw, 0, june()).unwrap_err(),
            SkipReason::MissingDate
        );

        let raw = json!({ "start_date": "2024-06-03", "status": "pending" });
        assert_eq!(
            normalize_record(EventType::Leave, &raw, 0, june()).unwrap_err(),
            SkipReason::NotApproved("pending".into())
        );
    }

    #[test]
    fn interview_title_falls_back_to_candidate() {
        let raw = json!({
            "candidate": { "full_name": "Alan Turing" },
            "scheduled_date": "2024-06-18",
            "interview_time": "14:30"
        });
        let event = normalize_record(EventType::Interview, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Alan Turing - Interview");
        assert_eq!(event.start_time.as_deref(), Some("14:30"));

        let raw = json!({ "title": "Panel: backend role", "date": "2024-06-19" });
        let event = normalize_record(EventType::Interview, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Panel: backend role");
    }

    #[test]
    fn missing_title_uses_type_label() {
        let raw = json!({ "meeting_date": "2024-06-12", "title": "  " });
        let event = normalize_record(EventType::Meeting, &raw, 0, june()).unwrap();
        assert_eq!(event.title, "Meeting");
    }

    #[test]
    fn malformed_records_are_skipped() {
        assert_eq!(
            normalize_record(EventType::Event, &json!("nope"), 0, june()).unwrap_err(),
            SkipReason::NotAnObject
        );
        assert_eq!(
            normalize_record(EventType::Event, &json!({ "title": "x" }), 0, june()).unwrap_err(),
            SkipReason::MissingDate
        );
        assert_eq!(
            normalize_record(EventType::Event, &json!({ "start_date": "soon" }), 0, june())
                .unwrap_err(),
            SkipReason::InvalidDate("soon".into())
        );
    }
}
