//! Calendar source port interfaces
//!
//! A source is one upstream collection (events, holidays, meetings, approved
//! leaves, interviews) that can be fetched for a single month. Sources hand
//! back raw JSON records; normalization happens in
//! [`crate::calendar::adapters`].

use async_trait::async_trait;
use hrcal_domain::{EventType, MonthKey, Result};
use serde_json::Value;

/// Trait for fetching one source category for a month
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Category this source feeds; selects the field-mapping rule.
    fn category(&self) -> EventType;

    /// Fetch the raw records for `month`.
    async fn fetch_month(&self, month: MonthKey) -> Result<Vec<Value>>;
}
