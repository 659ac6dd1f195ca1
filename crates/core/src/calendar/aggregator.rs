//! Event aggregation across source categories.
//!
//! All registered sources are fetched concurrently for one month and joined
//! before normalization. A failing source contributes nothing and is
//! reported in [`AggregatedMonth::failures`]; it never fails the whole
//! aggregation.

use std::sync::Arc;

use futures::future::join_all;
use hrcal_domain::{CalendarEvent, EventType, HrCalError, MonthKey, Result};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::adapters::normalize_record;
use crate::calendar_ports::CalendarSource;

/// A source whose fetch failed during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFailure {
    pub category: EventType,
    pub error: HrCalError,
}

/// Result of aggregating every source for one month.
///
/// `events` keeps source registration order, then each source's record
/// order. It is not sorted by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMonth {
    pub month: MonthKey,
    pub events: Vec<CalendarEvent>,
    pub failures: Vec<SourceFailure>,
    /// Records dropped during normalization.
    pub skipped: usize,
}

impl AggregatedMonth {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Merges heterogeneous sources into one normalized event list
#[derive(Clone, Default)]
pub struct EventAggregator {
    sources: Vec<Arc<dyn CalendarSource>>,
}

impl EventAggregator {
    /// Create an aggregator over `sources`, in the order given.
    pub fn new(sources: Vec<Arc<dyn CalendarSource>>) -> Self {
        Self { sources }
    }

    /// Register another source after the existing ones.
    pub fn with_source(mut self, source: Arc<dyn CalendarSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn categories(&self) -> Vec<EventType> {
        self.sources.iter().map(|source| source.category()).collect()
    }

    /// Fetch and normalize every source for `(year, month)`.
    ///
    /// # Errors
    /// Returns `HrCalError::InvalidInput` when the month is invalid. Source
    /// failures are never returned as errors.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, year: i32, month: u32) -> Result<AggregatedMonth> {
        let month = MonthKey::new(year, month)?;
        Ok(self.aggregate_month(month).await)
    }

    /// Fetch and normalize every source for an already validated month.
    pub async fn aggregate_month(&self, month: MonthKey) -> AggregatedMonth {
        let fetches = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            async move {
                let category = source.category();
                (category, source.fetch_month(month).await)
            }
        });
        let results = join_all(fetches).await;

        let mut events = Vec::new();
        let mut failures = Vec::new();
        let mut skipped = 0usize;

        for (category, result) in results {
            let records = match result {
                Ok(records) => records,
                Err(error) => {
                    warn!(
                        %category,
                        %month,
                        error = %error,
                        "calendar source failed; continuing without it"
                    );
                    failures.push(SourceFailure { category, error });
                    continue;
                }
            };

            debug!(%category, %month, count = records.len(), "normalizing source records");
            for (index, raw) in records.iter().enumerate() {
                match normalize_record(category, raw, index, month) {
                    Ok(event) => events.push(event),
                    Err(reason) => {
                        skipped += 1;
                        debug!(%category, index, %reason, "skipping calendar record");
                    }
                }
            }
        }

        info!(
            %month,
            events = events.len(),
            failed_sources = failures.len(),
            skipped,
            "calendar aggregation finished"
        );

        AggregatedMonth { month, events, failures, skipped }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;

    struct StaticSource {
        category: EventType,
        outcome: Result<Vec<Value>>,
    }

    impl StaticSource {
        fn ok(category: EventType, records: Vec<Value>) -> Arc<dyn CalendarSource> {
            Arc::new(Self { category, outcome: Ok(records) })
        }

        fn failing(category: EventType) -> Arc<dyn CalendarSource> {
            Arc::new(Self {
                category,
                outcome: Err(HrCalError::Network("HTTP 503 Service Unavailable".into())),
            })
        }
    }

    #[async_trait]
    impl CalendarSource for StaticSource {
        fn category(&self) -> EventType {
            self.category
        }

        async fn fetch_month(&self, _month: MonthKey) -> Result<Vec<Value>> {
            self.outcome.clone()
        }
    }

    struct SlowSource {
        category: EventType,
        delay: std::time::Duration,
    }

    #[async_trait]
    impl CalendarSource for SlowSource {
        fn category(&self) -> EventType {
            self.category
        }

        async fn fetch_month(&self, _month: MonthKey) -> Result<Vec<Value>> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![json!({ "title": "slow", "date": "2024-06-05" })])
        }
    }

    #[tokio::test]
    async fn fetches_sources_concurrently() {
        let delay = std::time::Duration::from_millis(200);
        let aggregator = EventAggregator::new(vec![
            Arc::new(SlowSource { category: EventType::Event, delay }),
            Arc::new(SlowSource { category: EventType::Meeting, delay }),
        ]);

        let started = std::time::Instant::now();
        let month = aggregator.aggregate(2024, 6).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(month.events.len(), 2);
        assert!(elapsed < delay * 2 - std::time::Duration::from_millis(50), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn failing_source_does_not_hide_the_others() {
        let aggregator = EventAggregator::new(vec![
            StaticSource::ok(EventType::Event, vec![json!({ "title": "A", "start_date": "2024-06-01" })]),
            StaticSource::failing(EventType::Holiday),
            StaticSource::ok(EventType::Meeting, vec![json!({ "title": "B", "meeting_date": "2024-06-02" })]),
            StaticSource::ok(
                EventType::Leave,
                vec![json!({ "staff_member": { "full_name": "C" }, "start_date": "2024-06-03" })],
            ),
        ]);

        let month = aggregator.aggregate(2024, 6).await.unwrap();

        let types: Vec<EventType> = month.events.iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec![EventType::Event, EventType::Meeting, EventType::Leave]);
        assert_eq!(month.failures.len(), 1);
        assert_eq!(month.failures[0].category, EventType::Holiday);
        assert!(!month.is_complete());
    }

    #[tokio::test]
    async fn keeps_source_order_not_date_order() {
        let aggregator = EventAggregator::new(vec![
            StaticSource::ok(EventType::Event, vec![json!({ "title": "late", "date": "2024-06-28" })]),
            StaticSource::ok(EventType::Holiday, vec![json!({ "name": "early", "date": "2024-06-01" })]),
        ]);

        let month = aggregator.aggregate(2024, 6).await.unwrap();
        let titles: Vec<&str> = month.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["late", "early"]);
    }

    #[tokio::test]
    async fn counts_skipped_records() {
        let aggregator = EventAggregator::new(vec![StaticSource::ok(
            EventType::Event,
            vec![json!({ "title": "ok", "date": "2024-06-01" }), json!({ "title": "no date" }), json!(42)],
        )]);

        let month = aggregator.aggregate(2024, 6).await.unwrap();
        assert_eq!(month.events.len(), 1);
        assert_eq!(month.skipped, 2);
        assert!(month.is_complete());
    }

    #[tokio::test]
    async fn rejects_invalid_month_before_fetching() {
        let aggregator = EventAggregator::default();
        let err = aggregator.aggregate(2024, 13).await.unwrap_err();
        assert!(matches!(err, HrCalError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn every_source_failing_yields_empty_month() {
        let aggregator = EventAggregator::new(vec![
            StaticSource::failing(EventType::Event),
            StaticSource::failing(EventType::Meeting),
        ])
        .with_source(StaticSource::failing(EventType::Leave));

        let month = aggregator.aggregate(2024, 6).await.unwrap();
        assert!(month.events.is_empty());
        assert_eq!(month.failures.len(), 3);
        assert_eq!(
            aggregator.categories(),
            vec![EventType::Event, EventType::Meeting, EventType::Leave]
        );
    }
}
