use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hrcal_core::CalendarSource;
use hrcal_domain::{EventType, HrCalError, MonthKey, Result as DomainResult};
use serde_json::Value;

/// In-memory mock for `CalendarSource`.
///
/// Returns a fixed list of raw records (or a fixed error) and remembers
/// which months were requested.
pub struct MockCalendarSource {
    category: EventType,
    records: Vec<Value>,
    error: Option<HrCalError>,
    requested: Mutex<Vec<MonthKey>>,
    calls: AtomicUsize,
}

impl MockCalendarSource {
    /// Create a mock seeded with the provided records.
    pub fn new(category: EventType, records: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            category,
            records,
            error: None,
            requested: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Create a mock whose every fetch fails with `error`.
    pub fn failing(category: EventType, error: HrCalError) -> Arc<Self> {
        Arc::new(Self {
            category,
            records: Vec::new(),
            error: Some(error),
            requested: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<MonthKey> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarSource for MockCalendarSource {
    fn category(&self) -> EventType {
        self.category
    }

    async fn fetch_month(&self, month: MonthKey) -> DomainResult<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(month);
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.records.clone()),
        }
    }
}
