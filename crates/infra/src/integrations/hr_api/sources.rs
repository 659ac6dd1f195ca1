//! HTTP-backed calendar sources
//!
//! Each source is one category bound to one collection path. Requests carry
//! `year` and `month`; the leaves source also asks for approved records only.

use std::sync::Arc;

use async_trait::async_trait;
use hrcal_core::CalendarSource;
use hrcal_domain::constants::APPROVED_STATUS;
use hrcal_domain::{EventType, MonthKey, Result, SourceConfig, SourcesConfig};
use serde_json::Value;
use tracing::{debug, instrument};

use super::client::HrApiClient;

/// `CalendarSource` fetching one collection from the HR API.
pub struct HttpCalendarSource {
    category: EventType,
    path: String,
    client: Arc<HrApiClient>,
    extra_query: Vec<(&'static str, String)>,
}

impl HttpCalendarSource {
    pub fn new(category: EventType, path: impl Into<String>, client: Arc<HrApiClient>) -> Self {
        let extra_query = match category {
            EventType::Leave => vec![("status", APPROVED_STATUS.to_string())],
            _ => Vec::new(),
        };
        Self { category, path: path.into(), client, extra_query }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string sent for `month`.
    pub fn query_for(&self, month: MonthKey) -> Vec<(&'static str, String)> {
        let mut query = vec![("year", month.year().to_string()), ("month", month.month().to_string())];
        query.extend(self.extra_query.iter().cloned());
        query
    }
}

#[async_trait]
impl CalendarSource for HttpCalendarSource {
    fn category(&self) -> EventType {
        self.category
    }

    #[instrument(skip(self), fields(category = %self.category, path = %self.path))]
    async fn fetch_month(&self, month: MonthKey) -> Result<Vec<Value>> {
        let query = self.query_for(month);
        let records = self.client.get_collection(&self.path, &query).await?;
        debug!(count = records.len(), "source fetched");
        Ok(records)
    }
}

/// Build the enabled sources in aggregation order: events, holidays,
/// meetings, leaves, interviews.
pub fn default_sources(client: Arc<HrApiClient>, config: &SourcesConfig) -> Vec<Arc<dyn CalendarSource>> {
    let entries: [(EventType, &SourceConfig); 5] = [
        (EventType::Event, &config.events),
        (EventType::Holiday, &config.holidays),
        (EventType::Meeting, &config.meetings),
        (EventType::Leave, &config.leaves),
        (EventType::Interview, &config.interviews),
    ];

    entries
        .into_iter()
        .filter(|(_, source)| source.enabled)
        .map(|(category, source)| {
            Arc::new(HttpCalendarSource::new(category, source.path.clone(), Arc::clone(&client)))
                as Arc<dyn CalendarSource>
        })
        .collect()
}
