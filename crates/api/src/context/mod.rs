//! Application context - dependency injection container

use std::str::FromStr;
use std::sync::Arc;

use chrono_tz::Tz;
use hrcal_core::calendar::today_in;
use hrcal_core::{CalendarService, CalendarSource, EventAggregator};
use hrcal_domain::{CalendarDate, Config, GridOptions, HrCalError, Result};
use hrcal_infra::{config, default_sources, HrApiClient};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub calendar: CalendarService,
    timezone: Option<Tz>,
}

impl AppContext {
    /// Wire HTTP client → HR API client → sources → aggregator → service.
    ///
    /// # Errors
    /// `HrCalError::Config` when the configuration fails validation or the
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config::validate(&config)?;
        let client = Arc::new(HrApiClient::from_config(&config.api)?);
        let sources = default_sources(client, &config.calendar.sources);
        Self::with_sources(config, sources)
    }

    /// Build a context over caller-supplied sources.
    pub fn with_sources(config: Config, sources: Vec<Arc<dyn CalendarSource>>) -> Result<Self> {
        let timezone = parse_timezone(config.calendar.timezone.as_deref())?;
        let options = GridOptions {
            week_start: config.calendar.week_start,
            pad_trailing: config.calendar.pad_trailing_cells,
        };

        let aggregator = EventAggregator::new(sources);
        info!(
            sources = ?aggregator.categories(),
            week_start = %options.week_start,
            timezone = ?timezone,
            "calendar context ready"
        );

        let calendar = CalendarService::new(aggregator, options)
            .with_today(Arc::new(move || today_in(timezone)));

        Ok(Self { config, calendar, timezone })
    }

    /// Today in the configured zone.
    pub fn today(&self) -> CalendarDate {
        today_in(self.timezone)
    }
}

fn parse_timezone(zone: Option<&str>) -> Result<Option<Tz>> {
    zone.map(|name| {
        Tz::from_str(name).map_err(|_| HrCalError::Config(format!("Unknown timezone: {}", name)))
    })
    .transpose()
}
