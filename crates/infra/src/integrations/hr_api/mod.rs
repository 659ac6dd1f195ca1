//! HR REST API integration
//!
//! - [`client`]: authenticated GET of paginated collections
//! - [`envelope`]: unwrapping of the response shapes the API produces
//! - [`sources`]: `CalendarSource` implementations backed by the API

pub mod client;
pub mod envelope;
pub mod sources;

pub use client::HrApiClient;
pub use envelope::{extract_page, Page};
pub use sources::{default_sources, HttpCalendarSource};
