//! # HRCal Infrastructure
//!
//! Infrastructure implementations of core calendar ports.
//!
//! This crate contains:
//! - HTTP client with timeout and optional retry
//! - HR REST API client, envelope unwrapping and HTTP-backed sources
//! - Configuration loading (environment, JSON, TOML)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `hrcal-core`
//! - Depends on `hrcal-domain` and `hrcal-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::hr_api::{default_sources, extract_page, HrApiClient, HttpCalendarSource};
pub use observability::init_tracing;
