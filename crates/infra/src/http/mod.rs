//! HTTP transport shared by upstream integrations.

mod client;

pub use client::{HttpClient, HttpClientBuilder};
