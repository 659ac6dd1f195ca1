//! HR API HTTP client
//!
//! Issues GET requests against `{base_url}/{path}` and follows paginator
//! envelopes until the last page or the configured page limit.

use hrcal_domain::{ApiConfig, HrCalError, Result};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::envelope::extract_page;
use crate::errors::{status_error, InfraError};
use crate::http::HttpClient;

/// HR API client
#[derive(Clone)]
pub struct HrApiClient {
    http: HttpClient,
    base_url: String,
    max_pages: u32,
}

impl HrApiClient {
    /// Create a client over an existing transport.
    pub fn new(http: HttpClient, base_url: impl Into<String>, max_pages: u32) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, max_pages: max_pages.max(1) }
    }

    /// Client configured from the `[api]` section.
    ///
    /// # Errors
    /// Returns `HrCalError::Config` when the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::new(http, config.base_url.clone(), config.max_pages))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a collection path.
    ///
    /// # Errors
    /// Returns `HrCalError::Config` when the result is not a valid URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined)
            .map_err(|e| HrCalError::Config(format!("Invalid endpoint URL {}: {}", joined, e)))
    }

    /// Fetch every record of the collection at `path`.
    ///
    /// `query` is sent with each page request; `page` is added from the
    /// second page on.
    ///
    /// # Errors
    /// - `HrCalError::Auth` / `NotFound` / `InvalidInput` / `Network` for a
    ///   non-success status
    /// - `HrCalError::Network` for transport failures
    /// - `HrCalError::Parse` for a body that is not JSON
    pub async fn get_collection(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Value>> {
        let url = self.endpoint(path)?;
        let mut records = Vec::new();
        let mut page_number: u32 = 1;

        loop {
            let mut request = self.http.request(Method::GET, url.clone()).query(query);
            if page_number > 1 {
                request = request.query(&[("page", page_number.to_string())]);
            }

            let response = self.http.send(request).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(status_error(status, path));
            }

            let payload: Value = response.json().await.map_err(|e| {
                let infra: InfraError = e.into();
                HrCalError::from(infra)
            })?;

            let page = extract_page(&payload);
            if !page.recognized {
                warn!(path, page = page_number, "unrecognized response envelope; treating as empty");
                break;
            }

            if let Some(current) = page.current_page.filter(|_| page_number > 1) {
                if current != u64::from(page_number) {
                    warn!(
                        path,
                        requested = page_number,
                        returned = current,
                        "server ignored page parameter; stopping pagination"
                    );
                    break;
                }
            }

            debug!(path, page = page_number, count = page.records.len(), "fetched collection page");
            if page.records.is_empty() {
                break;
            }
            let has_more = page.has_more();
            records.extend(page.records);

            if !has_more {
                break;
            }
            if page_number >= self.max_pages {
                warn!(
                    path,
                    max_pages = self.max_pages,
                    last_page = ?page.last_page,
                    "page limit reached; remaining pages ignored"
                );
                break;
            }
            page_number += 1;
        }

        Ok(records)
    }
}
