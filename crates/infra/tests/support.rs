//! Shared helpers for infra integration tests: a mock HR API server.

use std::sync::Arc;

use hrcal_domain::ApiConfig;
use hrcal_infra::HrApiClient;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock HR API rooted at `/api`.
pub struct MockHrApi {
    pub server: MockServer,
}

impl MockHrApi {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig { base_url: self.base_url(), timeout_seconds: 5, ..ApiConfig::default() }
    }

    pub fn client(&self) -> Arc<HrApiClient> {
        Arc::new(HrApiClient::from_config(&self.api_config()).expect("api client should build"))
    }

    /// Serve `body` for `GET /api{collection}?year=..&month=..`.
    pub async fn serve(&self, collection: &str, year: i32, month: u32, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api{collection}")))
            .and(query_param("year", year.to_string()))
            .and(query_param("month", month.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every request to `collection` with `status`.
    pub async fn fail(&self, collection: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/api{collection}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}
