//! Monitor API Client
//!
//! A JSON client for the brand-protection monitor API, covering keyword
//! management, match listing, monitor status, and CSV export.

use crate::api::MonitorApi;
use crate::api::error::ApiError;
use crate::api::types::{Keyword, KeywordList, MatchPage, MonitorStatus};
use crate::environment::Environment;
use crate::filters::{FilterState, QuerySnapshot};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("ctwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn get_bytes(&self, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn delete_request(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .delete(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MonitorApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn keywords(&self) -> Result<KeywordList, ApiError> {
        self.get_request("keywords").await
    }

    async fn create_keyword(&self, value: &str) -> Result<Keyword, ApiError> {
        let body = serde_json::json!({ "value": value });
        self.post_json("keywords", &body).await
    }

    async fn delete_keyword(&self, keyword_id: &str) -> Result<(), ApiError> {
        let id_path = urlencoding::encode(keyword_id).into_owned();
        self.delete_request(&format!("keywords/{}", id_path)).await
    }

    async fn matches(&self, snapshot: &QuerySnapshot) -> Result<MatchPage, ApiError> {
        let endpoint = format!("matches?{}", snapshot.query_string());
        self.get_request(&endpoint).await
    }

    async fn monitor_status(&self) -> Result<MonitorStatus, ApiError> {
        self.get_request("monitor/status").await
    }

    async fn export_csv(&self, filters: &FilterState) -> Result<Vec<u8>, ApiError> {
        let query = filters.export_query_string();
        let endpoint = if query.is_empty() {
            "export.csv".to_string()
        } else {
            format!("export.csv?{}", query)
        };
        self.get_bytes(&endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Pagination;

    #[test]
    fn build_url_normalizes_slashes() {
        let client = ApiClient::new(Environment::Custom {
            api_base_url: "http://monitor.example.com/api/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.build_url("/monitor/status"),
            "http://monitor.example.com/api/monitor/status"
        );
        assert_eq!(
            client.build_url("keywords"),
            "http://monitor.example.com/api/keywords"
        );
    }

    #[test]
    fn match_endpoint_includes_snapshot_query() {
        let mut filters = FilterState::default();
        filters.search = "acme".to_string();
        let snapshot = QuerySnapshot::new(filters, &Pagination::default());
        assert_eq!(
            format!("matches?{}", snapshot.query_string()),
            "matches?search=acme&page=1&limit=20&sort_by=first_seen_at&sort_order=desc"
        );
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live monitor backend.
mod live_api_tests {
    use super::*;

    #[tokio::test]
    #[ignore] // This test requires a running monitor backend.
    /// Should fetch the monitor status from a local backend.
    async fn test_monitor_status() {
        let client = ApiClient::new(Environment::Local).unwrap();
        match client.monitor_status().await {
            Ok(status) => println!("Monitor status: {}", status),
            Err(e) => panic!("Failed to fetch monitor status: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a running monitor backend.
    /// Should list keywords from a local backend.
    async fn test_keywords() {
        let client = ApiClient::new(Environment::Local).unwrap();
        match client.keywords().await {
            Ok(list) => println!("Got {} keywords", list.total),
            Err(e) => panic!("Failed to list keywords: {}", e),
        }
    }
}
