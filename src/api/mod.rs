use crate::api::error::ApiError;
use crate::api::types::{Keyword, KeywordList, MatchPage, MonitorStatus};
use crate::environment::Environment;
use crate::filters::{FilterState, QuerySnapshot};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MonitorApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// List all configured keywords.
    async fn keywords(&self) -> Result<KeywordList, ApiError>;

    /// Create a new keyword. The server responds 409 on duplicates and
    /// 400 on validation failures.
    async fn create_keyword(&self, value: &str) -> Result<Keyword, ApiError>;

    /// Delete a keyword by id. The server responds 404 if it is already gone.
    async fn delete_keyword(&self, keyword_id: &str) -> Result<(), ApiError>;

    /// Fetch exactly one page of filtered, sorted matches plus the total count.
    async fn matches(&self, snapshot: &QuerySnapshot) -> Result<MatchPage, ApiError>;

    /// Fetch the monitor's current health and last-run metrics.
    async fn monitor_status(&self) -> Result<MonitorStatus, ApiError>;

    /// Export the full filtered match set as CSV bytes. Pagination and
    /// sort never apply here.
    async fn export_csv(&self, filters: &FilterState) -> Result<Vec<u8>, ApiError>;
}
