//! Session setup and initialization

use crate::api::{ApiClient, MonitorApi};
use crate::events::Event;
use crate::filters::{FilterState, Pagination, QuerySnapshot};
use crate::runtime::start_dashboard_workers;
use crate::workers::core::WorkerConfig;
use crate::workers::exporter::ExportRequest;
use crate::workers::match_fetcher::QueryRequest;
use std::error::Error;
use std::path::PathBuf;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Publishes the current query snapshot to the match fetcher
    pub query_sender: watch::Sender<QueryRequest>,
    /// Requests a keyword list reload
    pub reload_keywords_sender: mpsc::Sender<()>,
    /// Requests a CSV export
    pub export_sender: mpsc::Sender<ExportRequest>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// API client, for display and command reuse
    pub api: ApiClient,
    /// Filters the session started with
    pub initial_filters: FilterState,
}

/// Sets up a dashboard worker session
///
/// This function handles all the common setup required for both TUI and
/// headless modes:
/// 1. Creates the API client
/// 2. Sets up the shutdown channel
/// 3. Starts the dashboard workers with the initial query snapshot
/// 4. Returns session data for mode-specific handling
pub fn setup_session(
    api: ApiClient,
    export_dir: PathBuf,
    initial_filters: FilterState,
) -> Result<SessionData, Box<dyn Error>> {
    let environment = api.environment().clone();

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let initial_query = QueryRequest::initial(QuerySnapshot::new(
        initial_filters.clone(),
        &Pagination::default(),
    ));

    let workers = start_dashboard_workers(
        api.clone(),
        WorkerConfig::new(environment, export_dir),
        &shutdown_sender,
        initial_query,
    );

    Ok(SessionData {
        event_receiver: workers.event_receiver,
        query_sender: workers.query_sender,
        reload_keywords_sender: workers.reload_keywords_sender,
        export_sender: workers.export_sender,
        join_handles: workers.join_handles,
        shutdown_sender,
        api,
        initial_filters,
    })
}
