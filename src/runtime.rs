//! Runtime wiring for the dashboard worker set

use crate::api::ApiClient;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::Event;
use crate::workers::core::{EventSender, WorkerConfig};
use crate::workers::exporter::{ExportRequest, Exporter};
use crate::workers::keyword_loader::KeywordLoader;
use crate::workers::match_fetcher::{MatchFetcher, QueryRequest};
use crate::workers::status_poller::StatusPoller;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

/// Channel handles the UI uses to drive the workers, plus the event
/// stream they report back on.
pub struct DashboardWorkers {
    pub event_receiver: mpsc::Receiver<Event>,
    pub query_sender: watch::Sender<QueryRequest>,
    pub reload_keywords_sender: mpsc::Sender<()>,
    pub export_sender: mpsc::Sender<ExportRequest>,
    pub join_handles: Vec<JoinHandle<()>>,
}

/// Start the status poller, match fetcher, keyword loader, and exporter.
/// Each worker gets its own shutdown subscription and reports through the
/// shared event channel; the workers never share state beyond that.
pub fn start_dashboard_workers(
    api: ApiClient,
    config: WorkerConfig,
    shutdown: &broadcast::Sender<()>,
    initial_query: QueryRequest,
) -> DashboardWorkers {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let events = EventSender::new(event_sender);

    let (query_sender, query_receiver) = watch::channel(initial_query);
    let (reload_keywords_sender, reload_keywords_receiver) = mpsc::channel::<()>(1);
    let (export_sender, export_receiver) = mpsc::channel::<ExportRequest>(1);

    let mut join_handles = Vec::new();

    let poller = StatusPoller::new(Box::new(api.clone()), events.clone());
    join_handles.push(tokio::spawn(poller.run(shutdown.subscribe())));

    let fetcher = MatchFetcher::new(Box::new(api.clone()), events.clone());
    join_handles.push(tokio::spawn(
        fetcher.run(query_receiver, shutdown.subscribe()),
    ));

    let loader = KeywordLoader::new(Box::new(api.clone()), events.clone());
    join_handles.push(tokio::spawn(
        loader.run(reload_keywords_receiver, shutdown.subscribe()),
    ));

    let exporter = Exporter::new(Box::new(api), events, config);
    join_handles.push(tokio::spawn(
        exporter.run(export_receiver, shutdown.subscribe()),
    ));

    DashboardWorkers {
        event_receiver,
        query_sender,
        reload_keywords_sender,
        export_sender,
        join_handles,
    }
}
