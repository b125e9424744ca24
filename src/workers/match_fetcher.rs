//! Match page fetching driven by query snapshots
//!
//! The dashboard publishes its current snapshot (filters + pagination +
//! sort) on a watch channel whenever it changes; this worker always
//! fetches the newest one. A fetch still in flight when a newer snapshot
//! arrives is abandoned, and every result is tagged with the generation
//! that requested it so the UI can discard anything stale.

use super::core::EventSender;
use crate::api::MonitorApi;
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventPayload, EventType};
use crate::filters::QuerySnapshot;
use crate::logging::LogLevel;
use tokio::sync::{broadcast, watch};

/// One unit of request identity: a frozen snapshot plus the generation
/// counter the dashboard stamped it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub generation: u64,
    pub snapshot: QuerySnapshot,
}

impl QueryRequest {
    pub fn initial(snapshot: QuerySnapshot) -> Self {
        Self {
            generation: 0,
            snapshot,
        }
    }
}

pub struct MatchFetcher {
    api: Box<dyn MonitorApi>,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl MatchFetcher {
    pub fn new(api: Box<dyn MonitorApi>, event_sender: EventSender) -> Self {
        Self {
            api,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    pub async fn run(
        self,
        mut requests: watch::Receiver<QueryRequest>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            // Always take the newest snapshot; intermediate ones that
            // arrived while fetching are skipped, not queued.
            let request = requests.borrow_and_update().clone();

            tokio::select! {
                _ = shutdown.recv() => break,
                changed = requests.changed() => {
                    // A newer snapshot superseded this one before its
                    // fetch even started resolving; loop to pick it up.
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                _ = self.fetch_once(&request) => {}
            }

            tokio::select! {
                _ = shutdown.recv() => break,
                changed = requests.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    }

    /// Fetch a single page for the given request and report the result,
    /// tagged with the request's generation.
    pub async fn fetch_once(&self, request: &QueryRequest) {
        match self.api.matches(&request.snapshot).await {
            Ok(page) => {
                let count = page.items.len();
                self.event_sender
                    .send_match_event(
                        format!(
                            "Loaded page {} ({} of {} matches)",
                            request.snapshot.page, count, page.total
                        ),
                        EventType::Success,
                        LogLevel::Debug,
                        EventPayload::MatchPage {
                            generation: request.generation,
                            items: page.items,
                            total: page.total,
                        },
                    )
                    .await;
            }
            Err(e) => {
                // No retry here; the transport's single built-in retry is
                // the only one this layer gets.
                let log_level = self.classifier.classify_fetch_error(&e);
                self.event_sender
                    .send_match_event(
                        format!("Failed to load matches: {}", e),
                        EventType::Error,
                        log_level,
                        EventPayload::MatchPageFailed {
                            generation: request.generation,
                        },
                    )
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMonitorApi;
    use crate::api::types::MatchPage;
    use crate::events::Event;
    use crate::filters::{FilterState, Pagination};
    use tokio::sync::{broadcast, mpsc};

    fn snapshot_with_search(search: &str) -> QuerySnapshot {
        let mut filters = FilterState::default();
        filters.search = search.to_string();
        QuerySnapshot::new(filters, &Pagination::default())
    }

    #[tokio::test]
    /// Results carry the generation of the snapshot that requested them.
    async fn results_are_generation_tagged() {
        let mut api = MockMonitorApi::new();
        api.expect_matches().returning(|_| {
            Ok(MatchPage {
                items: vec![],
                total: 0,
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let fetcher = MatchFetcher::new(Box::new(api), EventSender::new(tx));

        let request = QueryRequest {
            generation: 42,
            snapshot: snapshot_with_search("acme"),
        };
        fetcher.fetch_once(&request).await;

        let event = rx.recv().await.unwrap();
        match event.payload {
            EventPayload::MatchPage { generation, .. } => assert_eq!(generation, 42),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    /// Failures are tagged too, so only the current query's loading
    /// indicator is cleared.
    async fn failures_are_generation_tagged() {
        let mut api = MockMonitorApi::new();
        api.expect_matches().returning(|_| {
            Err(crate::api::error::ApiError::Http {
                status: 500,
                message: "boom".to_string(),
                retry_after: None,
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let fetcher = MatchFetcher::new(Box::new(api), EventSender::new(tx));

        let request = QueryRequest {
            generation: 7,
            snapshot: snapshot_with_search(""),
        };
        fetcher.fetch_once(&request).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(
            event.payload,
            EventPayload::MatchPageFailed { generation: 7 }
        );
    }

    #[tokio::test]
    /// The run loop fetches the latest snapshot after a change and stops
    /// cleanly on shutdown.
    async fn run_fetches_latest_snapshot() {
        let mut api = MockMonitorApi::new();
        api.expect_matches().returning(|snapshot| {
            Ok(MatchPage {
                items: vec![],
                total: snapshot.page as u64,
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let (request_tx, request_rx) =
            watch::channel(QueryRequest::initial(snapshot_with_search("")));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let fetcher = MatchFetcher::new(Box::new(api), EventSender::new(tx));
        let handle = tokio::spawn(fetcher.run(request_rx, shutdown_rx));

        // Initial fetch for generation 0.
        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first.payload,
            EventPayload::MatchPage { generation: 0, .. }
        ));

        // Publish a newer snapshot; the fetcher picks it up.
        let mut snapshot = snapshot_with_search("acme");
        snapshot.page = 3;
        request_tx
            .send(QueryRequest {
                generation: 1,
                snapshot,
            })
            .unwrap();

        let second = rx.recv().await.unwrap();
        match second.payload {
            EventPayload::MatchPage { generation, total, .. } => {
                assert_eq!(generation, 1);
                assert_eq!(total, 3);
            }
            other => panic!("unexpected payload: {:?}", other),
        }

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
