//! Monitor status polling with latest-wins supersede semantics

use super::core::EventSender;
use crate::api::MonitorApi;
use crate::consts::cli_consts::status_polling;
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventPayload, EventType};
use crate::logging::LogLevel;
use tokio::sync::broadcast;
use tokio::time::timeout;

/// Fetches the monitor status on a fixed cadence, regardless of whether
/// the previous request completed. A request still in flight when the
/// next cycle is due is abandoned, never queued.
pub struct StatusPoller {
    api: Box<dyn MonitorApi>,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl StatusPoller {
    pub fn new(api: Box<dyn MonitorApi>, event_sender: EventSender) -> Self {
        Self {
            api,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut interval = tokio::time::interval(status_polling::poll_interval());

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = interval.tick() => self.poll_once().await,
            }
        }
    }

    async fn poll_once(&self) {
        // Bounding the request by the poll interval is what supersedes a
        // stuck request: when the timeout fires the next tick is due.
        match timeout(status_polling::poll_interval(), self.api.monitor_status()).await {
            Ok(Ok(status)) => {
                self.event_sender
                    .send_status_event(
                        format!("Monitor status: {}", status),
                        EventType::Refresh,
                        LogLevel::Debug,
                        EventPayload::Status(status),
                    )
                    .await;
            }
            Ok(Err(e)) => {
                let log_level = self.classifier.classify_fetch_error(&e);
                self.event_sender
                    .send_status_event(
                        format!("Failed to fetch monitor status: {}", e),
                        EventType::Error,
                        log_level,
                        EventPayload::None,
                    )
                    .await;
            }
            Err(_) => {
                self.event_sender
                    .send_status_event(
                        "Status request superseded by next poll cycle".to_string(),
                        EventType::Waiting,
                        LogLevel::Debug,
                        EventPayload::None,
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
    use crate::api::types::{MonitorState, MonitorStatus};
    use crate::events::Event;
    use tokio::sync::{broadcast, mpsc};

    fn idle_status() -> MonitorStatus {
        MonitorStatus {
            state: MonitorState::Idle,
            last_run_at: Some("2026-08-07T10:00:00Z".to_string()),
            last_success_at: Some("2026-08-07T10:00:00Z".to_string()),
            last_error_code: None,
            last_error_message: None,
            metrics_last_run: None,
            poll_interval_seconds: Some(60),
        }
    }

    #[tokio::test]
    /// A successful poll emits the status verbatim as an event payload.
    async fn poll_emits_status_payload() {
        let mut api = MockMonitorApi::new();
        api.expect_monitor_status()
            .returning(|| Ok(idle_status()));

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let poller = StatusPoller::new(Box::new(api), EventSender::new(tx));
        poller.poll_once().await;

        let event = rx.recv().await.unwrap();
        match event.payload {
            EventPayload::Status(status) => assert_eq!(status.state, MonitorState::Idle),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    /// Fetch failures are classified and reported, never swallowed.
    async fn poll_reports_failures() {
        let mut api = MockMonitorApi::new();
        api.expect_monitor_status().returning(|| {
            Err(crate::api::error::ApiError::Http {
                status: 503,
                message: "unavailable".to_string(),
                retry_after: None,
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let poller = StatusPoller::new(Box::new(api), EventSender::new(tx));
        poller.poll_once().await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert_eq!(event.payload, EventPayload::None);
    }

    #[tokio::test]
    /// Shutdown stops the polling loop.
    async fn run_stops_on_shutdown() {
        let mut api = MockMonitorApi::new();
        api.expect_monitor_status()
            .returning(|| Ok(idle_status()));

        let (tx, _rx) = mpsc::channel::<Event>(8);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let poller = StatusPoller::new(Box::new(api), EventSender::new(tx));

        let handle = tokio::spawn(poller.run(shutdown_rx));
        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
