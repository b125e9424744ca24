//! Keyword list loading
//!
//! Loads the configured keywords once at startup and again whenever a
//! reload is requested (the listing is invalidated by keyword mutations).

use super::core::EventSender;
use crate::api::MonitorApi;
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventPayload, EventType};
use crate::logging::LogLevel;
use tokio::sync::{broadcast, mpsc};

pub struct KeywordLoader {
    api: Box<dyn MonitorApi>,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl KeywordLoader {
    pub fn new(api: Box<dyn MonitorApi>, event_sender: EventSender) -> Self {
        Self {
            api,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    pub async fn run(
        self,
        mut reload: mpsc::Receiver<()>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            self.load_once().await;

            tokio::select! {
                _ = shutdown.recv() => break,
                signal = reload.recv() => {
                    if signal.is_none() {
                        break;
                    }
                }
            }
        }
    }

    /// Fetch the keyword list and report the result.
    pub async fn load_once(&self) {
        match self.api.keywords().await {
            Ok(list) => {
                self.event_sender
                    .send_keyword_event(
                        format!("Loaded {} keywords", list.total),
                        EventType::Refresh,
                        LogLevel::Debug,
                        EventPayload::Keywords(list.items),
                    )
                    .await;
            }
            Err(e) => {
                let log_level = self.classifier.classify_fetch_error(&e);
                self.event_sender
                    .send_keyword_event(
                        format!("Failed to load keywords: {}", e),
                        EventType::Error,
                        log_level,
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
    use crate::api::types::KeywordList;
    use crate::events::Event;

    #[tokio::test]
    /// A successful load carries the keyword items as payload.
    async fn load_emits_keywords() {
        let mut api = MockMonitorApi::new();
        api.expect_keywords().returning(|| {
            Ok(KeywordList {
                items: vec![],
                total: 0,
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let loader = KeywordLoader::new(Box::new(api), EventSender::new(tx));
        loader.load_once().await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.payload, EventPayload::Keywords(vec![]));
    }

    #[tokio::test]
    /// Reload signals trigger another fetch; shutdown stops the loop.
    async fn reload_triggers_refetch() {
        let mut api = MockMonitorApi::new();
        api.expect_keywords().times(2).returning(|| {
            Ok(KeywordList {
                items: vec![],
                total: 0,
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let (reload_tx, reload_rx) = mpsc::channel::<()>(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let loader = KeywordLoader::new(Box::new(api), EventSender::new(tx));
        let handle = tokio::spawn(loader.run(reload_rx, shutdown_rx));

        rx.recv().await.unwrap();
        reload_tx.send(()).await.unwrap();
        rx.recv().await.unwrap();

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
