//! CSV export execution
//!
//! Performs one export per request: builds the filtered request, fetches
//! the CSV payload, writes it to the export directory, and reports the
//! outcome classified for the workflow state machine.

use super::core::{EventSender, WorkerConfig};
use crate::api::MonitorApi;
use crate::events::{EventPayload, EventType};
use crate::export::{ExportFailure, export_file_name, today};
use crate::filters::FilterState;
use crate::logging::LogLevel;
use tokio::sync::{broadcast, mpsc};

/// A frozen filter snapshot to export. Pagination and sort never apply;
/// the export always returns the full filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub filters: FilterState,
}

pub struct Exporter {
    api: Box<dyn MonitorApi>,
    event_sender: EventSender,
    config: WorkerConfig,
}

impl Exporter {
    pub fn new(api: Box<dyn MonitorApi>, event_sender: EventSender, config: WorkerConfig) -> Self {
        Self {
            api,
            event_sender,
            config,
        }
    }

    pub async fn run(
        self,
        mut requests: mpsc::Receiver<ExportRequest>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                request = requests.recv() => {
                    let Some(request) = request else { break };
                    self.execute(&request).await;
                }
            }
        }
    }

    /// Run a single export and report success or a classified failure.
    pub async fn execute(&self, request: &ExportRequest) {
        let bytes = match self.api.export_csv(&request.filters).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let failure = ExportFailure::classify(&e);
                let log_level = match failure {
                    ExportFailure::RateLimited { .. } => LogLevel::Info,
                    _ => LogLevel::Warn,
                };
                self.event_sender
                    .send_export_event(
                        format!("Export failed: {}", e),
                        EventType::Error,
                        log_level,
                        EventPayload::ExportFailed(failure),
                    )
                    .await;
                return;
            }
        };

        let path = self.config.export_dir.join(export_file_name(today()));
        match tokio::fs::write(&path, &bytes).await {
            Ok(()) => {
                self.event_sender
                    .send_export_event(
                        format!("Exported {} bytes to {}", bytes.len(), path.display()),
                        EventType::Success,
                        LogLevel::Info,
                        EventPayload::ExportDone { path },
                    )
                    .await;
            }
            Err(e) => {
                self.event_sender
                    .send_export_event(
                        format!("Failed to write export file: {}", e),
                        EventType::Error,
                        LogLevel::Error,
                        EventPayload::ExportFailed(ExportFailure::Unknown),
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
    use crate::environment::Environment;
    use crate::events::Event;
    use tempfile::tempdir;

    fn config(dir: &std::path::Path) -> WorkerConfig {
        WorkerConfig::new(Environment::Local, dir.to_path_buf())
    }

    #[tokio::test]
    /// A successful export writes the CSV to disk and reports the path.
    async fn export_writes_file_and_reports_path() {
        let dir = tempdir().unwrap();
        let mut api = MockMonitorApi::new();
        api.expect_export_csv()
            .returning(|_| Ok(b"id,value\n1,acme\n".to_vec()));

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let exporter = Exporter::new(Box::new(api), EventSender::new(tx), config(dir.path()));

        exporter
            .execute(&ExportRequest {
                filters: FilterState::default(),
            })
            .await;

        let event = rx.recv().await.unwrap();
        match event.payload {
            EventPayload::ExportDone { path } => {
                assert!(path.starts_with(dir.path()));
                let name = path.file_name().unwrap().to_string_lossy();
                assert!(name.starts_with("matches-") && name.ends_with(".csv"));
                assert_eq!(std::fs::read(&path).unwrap(), b"id,value\n1,acme\n");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    /// 429 responses surface the server's retry-after verbatim.
    async fn rate_limited_export_reports_retry_after() {
        let dir = tempdir().unwrap();
        let mut api = MockMonitorApi::new();
        api.expect_export_csv().returning(|_| {
            Err(crate::api::error::ApiError::Http {
                status: 429,
                message: "rate limited".to_string(),
                retry_after: Some(45),
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let exporter = Exporter::new(Box::new(api), EventSender::new(tx), config(dir.path()));

        exporter
            .execute(&ExportRequest {
                filters: FilterState::default(),
            })
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.payload,
            EventPayload::ExportFailed(ExportFailure::RateLimited { retry_after_secs: 45 })
        );
    }

    #[tokio::test]
    /// Server errors classify as the generic try-again-later failure.
    async fn server_error_classifies_as_server_failure() {
        let dir = tempdir().unwrap();
        let mut api = MockMonitorApi::new();
        api.expect_export_csv().returning(|_| {
            Err(crate::api::error::ApiError::Http {
                status: 502,
                message: "bad gateway".to_string(),
                retry_after: None,
            })
        });

        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let exporter = Exporter::new(Box::new(api), EventSender::new(tx), config(dir.path()));

        exporter
            .execute(&ExportRequest {
                filters: FilterState::default(),
            })
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.payload,
            EventPayload::ExportFailed(ExportFailure::Server)
        );
    }
}
