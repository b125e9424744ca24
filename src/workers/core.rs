//! Core worker utilities and shared configuration

use crate::events::{Event, EventPayload, EventType};
use crate::logging::LogLevel;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_status_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: EventPayload,
    ) {
        self.send_event(
            Event::status_with_level(message, event_type, log_level).with_payload(payload),
        )
        .await;
    }

    pub async fn send_match_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: EventPayload,
    ) {
        self.send_event(
            Event::matches_with_level(message, event_type, log_level).with_payload(payload),
        )
        .await;
    }

    pub async fn send_keyword_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: EventPayload,
    ) {
        self.send_event(
            Event::keywords_with_level(message, event_type, log_level).with_payload(payload),
        )
        .await;
    }

    pub async fn send_export_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: EventPayload,
    ) {
        self.send_event(
            Event::export_with_level(message, event_type, log_level).with_payload(payload),
        )
        .await;
    }
}

/// Worker configuration shared across all worker types
#[derive(Clone)]
pub struct WorkerConfig {
    pub environment: crate::environment::Environment,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
}

impl WorkerConfig {
    pub fn new(environment: crate::environment::Environment, export_dir: PathBuf) -> Self {
        Self {
            environment,
            export_dir,
        }
    }
}
