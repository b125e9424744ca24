//! Event System
//!
//! Types and implementations for worker events and logging

use crate::api::types::{Keyword, Match, MonitorStatus};
use crate::export::ExportFailure;
use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that polls the monitor status endpoint.
    StatusPoller,
    /// Worker that fetches filtered match pages.
    MatchFetcher,
    /// Worker that loads the keyword list.
    KeywordLoader,
    /// Worker that executes CSV exports.
    Exporter,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

/// Data carried alongside an event, committed into dashboard state by the
/// UI loop. Kept typed so updaters never parse values back out of display
/// messages.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    None,
    Status(MonitorStatus),
    Keywords(Vec<Keyword>),
    /// One fetched match page, tagged with the query generation that
    /// requested it so stale responses can be rejected.
    MatchPage {
        generation: u64,
        items: Vec<Match>,
        total: u64,
    },
    /// A match fetch failed; the tag lets the UI clear only the loading
    /// indicator that belongs to the current query.
    MatchPageFailed {
        generation: u64,
    },
    ExportDone {
        path: PathBuf,
    },
    ExportFailed(ExportFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    pub payload: EventPayload,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            payload: EventPayload::None,
        }
    }

    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn status_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::StatusPoller, msg, event_type, log_level)
    }

    pub fn matches_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::MatchFetcher, msg, event_type, log_level)
    }

    pub fn keywords_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::KeywordLoader, msg, event_type, log_level)
    }

    pub fn export_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Exporter, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
