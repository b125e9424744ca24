//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use chrono::{DateTime, Utc};
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::StatusPoller => Color::Cyan,
        Worker::MatchFetcher => Color::Yellow,
        Worker::KeywordLoader => Color::Magenta,
        Worker::Exporter => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some(date_part) = timestamp.split(' ').next() {
        if let Some(time_part) = timestamp.split(' ').nth(1) {
            // Extract MM-DD from date and HH:MM from time
            if let Some(month_day) = date_part.get(5..10) {
                if let Some(hour_min) = time_part.get(0..5) {
                    return format!("{} {}", month_day, hour_min);
                }
            }
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Relative formatting of a server timestamp: "Never", "Just now",
/// "12m ago", "3h ago", else the calendar date.
pub fn format_relative_time(timestamp: Option<&str>) -> String {
    let Some(timestamp) = timestamp else {
        return "Never".to_string();
    };
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let parsed = parsed.with_timezone(&Utc);
    let minutes = (Utc::now() - parsed).num_minutes();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 24 * 60 {
        format!("{}h ago", minutes / 60)
    } else {
        parsed.format("%Y-%m-%d").to_string()
    }
}

/// Truncate long values (fingerprints, domains) for table cells.
pub fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Spinner frame for in-flight indicators, advanced by the UI tick.
pub fn spinner_frame(tick: usize) -> char {
    const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
    FRAMES[tick % FRAMES.len()]
}
