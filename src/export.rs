//! CSV export workflow.
//!
//! A small state machine driving the export dialog: `Idle → Exporting →
//! {Idle, RateLimited, Error}`. Failed states offer a retry transition
//! back to `Idle`; the in-flight state rejects close so the operator
//! cannot dismiss a running export.

use crate::api::error::ApiError;
use crate::api::types::Keyword;
use crate::consts::cli_consts::export::{DEFAULT_RETRY_AFTER_SECS, FILE_PREFIX};
use crate::filters::FilterState;
use chrono::{DateTime, NaiveDate, Utc};

/// Why an export attempt failed, classified from the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFailure {
    /// HTTP 429; `retry_after_secs` is surfaced to the operator verbatim.
    RateLimited { retry_after_secs: u64 },
    /// HTTP 5xx.
    Server,
    /// Network error, unexpected response shape, or anything else.
    Unknown,
}

impl ExportFailure {
    pub fn classify(error: &ApiError) -> Self {
        match error.status() {
            Some(429) => ExportFailure::RateLimited {
                retry_after_secs: error
                    .retry_after_seconds()
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            },
            Some(status) if status >= 500 => ExportFailure::Server,
            _ => ExportFailure::Unknown,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ExportFailure::RateLimited { retry_after_secs } => format!(
                "Export rate limit exceeded. Try again in {} seconds.",
                retry_after_secs
            ),
            ExportFailure::Server => {
                "Failed to generate export. Please try again later.".to_string()
            }
            ExportFailure::Unknown => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Exporting,
    RateLimited { retry_after_secs: u64 },
    Error { message: String },
}

/// State of the export dialog plus its workflow phase.
#[derive(Debug)]
pub struct ExportWorkflow {
    phase: ExportPhase,
    open: bool,
}

impl Default for ExportWorkflow {
    fn default() -> Self {
        Self {
            phase: ExportPhase::Idle,
            open: false,
        }
    }
}

impl ExportWorkflow {
    pub fn phase(&self) -> &ExportPhase {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_exporting(&self) -> bool {
        self.phase == ExportPhase::Exporting
    }

    pub fn open(&mut self) {
        self.open = true;
        self.phase = ExportPhase::Idle;
    }

    /// Start an export. Returns false if one is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_exporting() {
            return false;
        }
        self.phase = ExportPhase::Exporting;
        true
    }

    /// The download finished; the dialog closes itself.
    pub fn finish_success(&mut self) {
        self.phase = ExportPhase::Idle;
        self.open = false;
    }

    pub fn finish_failure(&mut self, failure: ExportFailure) {
        self.phase = match failure {
            ExportFailure::RateLimited { retry_after_secs } => {
                ExportPhase::RateLimited { retry_after_secs }
            }
            ExportFailure::Server | ExportFailure::Unknown => ExportPhase::Error {
                message: failure.message(),
            },
        };
    }

    /// Clear a failed state back to `Idle` so the operator can re-trigger
    /// the export manually. No attempt counting, no automatic retry.
    pub fn retry(&mut self) -> bool {
        match self.phase {
            ExportPhase::RateLimited { .. } | ExportPhase::Error { .. } => {
                self.phase = ExportPhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Close the dialog. Rejected while an export is in flight.
    pub fn close(&mut self) -> bool {
        if self.is_exporting() {
            return false;
        }
        self.phase = ExportPhase::Idle;
        self.open = false;
        true
    }
}

/// File name for an export performed on the given date:
/// `matches-<ISO-date>.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}-{}.csv", FILE_PREFIX, date.format("%Y-%m-%d"))
}

fn format_date(date: &str) -> String {
    DateTime::parse_from_rfc3339(date)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .or_else(|_| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map(|d| d.format("%b %-d, %Y").to_string())
        })
        .unwrap_or_else(|_| date.to_string())
}

/// Human-readable preview of what an export with these filters returns,
/// one line per active constraint. Empty filters yield the explicit
/// exporting-everything notice.
pub fn filter_summary(filters: &FilterState, keywords: &[Keyword]) -> Vec<String> {
    if !filters.is_active() {
        return vec!["Exporting all matches (no filters applied)".to_string()];
    }

    let mut lines = Vec::new();
    for id in &filters.keyword_ids {
        let label = keywords
            .iter()
            .find(|k| &k.keyword_id == id)
            .map(|k| k.value.clone())
            .unwrap_or_else(|| id.clone());
        lines.push(format!("Keyword: {}", label));
    }
    if !filters.start_date.is_empty() {
        lines.push(format!("From: {}", format_date(&filters.start_date)));
    }
    if !filters.end_date.is_empty() {
        lines.push(format!("To: {}", format_date(&filters.end_date)));
    }
    if !filters.search.is_empty() {
        lines.push(format!("Search: \"{}\"", filters.search));
    }
    if filters.new_only {
        lines.push("New only".to_string());
    }
    lines
}

/// The default export date is the day the export runs.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::KeywordStatus;

    fn http(status: u16, retry_after: Option<u64>) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
            retry_after,
        }
    }

    fn keyword(id: &str, value: &str) -> Keyword {
        Keyword {
            keyword_id: id.to_string(),
            value: value.to_string(),
            normalized_value: value.to_lowercase(),
            status: KeywordStatus::Active,
            created_at: "2026-08-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn classifies_rate_limit_with_server_delay() {
        let failure = ExportFailure::classify(&http(429, Some(45)));
        assert_eq!(failure, ExportFailure::RateLimited { retry_after_secs: 45 });
    }

    #[test]
    fn rate_limit_without_delay_defaults_to_sixty() {
        let failure = ExportFailure::classify(&http(429, None));
        assert_eq!(failure, ExportFailure::RateLimited { retry_after_secs: 60 });
    }

    #[test]
    fn classifies_server_and_unknown_errors() {
        assert_eq!(ExportFailure::classify(&http(500, None)), ExportFailure::Server);
        assert_eq!(ExportFailure::classify(&http(503, None)), ExportFailure::Server);
        assert_eq!(ExportFailure::classify(&http(404, None)), ExportFailure::Unknown);
        let network: ApiError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert_eq!(ExportFailure::classify(&network), ExportFailure::Unknown);
    }

    #[test]
    // 429 with retry-after 45: workflow lands in RateLimited showing 45
    // seconds, close stays available, and retry re-arms the download.
    fn rate_limited_flow() {
        let mut workflow = ExportWorkflow::default();
        workflow.open();
        assert!(workflow.begin());
        workflow.finish_failure(ExportFailure::classify(&http(429, Some(45))));

        assert_eq!(
            workflow.phase(),
            &ExportPhase::RateLimited { retry_after_secs: 45 }
        );
        assert!(workflow.is_open());
        assert!(workflow.retry());
        assert_eq!(workflow.phase(), &ExportPhase::Idle);
    }

    #[test]
    fn close_is_rejected_mid_export() {
        let mut workflow = ExportWorkflow::default();
        workflow.open();
        assert!(workflow.begin());
        assert!(!workflow.close());
        assert!(workflow.is_open());

        workflow.finish_success();
        assert!(!workflow.is_open());
    }

    #[test]
    fn begin_is_rejected_while_exporting() {
        let mut workflow = ExportWorkflow::default();
        workflow.open();
        assert!(workflow.begin());
        assert!(!workflow.begin());
    }

    #[test]
    fn retry_only_applies_to_failed_states() {
        let mut workflow = ExportWorkflow::default();
        workflow.open();
        assert!(!workflow.retry());
        workflow.begin();
        assert!(!workflow.retry());
        workflow.finish_failure(ExportFailure::Server);
        assert!(workflow.retry());
    }

    #[test]
    fn export_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(export_file_name(date), "matches-2026-08-07.csv");
    }

    #[test]
    fn empty_filters_summarize_as_export_everything() {
        let lines = filter_summary(&FilterState::default(), &[]);
        assert_eq!(lines, vec!["Exporting all matches (no filters applied)"]);
    }

    #[test]
    fn summary_lists_active_filters_with_keyword_labels() {
        let mut filters = FilterState::default();
        filters.keyword_ids = vec!["k1".to_string(), "k-missing".to_string()];
        filters.start_date = "2026-08-01".to_string();
        filters.search = "login".to_string();
        filters.new_only = true;

        let lines = filter_summary(&filters, &[keyword("k1", "acme")]);
        assert_eq!(
            lines,
            vec![
                "Keyword: acme",
                "Keyword: k-missing",
                "From: Aug 1, 2026",
                "Search: \"login\"",
                "New only",
            ]
        );
    }
}
