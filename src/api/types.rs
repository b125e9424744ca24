//! Wire types for the monitor API.
//!
//! Every response body is deserialized into one of these types before the
//! rest of the client trusts it; a shape mismatch surfaces as a decode
//! error and is handled like any other fetch failure.

use serde::Deserialize;
use std::fmt::Display;

/// Lifecycle state of a configured keyword.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KeywordStatus {
    Active,
    Inactive,
}

/// An operator-configured brand term matched against certificate names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Keyword {
    pub keyword_id: String,
    pub value: String,
    pub normalized_value: String,
    pub status: KeywordStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordList {
    pub items: Vec<Keyword>,
    pub total: u64,
}

/// Which certificate name field the keyword matched.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchedField {
    Cn,
    San,
    Both,
}

/// A certificate whose name matched a keyword. Read-only on this side;
/// matches are never created, edited, or deleted by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Match {
    pub id: String,
    pub keyword_id: String,
    pub keyword_value: String,
    pub certificate_sha256: String,
    pub matched_field: MatchedField,
    pub matched_value: String,
    pub domain_name: Option<String>,
    pub issuer_cn: Option<String>,
    pub issuer_org: Option<String>,
    pub subject_cn: Option<String>,
    pub subject_org: Option<String>,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
    pub first_seen_at: String,
    pub last_seen_at: String,
    pub is_new: bool,
    pub ct_log_index: u64,
}

/// One page of filtered matches plus the filtered total.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchPage {
    pub items: Vec<Match>,
    pub total: u64,
}

/// Reported state of the polling monitor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MonitorState {
    Idle,
    Running,
    Error,
}

/// Counters and latencies from the monitor's most recent cycle.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct RunMetrics {
    pub processed_count: u64,
    pub match_count: u64,
    pub parse_error_count: u64,
    pub duration_ms: u64,
    pub ct_latency_ms: u64,
    pub db_latency_ms: u64,
}

/// Monitor health as reported by `GET /monitor/status`. The client never
/// mutates this; the `state` field is surfaced verbatim for presentation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitorStatus {
    pub state: MonitorState,
    pub last_run_at: Option<String>,
    pub last_success_at: Option<String>,
    pub last_error_code: Option<String>,
    pub last_error_message: Option<String>,
    pub metrics_last_run: Option<RunMetrics>,
    /// Monitor poll cadence in seconds. Older servers omit this.
    #[serde(default)]
    pub poll_interval_seconds: Option<i64>,
}

impl Display for MonitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (last run: {})",
            self.state,
            self.last_run_at.as_deref().unwrap_or("never")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_status_decodes_without_poll_interval() {
        let body = r#"{
            "state": "idle",
            "last_run_at": "2026-08-07T10:00:00Z",
            "last_success_at": "2026-08-07T10:00:00Z",
            "last_error_code": null,
            "last_error_message": null,
            "metrics_last_run": {
                "processed_count": 120,
                "match_count": 3,
                "parse_error_count": 0,
                "duration_ms": 450,
                "ct_latency_ms": 210,
                "db_latency_ms": 12
            }
        }"#;
        let status: MonitorStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.state, MonitorState::Idle);
        assert_eq!(status.poll_interval_seconds, None);
        assert_eq!(status.metrics_last_run.unwrap().match_count, 3);
    }

    #[test]
    fn match_decodes_nullable_fields() {
        let body = format!(
            r#"{{
            "id": "6a3d9a9e-0001-4a00-8000-000000000000",
            "keyword_id": "6a3d9a9e-0002-4a00-8000-000000000000",
            "keyword_value": "acme",
            "certificate_sha256": "{}",
            "matched_field": "cn",
            "matched_value": "login-acme.example",
            "domain_name": null,
            "issuer_cn": null,
            "issuer_org": null,
            "subject_cn": "login-acme.example",
            "subject_org": null,
            "not_before": null,
            "not_after": null,
            "first_seen_at": "2026-08-07T09:00:00Z",
            "last_seen_at": "2026-08-07T09:30:00Z",
            "is_new": true,
            "ct_log_index": 123456
        }}"#,
            "ab".repeat(32)
        );
        let m: Match = serde_json::from_str(&body).unwrap();
        assert_eq!(m.matched_field, MatchedField::Cn);
        assert!(m.not_after.is_none());
        assert!(m.is_new);
    }

    #[test]
    fn unknown_monitor_state_is_a_decode_failure() {
        let body = r#"{
            "state": "exploded",
            "last_run_at": null,
            "last_success_at": null,
            "last_error_code": null,
            "last_error_message": null,
            "metrics_last_run": null
        }"#;
        assert!(serde_json::from_str::<MonitorStatus>(body).is_err());
    }
}
