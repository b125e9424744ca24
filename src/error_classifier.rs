//! Centralized error classification for network operations

use crate::api::error::ApiError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify error and determine appropriate log level
    pub fn classify_fetch_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Rate limiting - low priority, the server is telling us when to come back
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Conflict / not-found - a single bad request, not systemic
            ApiError::Http { status, .. } if *status == 404 || *status == 409 => LogLevel::Info,

            // Other client errors - something is wrong with what we sent
            ApiError::Http { status, .. } if (400..=499).contains(status) => LogLevel::Error,

            // Schema mismatches are treated as fetch failures but flagged loudly
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            ApiError::Reqwest(_) => LogLevel::Warn,

            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
            retry_after: None,
        }
    }

    #[test]
    fn classifies_by_status_range() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_fetch_error(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify_fetch_error(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify_fetch_error(&http(404)), LogLevel::Info);
        assert_eq!(classifier.classify_fetch_error(&http(409)), LogLevel::Info);
        assert_eq!(classifier.classify_fetch_error(&http(400)), LogLevel::Error);
    }

    #[test]
    fn decode_failures_are_errors() {
        let classifier = ErrorClassifier::new();
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(classifier.classify_fetch_error(&err), LogLevel::Error);
    }
}
