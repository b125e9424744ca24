//! Error handling for the API module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The response body did not match the expected schema.
    #[error("Response validation error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http {
        status: u16,
        message: String,
        retry_after: Option<u64>,
    },
}

/// Error body shape used by the monitor API for 4xx/5xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<String>,
    message: Option<String>,
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());
        // Prefer the structured error message when the body carries one.
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);

        ApiError::Http {
            status,
            message,
            retry_after,
        }
    }

    /// HTTP status of the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided retry-after delay in seconds, for 429 responses.
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            ApiError::Http { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_retry_after_accessors() {
        let err = ApiError::Http {
            status: 429,
            message: "slow down".to_string(),
            retry_after: Some(45),
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.retry_after_seconds(), Some(45));

        let decode: ApiError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(decode.status(), None);
        assert_eq!(decode.retry_after_seconds(), None);
    }
}
