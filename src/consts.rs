pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard
    //! client, organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for worker tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Monitor status polling configuration
    pub mod status_polling {
        use std::time::Duration;

        /// Interval between monitor status fetches (milliseconds).
        /// Fires regardless of whether the previous request completed;
        /// an in-flight request is superseded by the next cycle.
        pub const POLL_INTERVAL_MS: u64 = 10_000;

        /// Poll interval assumed for the monitor itself when the status
        /// response does not report one (seconds).
        pub const DEFAULT_MONITOR_INTERVAL_SECS: i64 = 60;

        /// Helper function to get the status poll interval
        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }

    // =============================================================================
    // FILTERING CONFIGURATION
    // =============================================================================

    /// Search input debouncing
    pub mod search {
        use std::time::Duration;

        /// Quiet period before a changed search input is applied (milliseconds).
        /// Only the search field debounces; every other filter applies immediately.
        pub const DEBOUNCE_MS: u64 = 300;

        /// Helper function to get the search quiet period
        pub const fn quiet_period() -> Duration {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }

    /// Match listing pagination
    pub mod matches {
        /// Fixed page size for the match table. Never changed at runtime,
        /// so a page-size change can never reset pagination.
        pub const PAGE_SIZE: u32 = 20;
    }

    // =============================================================================
    // EXPORT CONFIGURATION
    // =============================================================================

    /// CSV export configuration
    pub mod export {
        /// Retry delay assumed when a 429 response carries no usable
        /// retry-after value (seconds).
        pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

        /// Prefix for downloaded export files: `matches-<date>.csv`.
        pub const FILE_PREFIX: &str = "matches";
    }

    // =============================================================================
    // KEYWORD CONFIGURATION
    // =============================================================================

    /// Keyword input validation, enforced before any request is sent
    pub mod keywords {
        /// Maximum keyword length accepted by the server.
        pub const MAX_VALUE_LEN: usize = 64;
    }
}
