//! Next-poll countdown derivation.
//!
//! Pure computation over server-reported timestamps; the dashboard
//! re-evaluates it on every tick, so it carries no timer of its own.

use chrono::{DateTime, Duration as ChronoDuration, Utc};

/// Seconds until the monitor's next expected poll, derived from the last
/// run timestamp and the poll interval. Returns `None` when there is no
/// basis for a prediction: no last run, an unparsable timestamp, or a
/// non-positive interval. Never negative; clamps at exactly 0 so the
/// caller can present the zero boundary distinctly.
pub fn seconds_until_next_poll(
    last_run_at: Option<&str>,
    interval_secs: i64,
    now: DateTime<Utc>,
) -> Option<u64> {
    if interval_secs <= 0 {
        return None;
    }
    let last_run = DateTime::parse_from_rfc3339(last_run_at?)
        .ok()?
        .with_timezone(&Utc);
    let next_run = last_run + ChronoDuration::seconds(interval_secs);
    let remaining_ms = (next_run - now).num_milliseconds();
    if remaining_ms <= 0 {
        Some(0)
    } else {
        // Ceil to whole seconds so the display never skips straight past 1.
        Some((remaining_ms as u64).div_ceil(1000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const LAST_RUN: &str = "2026-08-07T10:00:00Z";

    fn at(secs_after_last_run: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap()
            + ChronoDuration::seconds(secs_after_last_run)
    }

    #[test]
    fn no_last_run_means_no_prediction() {
        assert_eq!(seconds_until_next_poll(None, 60, at(0)), None);
    }

    #[test]
    fn non_positive_interval_means_no_prediction() {
        assert_eq!(seconds_until_next_poll(Some(LAST_RUN), 0, at(0)), None);
        assert_eq!(seconds_until_next_poll(Some(LAST_RUN), -5, at(0)), None);
    }

    #[test]
    fn unparsable_timestamp_means_no_prediction() {
        assert_eq!(seconds_until_next_poll(Some("not a date"), 60, at(0)), None);
    }

    #[test]
    fn counts_down_and_clamps_at_zero() {
        assert_eq!(seconds_until_next_poll(Some(LAST_RUN), 60, at(0)), Some(60));
        assert_eq!(seconds_until_next_poll(Some(LAST_RUN), 60, at(45)), Some(15));
        assert_eq!(seconds_until_next_poll(Some(LAST_RUN), 60, at(60)), Some(0));
        // Overdue polls stay clamped at 0, never negative.
        assert_eq!(seconds_until_next_poll(Some(LAST_RUN), 60, at(90)), Some(0));
    }

    #[test]
    fn sub_second_remainders_round_up() {
        let now = at(59) - ChronoDuration::milliseconds(500);
        assert_eq!(seconds_until_next_poll(Some(LAST_RUN), 60, now), Some(2));
    }

    #[test]
    // Successive evaluations over time form a non-increasing sequence that
    // reaches 0 and stays there.
    fn countdown_is_monotonic() {
        let mut previous = u64::MAX;
        for elapsed in 0..=120 {
            let remaining = seconds_until_next_poll(Some(LAST_RUN), 60, at(elapsed)).unwrap();
            assert!(remaining <= previous, "countdown increased at t={}", elapsed);
            previous = remaining;
        }
        assert_eq!(previous, 0);
    }
}
