//! Search input debouncing.
//!
//! The dashboard's update loop polls the debouncer on every tick, the same
//! way countdown state is refreshed, so there is no timer to leak: when
//! the owning state is dropped or reset, nothing can fire afterwards.

use std::time::{Duration, Instant};

/// Delays propagation of a rapidly-changing text value by a fixed quiet
/// period. Each new value restarts the clock; the final settled value is
/// emitted exactly once per stable period.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    value: String,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            value: String::new(),
            deadline: None,
        }
    }

    /// The immediate (not yet settled) value, i.e. what the input shows.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the immediate value and restart the quiet period.
    pub fn set(&mut self, value: String) {
        self.value = value;
        self.deadline = Some(Instant::now() + self.quiet_period);
    }

    /// Replace the immediate value without scheduling an emission,
    /// discarding any pending one. Used when filters are cleared so the
    /// debounce cannot later resurrect stale text.
    pub fn reset(&mut self, value: String) {
        self.value = value;
        self.deadline = None;
    }

    /// Emit the settled value if the quiet period has elapsed.
    pub fn poll_settled(&mut self) -> Option<String> {
        self.poll_settled_at(Instant::now())
    }

    fn poll_settled_at(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.value.clone())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    // A burst of inputs faster than the quiet period emits only the last
    // value, exactly once, no earlier than the quiet period after it.
    fn burst_emits_last_value_once() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.set("p".to_string());
        debouncer.set("ph".to_string());
        assert_eq!(debouncer.poll_settled_at(start + Duration::from_millis(100)), None);
        debouncer.set("phish".to_string());

        // Not yet stable for the full quiet period after the last input.
        assert_eq!(debouncer.poll_settled_at(start + Duration::from_millis(250)), None);

        let settled = debouncer.poll_settled_at(start + Duration::from_secs(1));
        assert_eq!(settled.as_deref(), Some("phish"));

        // Exactly once.
        assert_eq!(debouncer.poll_settled_at(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn each_input_restarts_the_clock() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.set("a".to_string());
        let after_first = Instant::now();

        // A second input inside the quiet period pushes the deadline out.
        debouncer.set("ab".to_string());
        assert_eq!(
            debouncer.poll_settled_at(after_first + Duration::from_millis(200)),
            None
        );
        assert_eq!(
            debouncer
                .poll_settled_at(after_first + Duration::from_millis(700))
                .as_deref(),
            Some("ab")
        );
    }

    #[test]
    fn reset_discards_pending_emission() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.set("stale".to_string());
        debouncer.reset(String::new());

        assert_eq!(debouncer.value(), "");
        assert_eq!(
            debouncer.poll_settled_at(Instant::now() + Duration::from_secs(5)),
            None
        );
    }

    #[test]
    fn idle_debouncer_emits_nothing() {
        let mut debouncer = Debouncer::new(QUIET);
        assert_eq!(
            debouncer.poll_settled_at(Instant::now() + Duration::from_secs(5)),
            None
        );
    }
}
