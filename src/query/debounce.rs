//! Debounce timer for the search input
//!
//! Delays propagation of a rapidly changing value until it has been stable
//! for a fixed interval, so the API is not queried on every keystroke.
//! Tick-driven rather than timer-driven: the UI loop calls `poll_ready`
//! once per tick and the debouncer compares deadlines, which keeps the
//! whole thing deterministic under test (no sleeping, no callbacks).

use std::time::{Duration, Instant};

/// Debouncer for a single string value.
///
/// Each `observe` schedules the new value for release after the configured
/// delay, superseding any pending value: only the most recent change's
/// deadline can fire. A value can also be seeded at startup to propagate
/// unconditionally on the first poll.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    /// Pending value and the instant it becomes ready.
    pending: Option<(String, Instant)>,
    /// Last observed raw value, used to ignore no-op observations.
    last_seen: Option<String>,
}

impl Debouncer {
    /// Create a debouncer with the given delay
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_seen: None,
        }
    }

    /// Seed an initial value that becomes ready immediately
    pub fn seed(&mut self, value: &str, now: Instant) {
        self.last_seen = Some(value.to_string());
        self.pending = Some((value.to_string(), now));
    }

    /// Observe the current input value.
    ///
    /// A changed value replaces any pending one and restarts the delay.
    /// Observing the same value again is a no-op, so cursor movement and
    /// redraws do not push the deadline out.
    pub fn observe(&mut self, value: &str) {
        self.observe_at(value, Instant::now());
    }

    /// `observe` with an explicit clock, for deterministic tests
    pub fn observe_at(&mut self, value: &str, now: Instant) {
        if self.last_seen.as_deref() == Some(value) {
            return;
        }
        self.last_seen = Some(value.to_string());
        self.pending = Some((value.to_string(), now + self.delay));
    }

    /// Release the pending value if its deadline has passed.
    ///
    /// Returns each settled value at most once.
    pub fn poll_ready(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop any pending value without releasing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting on its deadline
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_value_released_only_after_delay() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.observe_at("1", t0);
        assert_eq!(debouncer.poll_ready(t0), None);
        assert_eq!(debouncer.poll_ready(t0 + Duration::from_millis(499)), None);
        assert_eq!(debouncer.poll_ready(t0 + DELAY), Some("1".to_string()));
    }

    #[test]
    fn test_rapid_changes_release_only_last_value() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.observe_at("1", t0);
        debouncer.observe_at("12", t0 + Duration::from_millis(100));
        debouncer.observe_at("123", t0 + Duration::from_millis(200));

        // The first two deadlines were superseded and never fire
        assert_eq!(debouncer.poll_ready(t0 + DELAY), None);
        assert_eq!(
            debouncer.poll_ready(t0 + Duration::from_millis(200) + DELAY),
            Some("123".to_string())
        );
    }

    #[test]
    fn test_released_at_most_once() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.observe_at("abc", t0);
        assert_eq!(debouncer.poll_ready(t0 + DELAY), Some("abc".to_string()));
        assert_eq!(debouncer.poll_ready(t0 + DELAY * 2), None);
    }

    #[test]
    fn test_duplicate_observation_does_not_reschedule() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.observe_at("abc", t0);
        // Same value again just before the deadline must not push it out
        debouncer.observe_at("abc", t0 + Duration::from_millis(499));
        assert_eq!(debouncer.poll_ready(t0 + DELAY), Some("abc".to_string()));
    }

    #[test]
    fn test_seed_is_ready_immediately() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.seed("1906123456", t0);
        assert_eq!(debouncer.poll_ready(t0), Some("1906123456".to_string()));
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.observe_at("abc", t0);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll_ready(t0 + DELAY), None);
    }

    #[test]
    fn test_change_back_to_earlier_value_still_fires() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.observe_at("a", t0);
        debouncer.observe_at("ab", t0 + Duration::from_millis(50));
        debouncer.observe_at("a", t0 + Duration::from_millis(100));

        assert_eq!(
            debouncer.poll_ready(t0 + Duration::from_millis(100) + DELAY),
            Some("a".to_string())
        );
    }
}
