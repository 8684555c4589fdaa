//! Write coalescing
//!
//! A burst of edits collapses into one document write: each `schedule`
//! replaces the pending value and pushes the deadline out by the quiet
//! period. The clock is passed in, so callers decide what "now" is.

use std::time::{Duration, Instant};

/// Holds the latest value until it has been quiet for `delay`
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value; the deadline restarts from `now`
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending value if its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.take_pending(),
            _ => None,
        }
    }

    /// Take the pending value regardless of its deadline
    pub fn take_pending(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_pending_initially() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(Duration::from_millis(1000));
        assert!(!debouncer.is_pending());
        assert!(debouncer.take_due(Instant::now()).is_none());
    }

    #[test]
    fn test_value_due_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));
        debouncer.schedule(1, start);

        assert!(debouncer.take_due(start + Duration::from_millis(999)).is_none());
        assert_eq!(debouncer.take_due(start + Duration::from_millis(1000)), Some(1));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_burst_collapses_to_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));
        debouncer.schedule(1, start);
        debouncer.schedule(2, start + Duration::from_millis(500));
        debouncer.schedule(3, start + Duration::from_millis(900));

        // Deadline moved with the last edit
        assert!(debouncer.take_due(start + Duration::from_millis(1500)).is_none());
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(1900))
        );
        assert_eq!(debouncer.take_due(start + Duration::from_millis(1900)), Some(3));
    }

    #[test]
    fn test_take_pending_ignores_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.schedule("state", start);
        assert_eq!(debouncer.take_pending(), Some("state"));
        assert!(debouncer.take_pending().is_none());
    }
}
