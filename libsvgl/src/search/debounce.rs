//! Quiet-period debouncing with an injected clock

use std::time::{Duration, Instant};

/// Holds the latest value until no newer one arrives within `delay`
///
/// Intermediate values are replaced, never queued.
#[derive(Debug, Clone)]
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

    /// Record `value` and restart the quiet period at `now`
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value if its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, due)) if due <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_value_released_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push("git", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + DELAY), Some("git"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_new_value_resets_timer_and_drops_old() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push("g", start);
        debouncer.push("gi", start + Duration::from_millis(200));
        debouncer.push("git", start + Duration::from_millis(400));

        // The first value's deadline has passed, but it was replaced
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(700))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(700)), Some("git"));
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_no_deadline_when_idle() {
        let debouncer: Debouncer<String> = Debouncer::new(DELAY);
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.delay(), DELAY);
    }
}
