//! Quiet-period coalescing for rapid input.
//!
//! Time is passed in by the caller instead of read from a clock, so the
//! view layer drives it with `Instant::now()` and tests with fixed offsets.

use std::time::{Duration, Instant};

/// Default quiet period for search input.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(120);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Holds the latest scheduled value until no newer one arrives for `quiet`.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending value and restart the quiet period at `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
    }

    /// Take the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn only_last_value_in_window_fires() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(120));
        d.schedule("r", t0);
        d.schedule("re", t0 + ms(40));
        d.schedule("red", t0 + ms(90));

        // first keystroke's deadline has passed, but it was superseded
        assert_eq!(d.poll(t0 + ms(130)), None);
        assert_eq!(d.poll(t0 + ms(210)), Some("red"));
        assert_eq!(d.poll(t0 + ms(400)), None);
    }

    #[test]
    fn deadline_moves_with_each_schedule() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(100));
        assert_eq!(d.deadline(), None);
        d.schedule(1, t0);
        assert_eq!(d.deadline(), Some(t0 + ms(100)));
        d.schedule(2, t0 + ms(50));
        assert_eq!(d.deadline(), Some(t0 + ms(150)));
    }

    #[test]
    fn fires_exactly_at_deadline() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(120));
        d.schedule((), t0);
        assert_eq!(d.poll(t0 + ms(119)), None);
        assert_eq!(d.poll(t0 + ms(120)), Some(()));
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut d: Debouncer<u8> = Debouncer::default();
        assert_eq!(d.quiet(), DEFAULT_QUIET);
        d.schedule(7, t0);
        assert!(d.is_pending());
        assert_eq!(d.cancel(), Some(7));
        assert_eq!(d.poll(t0 + ms(1000)), None);
    }
}
