//! Debounced full-redraw scheduling.
//!
//! Full repaints are coalesced behind a short deadline: scheduling while a
//! deadline is pending cancels and replaces it, so a burst of change
//! notifications costs one repaint. The pending state is a single optional
//! deadline, nothing else.

use std::time::{Duration, Instant};

/// Default debounce window.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Holds at most one pending full-redraw deadline.
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    delay: Duration,
    pending: Option<Instant>,
}

impl RedrawScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests a debounced redraw. Any pending deadline is replaced, not
    /// stacked.
    pub fn schedule(&mut self, now: Instant) {
        self.pending = Some(now + self.delay);
    }

    /// Drops the pending deadline, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consumes the deadline when it is due. The caller performs the
    /// actual repaint on `true`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if deadline <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::{RedrawScheduler, DEFAULT_DELAY};
    use std::time::{Duration, Instant};

    #[test]
    fn schedule_replaces_pending_deadline() {
        let mut scheduler = RedrawScheduler::default();
        let start = Instant::now();

        scheduler.schedule(start);
        scheduler.schedule(start + Duration::from_millis(50));

        // The first deadline would be due now; the reschedule pushed it out.
        assert!(!scheduler.poll(start + DEFAULT_DELAY));
        assert!(scheduler.poll(start + Duration::from_millis(50) + DEFAULT_DELAY));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn poll_fires_once_per_schedule() {
        let mut scheduler = RedrawScheduler::default();
        let start = Instant::now();

        scheduler.schedule(start);
        assert!(scheduler.poll(start + DEFAULT_DELAY));
        assert!(!scheduler.poll(start + DEFAULT_DELAY * 2));
    }

    #[test]
    fn cancel_drops_the_deadline() {
        let mut scheduler = RedrawScheduler::default();
        let start = Instant::now();

        assert!(!scheduler.cancel());
        scheduler.schedule(start);
        assert!(scheduler.cancel());
        assert!(!scheduler.poll(start + DEFAULT_DELAY));
    }
}
