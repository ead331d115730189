//! Single-slot debounce cell for re-resolution

use std::time::{Duration, Instant};

/// Replace-on-write pending-work cell.
///
/// At most one resolution is ever pending per editor session: scheduling
/// again moves the deadline instead of queueing. The host loop polls with
/// the current time and performs the work when `poll` reports the deadline
/// passed. Rapid successive edits (a slider drag) therefore coalesce into
/// one resolution shortly after the last input.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Delay short enough to feel live, long enough to coalesce a drag
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm the cell, replacing any pending deadline
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed; the slot clears
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut cell = Debouncer::new(Duration::from_millis(50));
        let start = Instant::now();
        cell.schedule(start);

        assert!(!cell.poll(start));
        assert!(cell.poll(start + Duration::from_millis(50)));
        // The slot cleared; nothing left to fire
        assert!(!cell.poll(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut cell = Debouncer::new(Duration::from_millis(50));
        let start = Instant::now();
        cell.schedule(start);
        // A second edit arrives 30ms in; the deadline moves
        cell.schedule(start + Duration::from_millis(30));

        assert!(!cell.poll(start + Duration::from_millis(50)));
        assert!(cell.poll(start + Duration::from_millis(80)));
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut cell = Debouncer::default();
        let start = Instant::now();
        cell.schedule(start);
        assert!(cell.is_pending());

        cell.cancel();
        assert!(!cell.is_pending());
        assert!(!cell.poll(start + Duration::from_secs(1)));
    }
}
