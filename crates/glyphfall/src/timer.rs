//! Frame timer driving the rain from the event loop.

use std::time::{Duration, Instant};

use glyphfall_core::Scheduler;

/// How long to wait for input when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A recurring deadline the event loop polls against.
#[derive(Debug)]
pub struct FrameTimer {
    interval: Option<Duration>,
    next_due: Instant,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            interval: None,
            next_due: Instant::now(),
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    fn schedule_from(&mut self, interval: Duration, now: Instant) {
        self.interval = Some(interval);
        self.next_due = now + interval;
    }

    /// How long the event loop may block before the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        match self.interval {
            Some(_) => self.next_due.saturating_duration_since(now),
            None => IDLE_POLL,
        }
    }

    /// Returns `true` when a tick is due and arms the next deadline.
    ///
    /// Missed deadlines are not replayed; a late tick fires once and the
    /// next one is a full interval away.
    pub fn fire(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        if now < self.next_due {
            return false;
        }
        self.next_due += interval;
        if self.next_due <= now {
            self.next_due = now + interval;
        }
        true
    }
}

impl Scheduler for FrameTimer {
    fn schedule(&mut self, interval: Duration) {
        self.schedule_from(interval, Instant::now());
    }

    fn cancel(&mut self) {
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);

    #[test]
    fn test_unscheduled_never_fires() {
        let mut timer = FrameTimer::new();
        let now = Instant::now();
        assert!(!timer.fire(now + Duration::from_secs(5)));
        assert_eq!(timer.timeout(now), IDLE_POLL);
    }

    #[test]
    fn test_fires_on_interval() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.schedule_from(MS_50, start);

        assert_eq!(timer.timeout(start), MS_50);
        assert!(!timer.fire(start + Duration::from_millis(49)));
        assert!(timer.fire(start + MS_50));
        assert!(!timer.fire(start + Duration::from_millis(60)));
        assert!(timer.fire(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_late_tick_fires_once() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.schedule_from(MS_50, start);

        let late = start + Duration::from_millis(500);
        assert!(timer.fire(late));
        assert!(!timer.fire(late));
        assert_eq!(timer.timeout(late), MS_50);
    }

    #[test]
    fn test_cancel_then_reschedule() {
        let mut timer = FrameTimer::new();
        timer.schedule(MS_50);
        timer.cancel();
        assert_eq!(timer.interval(), None);

        timer.schedule(Duration::from_millis(25));
        assert_eq!(timer.interval(), Some(Duration::from_millis(25)));
    }
}
