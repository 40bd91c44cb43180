//! Tick scheduling.

use std::time::Duration;

/// Timer collaborator that fires the renderer's tick.
///
/// A scheduler holds at most one recurring interval. Changing the interval
/// is always a [`cancel`](Scheduler::cancel) followed by a fresh
/// [`schedule`](Scheduler::schedule).
pub trait Scheduler {
    /// Start firing ticks every `interval`.
    fn schedule(&mut self, interval: Duration);

    /// Stop firing ticks.
    fn cancel(&mut self);
}

/// Which tick interval is in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TickSpeed {
    #[default]
    Base,
    Fast,
}

impl TickSpeed {
    /// Toggle between base and fast.
    pub fn toggle(self) -> Self {
        match self {
            TickSpeed::Base => TickSpeed::Fast,
            TickSpeed::Fast => TickSpeed::Base,
        }
    }
}
