//! Virtual clock for delayed display reverts
//!
//! Reverts are fire-and-forget: once scheduled, each one fires exactly once
//! when the clock passes its deadline, whatever happened in between.

use std::time::Duration;

/// Pending revert deadlines on a manually advanced clock
#[derive(Debug, Clone, Default)]
pub struct RevertTimer {
    now: Duration,
    deadlines: Vec<Duration>,
}

impl RevertTimer {
    /// Creates a timer at time zero with nothing scheduled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of reverts still waiting
    #[must_use]
    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    /// Schedules a revert `delay` from now
    pub fn schedule(&mut self, delay: Duration) {
        self.deadlines.push(self.now + delay);
    }

    /// Moves the clock forward and returns how many reverts came due
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.now += elapsed;
        let now = self.now;
        let before = self.deadlines.len();
        self.deadlines.retain(|deadline| *deadline > now);
        before - self.deadlines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut timer = RevertTimer::new();
        timer.schedule(ms(700));
        assert_eq!(timer.advance(ms(699)), 0);
        assert_eq!(timer.pending(), 1);
        assert_eq!(timer.advance(ms(1)), 1);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_each_revert_fires_once() {
        let mut timer = RevertTimer::new();
        timer.schedule(ms(700));
        timer.advance(ms(300));
        timer.schedule(ms(700));
        assert_eq!(timer.advance(ms(400)), 1);
        assert_eq!(timer.advance(ms(299)), 0);
        assert_eq!(timer.advance(ms(1)), 1);
        assert_eq!(timer.advance(ms(10_000)), 0);
    }

    #[test]
    fn test_clock_accumulates() {
        let mut timer = RevertTimer::new();
        timer.advance(ms(5));
        timer.advance(ms(10));
        assert_eq!(timer.now(), ms(15));
    }
}
