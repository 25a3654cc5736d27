use std::time::{Duration, Instant};

/// Repeating timer owned by the event loop. The engine never schedules
/// anything itself; the loop asks this whether a tick is due.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_fire: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_fire: None }
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// First fire is one full interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_fire = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    /// Drops the pending fire and, if running, starts over with `interval`.
    pub fn reschedule(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_running() {
            self.start(now);
        }
    }

    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.next_fire.map(|at| at.saturating_duration_since(now))
    }

    /// True at most once per call. A late loop does not get a burst of
    /// catch-up ticks; the next fire is measured from `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(at) if at <= now => {
                self.next_fire = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
