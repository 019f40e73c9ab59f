use std::thread;
use std::time::{Duration, Instant};

/// Paces the animation between frames.
pub trait WaitPolicy {
    fn wait(&mut self);
}

/// Wakes on a fixed grid of deadlines. A late frame skips the deadlines it
/// missed instead of running the following frames back to back.
#[derive(Debug)]
pub struct FixedCadence {
    period: Duration,
    next_update: Option<Instant>,
}

impl FixedCadence {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_update: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl WaitPolicy for FixedCadence {
    fn wait(&mut self) {
        if self.period.is_zero() {
            return;
        }

        let period = self.period;
        let next_update = *self
            .next_update
            .get_or_insert_with(|| Instant::now() + period);
        let now = Instant::now();
        if next_update > now {
            thread::sleep(next_update - now);
        }

        let mut following = next_update + period;
        let mut skipped = 0;
        while following <= Instant::now() {
            following += period;
            skipped += 1;
        }
        if skipped > 0 {
            log::trace!("frame late, skipped {} ticks", skipped);
        }
        self.next_update = Some(following);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoWait;

impl WaitPolicy for NoWait {
    fn wait(&mut self) {}
}
