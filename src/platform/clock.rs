//! Fixed-rate frame pacing

use std::time::{Duration, Instant};

/// Sleeps the caller until the next frame boundary.
///
/// Deadlines advance by a fixed period from the start time, so a slow frame
/// does not push every later frame back. If the loop falls more than a frame
/// behind, the schedule restarts from now instead of bursting to catch up.
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        let period = Duration::from_secs(1) / frame_rate.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else if now - self.next > self.period {
            log::trace!("Frame overran by {:?}, resyncing", now - self.next);
            self.next = now + self.period;
        } else {
            self.next += self.period;
        }
    }
}
