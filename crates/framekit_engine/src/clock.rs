use std::time::{Duration, Instant};

use crate::platform::Clock;

/// Fixed-rate frame pacing.
///
/// Deadlines are absolute: each one is the previous deadline plus one
/// period, so sleep overshoot in one frame is absorbed by the next instead
/// of accumulating. When the caller is more than a full period behind the
/// schedule, the schedule restarts from the current time.
pub struct FrameClock {
    clock: Box<dyn Clock>,
    /// Return time of the previous `tick`.
    last_return: Option<Instant>,
    deadline: Option<Instant>,
    last_elapsed: Duration,
    ticks: u64,
}

impl FrameClock {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last_return: None,
            deadline: None,
            last_elapsed: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Block until the next frame deadline at `target_hz` and return the
    /// milliseconds elapsed since the previous call returned. The first call
    /// returns 0 immediately. `target_hz == 0` disables pacing.
    pub fn tick(&mut self, target_hz: u32) -> u64 {
        let now = self.clock.now();
        let Some(last_return) = self.last_return else {
            self.last_return = Some(now);
            self.deadline = Some(now);
            self.ticks = 1;
            return 0;
        };

        if target_hz > 0 {
            let period = period(target_hz);
            let mut deadline = self.deadline.unwrap_or(last_return) + period;
            if now > deadline + period {
                log::trace!("frame clock rebased, {:?} behind", now - deadline);
                deadline = now;
            }
            loop {
                let now = self.clock.now();
                if now >= deadline {
                    break;
                }
                self.clock.sleep(deadline - now);
            }
            self.deadline = Some(deadline);
        } else {
            self.deadline = Some(now);
        }

        let returned = self.clock.now();
        self.last_elapsed = returned - last_return;
        self.last_return = Some(returned);
        self.ticks += 1;
        self.last_elapsed.as_millis() as u64
    }

    /// Number of completed `tick` calls.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_elapsed(&self) -> Duration {
        self.last_elapsed
    }

    /// Frame rate implied by the last interval; 0.0 before the second tick.
    pub fn fps(&self) -> f64 {
        let secs = self.last_elapsed.as_secs_f64();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

fn period(target_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / target_hz as u64)
}
