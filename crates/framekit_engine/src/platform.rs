//! The narrow contracts the engine needs from the host platform.

use std::time::{Duration, Instant};

use framekit_common::Event;

use crate::compositor::Backbuffer;
use crate::error::PlatformError;

/// The visible surface a finished backbuffer is swapped onto.
pub trait Display {
    fn size(&self) -> (u32, u32);
    fn present(&mut self, frame: &Backbuffer) -> Result<(), PlatformError>;
}

/// Raw input source. Must never block.
pub trait EventSource {
    fn poll_event(&mut self) -> Option<Event>;
}

/// Monotonic time and thread suspension.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Everything a [`Context`](crate::Context) borrows from the host.
pub struct Platform {
    pub display: Box<dyn Display>,
    pub events: Box<dyn EventSource>,
    pub clock: Box<dyn Clock>,
}

impl Platform {
    pub fn new(
        display: impl Display + 'static,
        events: impl EventSource + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            display: Box::new(display),
            events: Box::new(events),
            clock: Box::new(clock),
        }
    }
}
