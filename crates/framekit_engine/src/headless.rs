//! Window-less platform pieces for tests, tools and CI.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use framekit_common::Event;

use crate::compositor::Backbuffer;
use crate::error::PlatformError;
use crate::platform::{Clock, Display, EventSource};

#[derive(Default)]
struct FrameLog {
    count: usize,
    last: Option<Backbuffer>,
    failing: bool,
}

/// Shared view of what a [`HeadlessDisplay`] has been shown.
#[derive(Clone, Default)]
pub struct PresentedFrames(Rc<RefCell<FrameLog>>);

impl PresentedFrames {
    pub fn count(&self) -> usize {
        self.0.borrow().count
    }

    pub fn last(&self) -> Option<Backbuffer> {
        self.0.borrow().last.clone()
    }

    /// Make every following present fail, as a lost display would.
    pub fn set_failing(&self, failing: bool) {
        self.0.borrow_mut().failing = failing;
    }
}

pub struct HeadlessDisplay {
    width: u32,
    height: u32,
    frames: PresentedFrames,
}

impl HeadlessDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: PresentedFrames::default(),
        }
    }

    pub fn frames(&self) -> PresentedFrames {
        self.frames.clone()
    }
}

impl Display for HeadlessDisplay {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &Backbuffer) -> Result<(), PlatformError> {
        let mut presented = self.frames.0.borrow_mut();
        if presented.failing {
            return Err(PlatformError::new("headless display is gone"));
        }
        presented.count += 1;
        presented.last = Some(frame.clone());
        Ok(())
    }
}

/// Replays a fixed script, one batch of events per pump. An empty batch is a
/// frame without input; once the script runs out no more events arrive.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<VecDeque<Event>>,
}

impl ScriptedEvents {
    pub fn new(frames: Vec<Vec<Event>>) -> Self {
        Self {
            frames: frames.into_iter().map(VecDeque::from).collect(),
        }
    }

    pub fn remaining_frames(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> Option<Event> {
        let frame = self.frames.front_mut()?;
        match frame.pop_front() {
            Some(event) => Some(event),
            None => {
                self.frames.pop_front();
                None
            }
        }
    }
}

/// Virtual monotonic clock. `sleep` advances time instead of blocking, plus
/// an optional fixed oversleep. Clones share the same timeline.
#[derive(Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
    oversleep: Rc<Cell<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
            oversleep: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn set_oversleep(&self, extra: Duration) {
        self.oversleep.set(extra);
    }

    /// Virtual time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration + self.oversleep.get());
    }
}
