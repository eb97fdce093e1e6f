use std::collections::VecDeque;

use framekit_common::Event;

use crate::platform::EventSource;

/// Single-consumer event queue with a close-request sentinel.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<Event>,
    close_requested: bool,
    quit_delivered: bool,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Move every event the source has ready into the queue.
    pub fn pump(&mut self, source: &mut dyn EventSource) -> usize {
        let before = self.pending.len();
        while let Some(event) = source.poll_event() {
            self.pending.push_back(event);
        }
        self.pending.len() - before
    }

    /// Ask for shutdown. The next `poll` carries one `Quit`, however many
    /// times this is called.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Drain everything queued since the last poll, oldest first.
    pub fn poll(&mut self) -> Vec<Event> {
        let mut events: Vec<Event> = self.pending.drain(..).collect();
        let has_quit = events.iter().any(Event::is_quit);
        if self.close_requested && !self.quit_delivered && !has_quit {
            events.push(Event::Quit);
        }
        if self.close_requested || has_quit {
            self.quit_delivered = true;
        }
        events
    }

    /// True once a `Quit` has been handed to the consumer.
    pub fn is_closing(&self) -> bool {
        self.quit_delivered
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
