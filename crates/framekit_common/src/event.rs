use crate::key::Key;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

/// Input and window events as seen by the frame loop.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Event {
    /// The window was asked to close, either by the platform or by
    /// `request_close`.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseMotion { x: i32, y: i32 },
    MouseButtonDown { button: MouseButton, x: i32, y: i32 },
    MouseButtonUp { button: MouseButton, x: i32, y: i32 },
}

impl Event {
    #[inline]
    pub fn is_quit(&self) -> bool {
        matches!(self, Event::Quit)
    }
}
