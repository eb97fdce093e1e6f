use anyhow::{anyhow, Result};
use sdl2::event::Event as SdlEvent;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;
use typed_builder::TypedBuilder;

pub use framekit_engine;
pub use sdl2;

use framekit_engine::{
    Backbuffer, Display, EngineConfig, Event, EventSource, Key, MouseButton, Platform,
    PlatformError, SystemClock,
};

#[derive(Debug, Clone, TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    /// Integer window zoom; the backbuffer keeps its logical size.
    #[builder(default = 1)]
    pub scale: u32,
    #[builder(setter(into))]
    pub title: String,
    #[builder(default = false)]
    pub vsync: bool,
}

impl SdlInitInfo {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::builder()
            .width(config.width)
            .height(config.height)
            .title(config.title.clone())
            .build()
    }
}

/// Open the window and hand back the SDL2 display, event source and the
/// system clock.
pub fn init(info: SdlInitInfo) -> Result<Platform> {
    let SdlInitInfo {
        width,
        height,
        scale,
        title,
        vsync,
    } = info;

    let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
    let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
    let window = video_subsystem
        .window(&title, width * scale, height * scale)
        .position_centered()
        .build()?;
    let mut canvas_builder = window.into_canvas();
    if vsync {
        canvas_builder = canvas_builder.present_vsync();
    }
    let canvas = canvas_builder.build()?;
    let texture_creator = canvas.texture_creator();
    let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
    log::debug!(
        "sdl2 window '{}' {}x{} (x{}), vsync: {}",
        title,
        width,
        height,
        scale,
        vsync
    );

    let display = SdlDisplay {
        canvas,
        texture_creator,
        texture: None,
        width,
        height,
    };
    Ok(Platform::new(display, SdlEvents { event_pump }, SystemClock))
}

pub struct SdlDisplay {
    canvas: WindowCanvas,
    texture_creator: TextureCreator<WindowContext>,
    /// Streaming texture reused across frames; recreated when the
    /// backbuffer size changes.
    texture: Option<Texture>,
    width: u32,
    height: u32,
}

impl SdlDisplay {
    fn ensure_texture(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        let current = self.texture.as_ref().map(|texture| {
            let query = texture.query();
            (query.width, query.height)
        });
        if !needs_new_texture(current, (width, height)) {
            return Ok(());
        }
        if let Some(old) = self.texture.take() {
            // SAFETY: the canvas that owns the renderer is still alive.
            unsafe { old.destroy() };
        }
        let texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
            .map_err(PlatformError::new)?;
        log::debug!("created {}x{} streaming texture", width, height);
        self.texture = Some(texture);
        Ok(())
    }
}

impl Drop for SdlDisplay {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            // SAFETY: fields are dropped after this runs, so the renderer is
            // still alive here.
            unsafe { texture.destroy() };
        }
    }
}

/// True when no texture exists yet or it has the wrong size.
fn needs_new_texture(current: Option<(u32, u32)>, wanted: (u32, u32)) -> bool {
    current != Some(wanted)
}

impl Display for SdlDisplay {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &Backbuffer) -> Result<(), PlatformError> {
        self.ensure_texture(frame.width(), frame.height())?;
        let Some(texture) = self.texture.as_mut() else {
            return Err(PlatformError::new("no streaming texture"));
        };
        texture
            .update(None, frame.pixels(), frame.pitch())
            .map_err(PlatformError::new)?;
        self.canvas.clear();
        self.canvas
            .copy(texture, None, None)
            .map_err(PlatformError::new)?;
        self.canvas.present();
        Ok(())
    }
}

pub struct SdlEvents {
    event_pump: sdl2::EventPump,
}

impl EventSource for SdlEvents {
    fn poll_event(&mut self) -> Option<Event> {
        while let Some(event) = self.event_pump.poll_event() {
            if let Some(event) = map_event(event) {
                return Some(event);
            }
        }
        None
    }
}

/// Translate the SDL events the engine cares about; everything else is `None`.
pub fn map_event(event: SdlEvent) -> Option<Event> {
    match event {
        SdlEvent::Quit { .. } => Some(Event::Quit),
        SdlEvent::KeyDown {
            keycode: Some(keycode),
            repeat: false,
            ..
        } => Some(Event::KeyDown(map_keycode(keycode))),
        SdlEvent::KeyUp {
            keycode: Some(keycode),
            ..
        } => Some(Event::KeyUp(map_keycode(keycode))),
        SdlEvent::MouseMotion { x, y, .. } => Some(Event::MouseMotion { x, y }),
        SdlEvent::MouseButtonDown {
            mouse_btn, x, y, ..
        } => Some(Event::MouseButtonDown {
            button: map_mouse_button(mouse_btn),
            x,
            y,
        }),
        SdlEvent::MouseButtonUp {
            mouse_btn, x, y, ..
        } => Some(Event::MouseButtonUp {
            button: map_mouse_button(mouse_btn),
            x,
            y,
        }),
        _ => None,
    }
}

pub fn map_mouse_button(button: sdl2::mouse::MouseButton) -> MouseButton {
    match button {
        sdl2::mouse::MouseButton::Left => MouseButton::Left,
        sdl2::mouse::MouseButton::Middle => MouseButton::Middle,
        sdl2::mouse::MouseButton::Right => MouseButton::Right,
        sdl2::mouse::MouseButton::X1 => MouseButton::Other(4),
        sdl2::mouse::MouseButton::X2 => MouseButton::Other(5),
        sdl2::mouse::MouseButton::Unknown => MouseButton::Other(0),
    }
}

pub fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Num0 | Keycode::Kp0 => Key::Num0,
        Keycode::Num1 | Keycode::Kp1 => Key::Num1,
        Keycode::Num2 | Keycode::Kp2 => Key::Num2,
        Keycode::Num3 | Keycode::Kp3 => Key::Num3,
        Keycode::Num4 | Keycode::Kp4 => Key::Num4,
        Keycode::Num5 | Keycode::Kp5 => Key::Num5,
        Keycode::Num6 | Keycode::Kp6 => Key::Num6,
        Keycode::Num7 | Keycode::Kp7 => Key::Num7,
        Keycode::Num8 | Keycode::Kp8 => Key::Num8,
        Keycode::Num9 | Keycode::Kp9 => Key::Num9,
        Keycode::A => Key::A,
        Keycode::B => Key::B,
        Keycode::C => Key::C,
        Keycode::D => Key::D,
        Keycode::E => Key::E,
        Keycode::F => Key::F,
        Keycode::G => Key::G,
        Keycode::H => Key::H,
        Keycode::I => Key::I,
        Keycode::J => Key::J,
        Keycode::K => Key::K,
        Keycode::L => Key::L,
        Keycode::M => Key::M,
        Keycode::N => Key::N,
        Keycode::O => Key::O,
        Keycode::P => Key::P,
        Keycode::Q => Key::Q,
        Keycode::R => Key::R,
        Keycode::S => Key::S,
        Keycode::T => Key::T,
        Keycode::U => Key::U,
        Keycode::V => Key::V,
        Keycode::W => Key::W,
        Keycode::X => Key::X,
        Keycode::Y => Key::Y,
        Keycode::Z => Key::Z,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Space => Key::Space,
        Keycode::Return | Keycode::KpEnter => Key::Return,
        Keycode::Escape => Key::Escape,
        Keycode::Backspace => Key::Backspace,
        Keycode::Tab => Key::Tab,
        _ => Key::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Mod;

    fn key_down(keycode: Keycode, repeat: bool) -> SdlEvent {
        SdlEvent::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    #[test]
    fn texture_is_reused_until_the_size_changes() {
        assert!(needs_new_texture(None, (320, 200)));
        assert!(!needs_new_texture(Some((320, 200)), (320, 200)));
        assert!(needs_new_texture(Some((320, 200)), (640, 400)));
    }

    #[test]
    fn keypad_digits_map_like_the_number_row() {
        assert_eq!(map_keycode(Keycode::Kp7), Key::Num7);
        assert_eq!(map_keycode(Keycode::Num7), Key::Num7);
        assert_eq!(map_keycode(Keycode::F12), Key::None);
    }

    #[test]
    fn repeated_key_down_is_dropped() {
        assert_eq!(
            map_event(key_down(Keycode::Left, false)),
            Some(Event::KeyDown(Key::Left))
        );
        assert_eq!(map_event(key_down(Keycode::Left, true)), None);
    }

    #[test]
    fn quit_and_mouse_events_map() {
        assert_eq!(map_event(SdlEvent::Quit { timestamp: 0 }), Some(Event::Quit));
        assert_eq!(
            map_event(SdlEvent::MouseButtonDown {
                timestamp: 0,
                window_id: 1,
                which: 0,
                mouse_btn: sdl2::mouse::MouseButton::Right,
                clicks: 1,
                x: 5,
                y: 6,
            }),
            Some(Event::MouseButtonDown {
                button: MouseButton::Right,
                x: 5,
                y: 6
            })
        );
    }

    #[test]
    fn init_info_follows_engine_config() {
        let config = EngineConfig::builder().width(320).height(200).title("t").build();
        let info = SdlInitInfo::from_config(&config);
        assert_eq!((info.width, info.height, info.scale), (320, 200, 1));
        assert_eq!(info.title, "t");
        assert!(!info.vsync);
    }
}
