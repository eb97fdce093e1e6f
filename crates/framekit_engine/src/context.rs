use std::path::Path;

use framekit_common::{Color, Event};

use crate::cache::ResourceCache;
use crate::clock::FrameClock;
use crate::compositor::SceneCompositor;
use crate::config::{DrawErrorPolicy, EngineConfig};
use crate::error::{DrawError, EngineError, LoadError, PlatformError};
use crate::events::EventQueue;
use crate::font::BlockFont;
use crate::geometry::Rect;
use crate::platform::{Display, EventSource, Platform};

/// Client side of the frame loop driven by [`Context::run`].
pub trait Game {
    /// Called once before the first frame; load assets here.
    fn init(&mut self, _ctx: &mut Context) -> Result<(), EngineError> {
        Ok(())
    }
    fn update(&mut self, _ctx: &mut Context) {}
    fn draw(&mut self, ctx: &mut Context) -> Result<(), DrawError>;
    fn handle_event(&mut self, _event: &Event, _ctx: &mut Context) {}
    fn should_exit(&self) -> bool {
        false
    }
    fn exit(&mut self) {}
}

/// Owns the display, cache, clock and event queue of one window.
pub struct Context {
    config: EngineConfig,
    display: Box<dyn Display>,
    event_source: Box<dyn EventSource>,
    cache: ResourceCache,
    clock: FrameClock,
    events: EventQueue,
    compositor: SceneCompositor,
    delta_ms: u64,
    skipped_draw_errors: u64,
}

impl Context {
    pub fn new(config: EngineConfig, platform: Platform) -> Self {
        let Platform {
            display,
            events,
            clock,
        } = platform;
        let (width, height) = display.size();
        if (width, height) != (config.width, config.height) {
            log::warn!(
                "display is {}x{}, configured {}x{}; using the display size",
                width,
                height,
                config.width,
                config.height
            );
        }
        let font = BlockFont::new(config.font_scale);
        log::info!("window initialized: {}x{} '{}'", width, height, config.title);
        Self {
            cache: ResourceCache::new(config.scale_filter, config.duplicate_policy),
            compositor: SceneCompositor::new(width, height, Box::new(font)),
            clock: FrameClock::new(clock),
            events: EventQueue::new(),
            event_source: events,
            display,
            config,
            delta_ms: 0,
            skipped_draw_errors: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResourceCache {
        &mut self.cache
    }

    pub fn compositor(&self) -> &SceneCompositor {
        &self.compositor
    }

    pub fn frame_clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Milliseconds the last frame took, for delta-time movement.
    pub fn delta_ms(&self) -> u64 {
        self.delta_ms
    }

    pub fn skipped_draw_errors(&self) -> u64 {
        self.skipped_draw_errors
    }

    pub fn load_image(
        &mut self,
        name: &str,
        path: impl AsRef<Path>,
        scale: Option<(u32, u32)>,
    ) -> Result<(), LoadError> {
        self.cache.load_file(name, path, scale)
    }

    pub fn draw_image(&mut self, name: &str, x: i32, y: i32) -> Result<(), DrawError> {
        self.compositor.draw_image(&self.cache, name, x, y)
    }

    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), DrawError> {
        self.compositor.draw_text(text, x, y, color)
    }

    pub fn draw_rect_outline(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        self.compositor.draw_rect_outline(rect, color)
    }

    pub fn request_close(&mut self) {
        self.events.request_close();
    }

    pub fn is_closing(&self) -> bool {
        self.events.is_closing()
    }

    /// Open a frame filled with the configured background.
    pub fn begin_frame(&mut self) {
        self.compositor.clear(self.config.background);
    }

    /// Pull pending platform input and drain the queue.
    pub fn poll_events(&mut self) -> Vec<Event> {
        self.events.pump(self.event_source.as_mut());
        self.events.poll()
    }

    pub fn present(&mut self) -> Result<(), PlatformError> {
        self.compositor.present(self.display.as_mut())
    }

    pub fn wait_next_tick(&mut self) -> u64 {
        self.delta_ms = self.clock.tick(self.config.target_hz);
        self.delta_ms
    }

    /// Finish a frame started with [`begin_frame`](Self::begin_frame):
    /// drain pending events, present and wait for the next tick. The drained
    /// events are returned to the caller. Once they contain the `Quit`
    /// ([`is_closing`](Self::is_closing) turns true) the frame is not
    /// presented.
    pub fn end_frame(&mut self) -> Result<Vec<Event>, EngineError> {
        let events = self.poll_events();
        if self.events.is_closing() {
            return Ok(events);
        }
        self.present()?;
        self.wait_next_tick();
        Ok(events)
    }

    /// Drive `game` until it asks to exit or a `Quit` event arrives.
    pub fn run(&mut self, game: &mut impl Game) -> Result<(), EngineError> {
        game.init(self)?;
        if log::log_enabled!(log::Level::Debug) {
            let mut names: Vec<&str> = self.cache.names().collect();
            names.sort_unstable();
            log::debug!("entering frame loop with assets {:?}", names);
        }
        let result = self.run_frames(game);
        if let Err(err) = &result {
            log::error!("frame loop stopped: {}", err);
        }
        game.exit();
        result
    }

    fn run_frames(&mut self, game: &mut impl Game) -> Result<(), EngineError> {
        loop {
            if game.should_exit() {
                return Ok(());
            }
            self.begin_frame();
            game.update(self);
            if let Err(err) = game.draw(self) {
                self.on_draw_error(err)?;
            }

            for event in self.poll_events() {
                game.handle_event(&event, self);
            }
            if self.events.is_closing() {
                log::info!("quit requested after {} frame(s)", self.clock.ticks());
                return Ok(());
            }

            self.present()?;
            self.wait_next_tick();
            log::trace!("frame {} took {}ms", self.clock.ticks(), self.delta_ms);
        }
    }

    fn on_draw_error(&mut self, err: DrawError) -> Result<(), DrawError> {
        match self.config.draw_error_policy {
            DrawErrorPolicy::Skip => {
                self.skipped_draw_errors += 1;
                log::warn!("skipping failed draw: {}", err);
                Ok(())
            }
            DrawErrorPolicy::Abort => Err(err),
        }
    }
}
