//! A hero that walks around and collects coins.

use std::collections::HashSet;
use std::path::PathBuf;

use framekit_engine::{
    Color, Context, DrawError, EngineError, Event, Game, ImageAsset, Key, Rect,
    DEFAULT_HITBOX_SHRINK,
};

pub const HERO_SIZE: (u32, u32) = (32, 64);
const COIN_SIZE: u32 = 12;
/// Pixels per second.
const HERO_SPEED: f64 = 240.0;
const COIN_SPOTS: [(i32, i32); 5] = [(600, 120), (140, 420), (420, 300), (700, 500), (80, 80)];

pub struct HeroDemo {
    sprite: Option<PathBuf>,
    hero: Rect,
    /// Sub-pixel position; `hero` holds it floored.
    pos: (f64, f64),
    coin: Rect,
    next_spot: usize,
    held: HashSet<Key>,
    score: u32,
}

impl HeroDemo {
    pub fn new(sprite: Option<PathBuf>) -> Self {
        let (x, y) = COIN_SPOTS[0];
        Self {
            sprite,
            hero: Rect::new(0, 0, HERO_SIZE.0, HERO_SIZE.1),
            pos: (0.0, 0.0),
            coin: Rect::new(x, y, COIN_SIZE, COIN_SIZE),
            next_spot: 1,
            held: HashSet::new(),
            score: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hero(&self) -> Rect {
        self.hero
    }

    pub fn coin(&self) -> Rect {
        self.coin
    }

    /// Move by the held arrow keys over `dt_ms`, staying inside the screen,
    /// then collect the coin if the hitbox touches it.
    pub fn advance(&mut self, dt_ms: f64, width: u32, height: u32) {
        let step = HERO_SPEED * dt_ms / 1000.0;
        let axis = |neg: Key, pos: Key| -> f64 {
            self.held.contains(&pos) as i32 as f64 - self.held.contains(&neg) as i32 as f64
        };
        let dx = axis(Key::Left, Key::Right) * step;
        let dy = axis(Key::Up, Key::Down) * step;

        let max_x = width.saturating_sub(self.hero.w) as f64;
        let max_y = height.saturating_sub(self.hero.h) as f64;
        self.pos.0 = (self.pos.0 + dx).clamp(0.0, max_x);
        self.pos.1 = (self.pos.1 + dy).clamp(0.0, max_y);
        self.hero.x = self.pos.0.floor() as i32;
        self.hero.y = self.pos.1.floor() as i32;

        if self.hitbox().intersects(&self.coin) {
            self.score += 1;
            let (x, y) = COIN_SPOTS[self.next_spot % COIN_SPOTS.len()];
            self.next_spot += 1;
            self.coin.x = x;
            self.coin.y = y;
            log::debug!("coin collected, score {}", self.score);
        }
    }

    fn hitbox(&self) -> Rect {
        // DEFAULT_HITBOX_SHRINK is inside (0, 1]
        self.hero
            .hitbox(DEFAULT_HITBOX_SHRINK)
            .unwrap_or(self.hero)
    }
}

/// Blue body with a white one pixel border.
fn generated_hero() -> ImageAsset {
    let (w, h) = HERO_SIZE;
    let mut pixels = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let edge = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let color = if edge { Color::WHITE } else { Color::BLUE };
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
    ImageAsset::from_rgba("hero", w, h, pixels)
        .unwrap_or_else(|_| ImageAsset::solid("hero", w, h, Color::BLUE))
}

impl Game for HeroDemo {
    fn init(&mut self, ctx: &mut Context) -> Result<(), EngineError> {
        match &self.sprite {
            Some(path) => ctx.load_image("hero", path, Some(HERO_SIZE))?,
            None => ctx.cache_mut().insert("hero", generated_hero())?,
        }
        ctx.cache_mut().insert(
            "coin",
            ImageAsset::solid("coin", COIN_SIZE, COIN_SIZE, Color::YELLOW),
        )?;
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context) {
        let (width, height) = {
            let frame = ctx.compositor().backbuffer();
            (frame.width(), frame.height())
        };
        let dt_ms = ctx.frame_clock().last_elapsed().as_secs_f64() * 1000.0;
        self.advance(dt_ms, width, height);
    }

    fn draw(&mut self, ctx: &mut Context) -> Result<(), DrawError> {
        ctx.draw_image("coin", self.coin.x, self.coin.y)?;
        ctx.draw_image("hero", self.hero.x, self.hero.y)?;
        ctx.draw_rect_outline(self.hitbox(), Color::GREEN)?;
        ctx.draw_text(&format!("score: {}", self.score), 8, 8, Color::WHITE)
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut Context) {
        match event {
            Event::KeyDown(Key::Escape) => ctx.request_close(),
            Event::KeyDown(key) => {
                self.held.insert(*key);
            }
            Event::KeyUp(key) => {
                self.held.remove(key);
            }
            _ => {}
        }
    }

    fn exit(&mut self) {
        log::info!("hero demo exit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framekit_engine::headless::{HeadlessDisplay, ManualClock, ScriptedEvents};
    use framekit_engine::{EngineConfig, LoadError, Platform};

    fn context(script: Vec<Vec<Event>>) -> Context {
        let config = EngineConfig::builder().width(800).height(600).build();
        let platform = Platform::new(
            HeadlessDisplay::new(800, 600),
            ScriptedEvents::new(script),
            ManualClock::new(),
        );
        Context::new(config, platform)
    }

    #[test]
    fn held_keys_move_the_hero() {
        let mut demo = HeroDemo::new(None);
        demo.held.insert(Key::Right);
        demo.held.insert(Key::Down);
        demo.advance(500.0, 800, 600);
        assert_eq!((demo.hero().x, demo.hero().y), (120, 120));

        demo.held.insert(Key::Left);
        demo.advance(500.0, 800, 600);
        assert_eq!((demo.hero().x, demo.hero().y), (120, 240));
    }

    #[test]
    fn hero_stays_on_screen() {
        let mut demo = HeroDemo::new(None);
        demo.held.insert(Key::Left);
        demo.held.insert(Key::Up);
        demo.advance(1000.0, 800, 600);
        assert_eq!((demo.hero().x, demo.hero().y), (0, 0));

        demo.held.clear();
        demo.held.insert(Key::Right);
        demo.advance(10_000.0, 800, 600);
        assert_eq!(demo.hero().x, 800 - HERO_SIZE.0 as i32);
    }

    #[test]
    fn short_frames_still_move_the_hero() {
        let mut demo = HeroDemo::new(None);
        demo.held.insert(Key::Right);
        for _ in 0..1000 {
            demo.advance(3.0, 800, 600);
        }
        // 3 seconds at 240 px/s, stopped by the right edge
        assert_eq!(demo.hero().x, 800 - HERO_SIZE.0 as i32);

        let mut demo = HeroDemo::new(None);
        demo.held.insert(Key::Down);
        // 0.375px per frame
        for _ in 0..64 {
            demo.advance(1.5625, 800, 600);
        }
        assert_eq!(demo.hero().y, 24);
    }

    #[test]
    fn touching_the_coin_scores() {
        let mut demo = HeroDemo::new(None);
        let first = demo.coin();
        demo.pos = ((first.x - 8) as f64, (first.y - 20) as f64);
        demo.advance(0.0, 800, 600);
        assert_eq!(demo.score(), 1);
        assert_ne!(demo.coin(), first);
    }

    #[test]
    fn generated_hero_has_a_border() {
        let hero = generated_hero();
        assert_eq!((hero.width(), hero.height()), HERO_SIZE);
        assert_eq!(hero.pixel(0, 10), Color::WHITE);
        assert_eq!(hero.pixel(31, 63), Color::WHITE);
        assert_eq!(hero.pixel(5, 5), Color::BLUE);
    }

    #[test]
    fn runs_headless_until_escape() {
        let script = vec![
            vec![Event::KeyDown(Key::Right)],
            vec![],
            vec![],
            vec![Event::KeyDown(Key::Escape)],
        ];
        let mut ctx = context(script);
        let mut demo = HeroDemo::new(None);
        ctx.run(&mut demo).unwrap();

        assert!(ctx.is_closing());
        assert!(demo.hero().x > 0);
        assert_eq!(ctx.skipped_draw_errors(), 0);
        assert!(ctx.cache().contains("hero"));
        assert!(ctx.cache().contains("coin"));
    }

    #[test]
    fn missing_sprite_fails_init() {
        let mut ctx = context(vec![]);
        let mut demo = HeroDemo::new(Some(PathBuf::from("no/such/hero.png")));
        let err = ctx.run(&mut demo).unwrap_err();
        assert!(matches!(err, EngineError::Load(LoadError::NotFound(_))));
    }
}
