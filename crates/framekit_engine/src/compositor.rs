use std::sync::Arc;

use framekit_common::Color;

use crate::cache::{ImageAsset, ResourceCache};
use crate::error::{DrawError, PlatformError};
use crate::font::{FontRasterizer, GlyphBitmap};
use crate::geometry::Rect;
use crate::platform::Display;

/// Off-screen RGB24 frame, row-major with a pitch of `width * 3`.
#[derive(Clone, PartialEq, Eq)]
pub struct Backbuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Backbuffer {
    pub const BYTES_PER_PIXEL: usize = 3;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * Self::BYTES_PER_PIXEL * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.width as usize * Self::BYTES_PER_PIXEL
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = self.index(x, y);
        Color::new_rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    pub fn fill(&mut self, color: Color) {
        let (r, g, b) = color.rgb();
        for px in self.pixels.chunks_exact_mut(3) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL
    }

    /// Blend `color` over the pixel at `(x, y)`; points outside are dropped.
    #[inline]
    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        let dst = (self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]);
        let (r, g, b) = color.blend_over(dst);
        self.pixels[i] = r;
        self.pixels[i + 1] = g;
        self.pixels[i + 2] = b;
    }

    /// Destination span covered by something `len` wide starting at `start`,
    /// clipped to `0..limit`.
    fn clip(start: i64, len: u32, limit: u32) -> std::ops::Range<i64> {
        start.max(0)..(start + len as i64).min(limit as i64)
    }
}

impl std::fmt::Debug for Backbuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backbuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Blit {
        asset: Arc<ImageAsset>,
        x: i32,
        y: i32,
    },
    Text {
        glyphs: GlyphBitmap,
        x: i32,
        y: i32,
        color: Color,
    },
    Outline {
        rect: Rect,
        color: Color,
    },
}

/// Collects the draw calls of one frame and paints them, in the order they
/// were issued, when the frame is presented.
pub struct SceneCompositor {
    backbuffer: Backbuffer,
    commands: Vec<DrawCommand>,
    font: Box<dyn FontRasterizer>,
    frame_open: bool,
}

impl SceneCompositor {
    pub fn new(width: u32, height: u32, font: Box<dyn FontRasterizer>) -> Self {
        Self {
            backbuffer: Backbuffer::new(width, height),
            commands: Vec::new(),
            font,
            frame_open: false,
        }
    }

    /// Start a frame: drop pending commands and fill the backbuffer.
    pub fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.backbuffer.fill(color);
        self.frame_open = true;
    }

    pub fn draw_image(
        &mut self,
        cache: &ResourceCache,
        name: &str,
        x: i32,
        y: i32,
    ) -> Result<(), DrawError> {
        self.ensure_frame()?;
        let asset = cache
            .handle(name)
            .ok_or_else(|| DrawError::UnknownAsset(name.to_string()))?;
        self.commands.push(DrawCommand::Blit { asset, x, y });
        Ok(())
    }

    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), DrawError> {
        self.ensure_frame()?;
        let glyphs = self.font.rasterize(text);
        self.commands.push(DrawCommand::Text {
            glyphs,
            x,
            y,
            color,
        });
        Ok(())
    }

    /// One pixel wide rectangle border, handy for showing hitboxes.
    pub fn draw_rect_outline(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        self.ensure_frame()?;
        self.commands.push(DrawCommand::Outline { rect, color });
        Ok(())
    }

    /// Paint every pending command and swap the result onto `display`.
    pub fn present(&mut self, display: &mut dyn Display) -> Result<(), PlatformError> {
        let backbuffer = &mut self.backbuffer;
        for command in self.commands.drain(..) {
            paint(backbuffer, &command);
        }
        self.frame_open = false;
        display.present(&self.backbuffer)
    }

    pub fn pending(&self) -> usize {
        self.commands.len()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn backbuffer(&self) -> &Backbuffer {
        &self.backbuffer
    }

    pub fn is_frame_open(&self) -> bool {
        self.frame_open
    }

    fn ensure_frame(&self) -> Result<(), DrawError> {
        if self.frame_open {
            Ok(())
        } else {
            Err(DrawError::FrameNotStarted)
        }
    }
}

fn paint(target: &mut Backbuffer, command: &DrawCommand) {
    match command {
        DrawCommand::Blit { asset, x, y } => {
            let (x, y) = (*x as i64, *y as i64);
            for dy in Backbuffer::clip(y, asset.height(), target.height) {
                for dx in Backbuffer::clip(x, asset.width(), target.width) {
                    let src = asset.pixel((dx - x) as u32, (dy - y) as u32);
                    target.blend(dx, dy, src);
                }
            }
        }
        DrawCommand::Text {
            glyphs,
            x,
            y,
            color,
        } => {
            let (x, y) = (*x as i64, *y as i64);
            for dy in Backbuffer::clip(y, glyphs.height, target.height) {
                for dx in Backbuffer::clip(x, glyphs.width, target.width) {
                    let coverage = glyphs.at((dx - x) as u32, (dy - y) as u32);
                    if coverage != 0 {
                        target.blend(dx, dy, color.with_coverage(coverage));
                    }
                }
            }
        }
        DrawCommand::Outline { rect, color } => {
            if rect.is_empty() {
                return;
            }
            let (left, top) = (rect.x as i64, rect.y as i64);
            let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
            for px in left..=right {
                target.blend(px, top, *color);
                if bottom != top {
                    target.blend(px, bottom, *color);
                }
            }
            for py in top + 1..bottom {
                target.blend(left, py, *color);
                if right != left {
                    target.blend(right, py, *color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BlockFont;
    use crate::headless::HeadlessDisplay;

    fn setup() -> (SceneCompositor, ResourceCache, HeadlessDisplay) {
        let compositor = SceneCompositor::new(8, 8, Box::new(BlockFont::new(1)));
        let mut cache = ResourceCache::default();
        cache
            .insert("red", ImageAsset::solid("red", 4, 4, Color::RED))
            .unwrap();
        cache
            .insert("blue", ImageAsset::solid("blue", 4, 4, Color::BLUE))
            .unwrap();
        (compositor, cache, HeadlessDisplay::new(8, 8))
    }

    #[test]
    fn buffer_size_is_computed_in_usize() {
        // 2_000_000_000 * 3 does not fit in a u32
        let wide = Backbuffer::new(2_000_000_000, 0);
        assert!(wide.pixels().is_empty());
        assert_eq!(wide.pitch(), 6_000_000_000);
        assert!(Backbuffer::new(0, u32::MAX).pixels().is_empty());
    }

    #[test]
    fn clear_fills_backbuffer() {
        let (mut compositor, _, _) = setup();
        compositor.clear(Color::GREEN);
        assert_eq!(compositor.backbuffer().pixel(0, 0), Color::GREEN);
        assert_eq!(compositor.backbuffer().pixel(7, 7), Color::GREEN);
        assert_eq!(compositor.backbuffer().pixels().len(), 8 * 8 * 3);
    }

    #[test]
    fn unknown_asset_is_reported_and_not_queued() {
        let (mut compositor, cache, _) = setup();
        compositor.clear(Color::BLACK);
        compositor.draw_image(&cache, "red", 0, 0).unwrap();
        let err = compositor.draw_image(&cache, "ghost", 0, 0).unwrap_err();
        assert_eq!(err, DrawError::UnknownAsset("ghost".to_string()));
        assert_eq!(compositor.pending(), 1);
    }

    #[test]
    fn draws_require_an_open_frame() {
        let (mut compositor, cache, mut display) = setup();
        assert_eq!(
            compositor.draw_image(&cache, "red", 0, 0),
            Err(DrawError::FrameNotStarted)
        );
        assert_eq!(
            compositor.draw_text("hi", 0, 0, Color::WHITE),
            Err(DrawError::FrameNotStarted)
        );

        compositor.clear(Color::BLACK);
        compositor.present(&mut display).unwrap();
        assert_eq!(
            compositor.draw_rect_outline(Rect::new(0, 0, 2, 2), Color::WHITE),
            Err(DrawError::FrameNotStarted)
        );
    }

    #[test]
    fn later_commands_paint_over_earlier_ones() {
        let (mut compositor, cache, mut display) = setup();
        compositor.clear(Color::BLACK);
        compositor.draw_image(&cache, "red", 0, 0).unwrap();
        compositor.draw_image(&cache, "blue", 2, 2).unwrap();
        compositor.present(&mut display).unwrap();

        let frame = compositor.backbuffer();
        assert_eq!(frame.pixel(1, 1), Color::RED);
        assert_eq!(frame.pixel(3, 3), Color::BLUE);
        assert_eq!(frame.pixel(5, 5), Color::BLUE);
        assert_eq!(frame.pixel(6, 6), Color::BLACK);

        compositor.clear(Color::BLACK);
        compositor.draw_image(&cache, "blue", 2, 2).unwrap();
        compositor.draw_image(&cache, "red", 0, 0).unwrap();
        compositor.present(&mut display).unwrap();
        assert_eq!(compositor.backbuffer().pixel(3, 3), Color::RED);
    }

    #[test]
    fn blits_are_clipped_to_the_backbuffer() {
        let (mut compositor, cache, mut display) = setup();
        compositor.clear(Color::BLACK);
        compositor.draw_image(&cache, "red", -2, -3).unwrap();
        compositor.draw_image(&cache, "blue", 6, 7).unwrap();
        compositor.draw_image(&cache, "blue", 100, -100).unwrap();
        compositor.present(&mut display).unwrap();

        let frame = compositor.backbuffer();
        assert_eq!(frame.pixel(1, 0), Color::RED);
        assert_eq!(frame.pixel(2, 0), Color::BLACK);
        assert_eq!(frame.pixel(1, 1), Color::BLACK);
        assert_eq!(frame.pixel(7, 7), Color::BLUE);
        assert_eq!(frame.pixel(5, 7), Color::BLACK);
    }

    #[test]
    fn translucent_pixels_blend() {
        let (mut compositor, mut cache, mut display) = setup();
        cache
            .insert(
                "glass",
                ImageAsset::solid("glass", 1, 1, Color::new_rgba(255, 255, 255, 128)),
            )
            .unwrap();
        compositor.clear(Color::BLACK);
        compositor.draw_image(&cache, "glass", 0, 0).unwrap();
        compositor.present(&mut display).unwrap();
        assert_eq!(compositor.backbuffer().pixel(0, 0), Color::new_rgb(128, 128, 128));
    }

    #[test]
    fn text_uses_font_coverage() {
        let (mut compositor, _, mut display) = setup();
        compositor.clear(Color::BLACK);
        compositor.draw_text("-", 1, 0, Color::YELLOW).unwrap();
        assert!(matches!(
            compositor.commands()[0],
            DrawCommand::Text { ref glyphs, .. } if glyphs.width == 4
        ));
        compositor.present(&mut display).unwrap();

        let frame = compositor.backbuffer();
        for x in 1..5 {
            assert_eq!(frame.pixel(x, 2), Color::YELLOW);
        }
        assert_eq!(frame.pixel(0, 2), Color::BLACK);
        assert_eq!(frame.pixel(1, 1), Color::BLACK);
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let (mut compositor, _, mut display) = setup();
        compositor.clear(Color::BLACK);
        compositor
            .draw_rect_outline(Rect::new(1, 1, 4, 3), Color::GREEN)
            .unwrap();
        compositor.present(&mut display).unwrap();

        let frame = compositor.backbuffer();
        assert_eq!(frame.pixel(1, 1), Color::GREEN);
        assert_eq!(frame.pixel(4, 3), Color::GREEN);
        assert_eq!(frame.pixel(1, 2), Color::GREEN);
        assert_eq!(frame.pixel(2, 2), Color::BLACK);
        assert_eq!(frame.pixel(5, 1), Color::BLACK);
    }

    #[test]
    fn present_flushes_and_hands_frame_to_display() {
        let (mut compositor, cache, mut display) = setup();
        let frames = display.frames();
        compositor.clear(Color::BLACK);
        compositor.draw_image(&cache, "red", 0, 0).unwrap();
        compositor.present(&mut display).unwrap();

        assert_eq!(compositor.pending(), 0);
        assert!(!compositor.is_frame_open());
        assert_eq!(frames.count(), 1);
        assert_eq!(frames.last().unwrap().pixel(0, 0), Color::RED);
    }

    #[test]
    fn queued_blit_survives_cache_clear() {
        let (mut compositor, mut cache, mut display) = setup();
        compositor.clear(Color::BLACK);
        compositor.draw_image(&cache, "blue", 0, 0).unwrap();
        cache.clear();
        compositor.present(&mut display).unwrap();
        assert_eq!(compositor.backbuffer().pixel(0, 0), Color::BLUE);
    }
}
