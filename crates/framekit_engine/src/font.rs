//! Text rasterization.

/// An 8-bit coverage mask: 0 leaves the destination alone, 255 paints the
/// text colour fully.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }

    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32) {
        for row in y..y + h {
            let start = (row * self.width + x) as usize;
            self.coverage[start..start + w as usize].fill(0xff);
        }
    }
}

pub trait FontRasterizer {
    fn rasterize(&self, text: &str) -> GlyphBitmap;
}

pub const GLYPH_WIDTH: u32 = 4;
pub const GLYPH_HEIGHT: u32 = 5;
const GLYPH_SPACING: u32 = 1;
const LINE_SPACING: u32 = 2;

/// Built-in 4x5 bitmap font, one nibble per row (bit 7 is the leftmost
/// pixel). Lowercase letters use the uppercase shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFont {
    scale: u32,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BlockFont {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Size in pixels `text` rasterizes to.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let lines: Vec<&str> = text.split('\n').collect();
        let columns = lines
            .iter()
            .map(|line| line.chars().count() as u32)
            .max()
            .unwrap_or(0);
        if columns == 0 && lines.len() <= 1 {
            return (0, 0);
        }
        let advance = GLYPH_WIDTH + GLYPH_SPACING;
        let width = (columns * advance).saturating_sub(GLYPH_SPACING);
        let line_height = GLYPH_HEIGHT + LINE_SPACING;
        let height = lines.len() as u32 * line_height - LINE_SPACING;
        (width * self.scale, height * self.scale)
    }
}

impl FontRasterizer for BlockFont {
    fn rasterize(&self, text: &str) -> GlyphBitmap {
        let (width, height) = self.measure(text);
        let mut bitmap = GlyphBitmap::new(width, height);
        let s = self.scale;
        for (line_no, line) in text.split('\n').enumerate() {
            let top = line_no as u32 * (GLYPH_HEIGHT + LINE_SPACING);
            for (col, c) in line.chars().enumerate() {
                let left = col as u32 * (GLYPH_WIDTH + GLYPH_SPACING);
                for (row, bits) in glyph(c).iter().enumerate() {
                    for bit in 0..GLYPH_WIDTH {
                        if bits & (0x80 >> bit) != 0 {
                            bitmap.fill((left + bit) * s, (top + row as u32) * s, s, s);
                        }
                    }
                }
            }
        }
        bitmap
    }
}

fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0xF0, 0x90, 0x90, 0x90, 0xF0],
        '1' => [0x20, 0x60, 0x20, 0x20, 0x70],
        '2' => [0xF0, 0x10, 0xF0, 0x80, 0xF0],
        '3' => [0xF0, 0x10, 0xF0, 0x10, 0xF0],
        '4' => [0x90, 0x90, 0xF0, 0x10, 0x10],
        '5' => [0xF0, 0x80, 0xF0, 0x10, 0xF0],
        '6' => [0xF0, 0x80, 0xF0, 0x90, 0xF0],
        '7' => [0xF0, 0x10, 0x20, 0x40, 0x40],
        '8' => [0xF0, 0x90, 0xF0, 0x90, 0xF0],
        '9' => [0xF0, 0x90, 0xF0, 0x10, 0xF0],
        'A' => [0xF0, 0x90, 0xF0, 0x90, 0x90],
        'B' => [0xE0, 0x90, 0xE0, 0x90, 0xE0],
        'C' => [0xF0, 0x80, 0x80, 0x80, 0xF0],
        'D' => [0xE0, 0x90, 0x90, 0x90, 0xE0],
        'E' => [0xF0, 0x80, 0xF0, 0x80, 0xF0],
        'F' => [0xF0, 0x80, 0xF0, 0x80, 0x80],
        'G' => [0xF0, 0x80, 0xB0, 0x90, 0xF0],
        'H' => [0x90, 0x90, 0xF0, 0x90, 0x90],
        'I' => [0x70, 0x20, 0x20, 0x20, 0x70],
        'J' => [0x10, 0x10, 0x10, 0x90, 0xF0],
        'K' => [0x90, 0xA0, 0xC0, 0xA0, 0x90],
        'L' => [0x80, 0x80, 0x80, 0x80, 0xF0],
        'M' => [0x90, 0xF0, 0xF0, 0x90, 0x90],
        'N' => [0x90, 0xD0, 0xB0, 0x90, 0x90],
        'O' => [0x60, 0x90, 0x90, 0x90, 0x60],
        'P' => [0xF0, 0x90, 0xF0, 0x80, 0x80],
        'Q' => [0x60, 0x90, 0x90, 0xB0, 0x70],
        'R' => [0xE0, 0x90, 0xE0, 0xA0, 0x90],
        'S' => [0x70, 0x80, 0x60, 0x10, 0xE0],
        'T' => [0x70, 0x20, 0x20, 0x20, 0x20],
        'U' => [0x90, 0x90, 0x90, 0x90, 0xF0],
        'V' => [0x90, 0x90, 0x90, 0xA0, 0x40],
        'W' => [0x90, 0x90, 0xF0, 0xF0, 0x90],
        'X' => [0x90, 0x90, 0x60, 0x90, 0x90],
        'Y' => [0x50, 0x50, 0x20, 0x20, 0x20],
        'Z' => [0xF0, 0x10, 0x20, 0x40, 0xF0],
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x40],
        ',' => [0x00, 0x00, 0x00, 0x40, 0x80],
        ':' => [0x00, 0x40, 0x00, 0x40, 0x00],
        '!' => [0x40, 0x40, 0x40, 0x00, 0x40],
        '?' => [0xE0, 0x10, 0x60, 0x00, 0x40],
        '-' => [0x00, 0x00, 0xF0, 0x00, 0x00],
        '+' => [0x00, 0x40, 0xE0, 0x40, 0x00],
        '=' => [0x00, 0xF0, 0x00, 0xF0, 0x00],
        '/' => [0x10, 0x20, 0x20, 0x40, 0x80],
        '(' => [0x20, 0x40, 0x40, 0x40, 0x20],
        ')' => [0x40, 0x20, 0x20, 0x20, 0x40],
        '\'' => [0x40, 0x40, 0x00, 0x00, 0x00],
        '%' => [0x90, 0x10, 0x20, 0x40, 0x90],
        '_' => [0x00, 0x00, 0x00, 0x00, 0xF0],
        _ => [0xF0, 0xF0, 0xF0, 0xF0, 0xF0],
    }
}
