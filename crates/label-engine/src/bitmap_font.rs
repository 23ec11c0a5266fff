//! Built-in 5x7 bitmap font used when no outline font can be loaded.
//!
//! Covers digits, the letters of the valve captions, `-`, `_` and space.
//! Lowercase input is drawn with the uppercase glyph; anything else renders
//! as a hollow box so missing glyphs stay visible on the printed label.

use image::{Rgb, RgbImage};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Cell size including one column / row of spacing.
const CELL_WIDTH: u32 = GLYPH_WIDTH + 1;
const CELL_HEIGHT: u32 = GLYPH_HEIGHT + 1;

const UNKNOWN: [u8; 7] = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        ' ' => [0; 7],
        _ => UNKNOWN,
    }
}

/// Integer-scaled bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    /// Pick the integer scale whose line height is closest to `size_px`.
    pub fn for_size(size_px: f32) -> Self {
        let scale = (size_px / CELL_HEIGHT as f32).round();
        let scale = if scale.is_finite() { scale.max(1.0) as u32 } else { 1 };
        Self { scale }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn line_height(&self) -> u32 {
        CELL_HEIGHT * self.scale
    }

    pub fn measure(&self, text: &str) -> u32 {
        let n = text.chars().count() as u32;
        // No trailing spacing column after the last glyph.
        (n * CELL_WIDTH).saturating_sub(1) * self.scale
    }

    /// Draw `text` starting at `(x, y)`; pixels outside the image are skipped.
    pub fn draw(&self, img: &mut RgbImage, x: i64, y: i64, text: &str, color: Rgb<u8>) {
        let s = i64::from(self.scale);
        for (i, ch) in text.chars().enumerate() {
            let gx = x + i as i64 * i64::from(CELL_WIDTH) * s;
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = gx + i64::from(col) * s;
                    let py = y + row as i64 * s;
                    fill_block(img, px, py, s, color);
                }
            }
        }
    }

    /// Draw `text` horizontally centered with its top at `y`.
    pub fn draw_centered(&self, img: &mut RgbImage, y: i64, text: &str, color: Rgb<u8>) {
        let width = i64::from(self.measure(text));
        let x = (i64::from(img.width()) - width).max(0) / 2;
        self.draw(img, x, y, text, color);
    }
}

fn fill_block(img: &mut RgbImage, x: i64, y: i64, size: i64, color: Rgb<u8>) {
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    for yy in y.max(0)..(y + size).min(h) {
        for xx in x.max(0)..(x + size).min(w) {
            img.put_pixel(xx as u32, yy as u32, color);
        }
    }
}
