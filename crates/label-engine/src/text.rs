//! Outline-font text measurement and centered drawing.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width(font: &impl Font, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil().max(0.0) as u32
}

/// Compute the line height for the given font and scale.
pub fn line_height(font: &impl Font, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Draw text horizontally centered on the image with its top at `y`.
///
/// Text wider than the image starts at x = 0 and is clipped on the right.
pub fn draw_centered_text(
    img: &mut RgbImage,
    font: &impl Font,
    scale: PxScale,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) {
    let text_width = measure_text_width(font, scale, text) as i32;
    let x = ((img.width() as i32) - text_width).max(0) / 2;
    draw_text_mut(img, color, x, y, scale, font, text);
}
