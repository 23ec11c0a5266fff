//! Label composition: QR block on top, caption centered beneath.

use image::{GrayImage, Rgb, RgbImage};
use tracing::debug;

use crate::font::CaptionFont;
use crate::layout::PixelLayout;
use crate::qr::{self, QrError};
use crate::resize;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Render one label: encode `content`, scale it to the QR block and draw
/// the caption under it when given.
pub fn compose_label(
    content: &str,
    caption: Option<(&str, &CaptionFont)>,
    layout: &PixelLayout,
) -> Result<RgbImage, QrError> {
    let symbol = qr::render_symbol(content)?;
    let symbol = resize::resize_square(&symbol, layout.qr_px);

    let mut canvas = blank_canvas(layout);
    paste_gray(&mut canvas, &symbol, layout.qr_x(), layout.top_margin_px);

    if let Some((text, font)) = caption {
        font.draw_centered(&mut canvas, layout.caption_y(), text, INK);
    }

    debug!(
        content,
        caption = caption.map(|(text, _)| text).unwrap_or(""),
        width = canvas.width(),
        height = canvas.height(),
        "Composed label"
    );
    Ok(canvas)
}

/// Create a blank white canvas of the layout's full size.
pub fn blank_canvas(layout: &PixelLayout) -> RgbImage {
    RgbImage::from_pixel(layout.canvas_width_px, layout.canvas_height_px, BACKGROUND)
}

/// Copy a grayscale image onto `base` at the given position.
///
/// Pixels falling outside `base` are dropped.
pub fn paste_gray(base: &mut RgbImage, top: &GrayImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let v = pixel[0];
            base.put_pixel(target_x, target_y, Rgb([v, v, v]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PhysicalLayout;
    use image::Luma;

    fn default_layout() -> PixelLayout {
        PhysicalLayout::default().to_pixels().unwrap()
    }

    fn has_ink(img: &RgbImage, y_range: std::ops::Range<u32>) -> bool {
        y_range
            .flat_map(|y| (0..img.width()).map(move |x| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y)[0] < 128)
    }

    #[test]
    fn canvas_matches_layout() {
        let layout = default_layout();
        let font = CaptionFont::builtin(72.0);
        let img = compose_label("VENTIL-007", Some(("7", &font)), &layout).unwrap();
        assert_eq!(img.dimensions(), (590, 944));
    }

    #[test]
    fn qr_block_is_centered_below_top_margin() {
        let layout = default_layout();
        let img = compose_label("VENTIL-007", None, &layout).unwrap();

        // Margins around the QR block stay white.
        assert!(!has_ink(&img, 0..layout.top_margin_px));
        for y in 0..img.height() {
            assert_eq!(img.get_pixel(0, y), &BACKGROUND);
            assert_eq!(img.get_pixel(img.width() - 1, y), &BACKGROUND);
        }
        assert!(has_ink(&img, layout.top_margin_px..layout.qr_bottom()));
    }

    #[test]
    fn caption_toggle_controls_lower_area() {
        let layout = default_layout();
        let font = CaptionFont::builtin(72.0);
        let plain = compose_label("VENTIL-150", None, &layout).unwrap();
        let captioned = compose_label("VENTIL-150", Some(("150", &font)), &layout).unwrap();

        let below = layout.qr_bottom()..layout.canvas_height_px;
        assert!(!has_ink(&plain, below.clone()));
        assert!(has_ink(&captioned, below));
    }

    #[test]
    fn paste_gray_clips_out_of_bounds() {
        let mut base = RgbImage::from_pixel(10, 10, BACKGROUND);
        let top = GrayImage::from_pixel(8, 8, Luma([0]));
        paste_gray(&mut base, &top, 6, 6);
        assert_eq!(base.get_pixel(9, 9), &INK);
        assert_eq!(base.get_pixel(5, 5), &BACKGROUND);
    }
}
