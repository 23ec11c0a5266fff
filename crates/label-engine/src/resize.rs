//! Resampling of rendered symbols to print size.
//!
//! Uses Lanczos3 filtering so edges stay crisp when the module grid does not
//! divide the target size evenly.

use image::GrayImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Resample a square image to exactly `size` x `size` pixels.
///
/// Returns the original image unchanged if it already has the target size.
pub fn resize_square(img: &GrayImage, size: u32) -> GrayImage {
    let (orig_w, orig_h) = img.dimensions();
    let size = size.max(1);

    if orig_w == size && orig_h == size {
        debug!(size, "Symbol already at target size, skipping resize");
        return img.clone();
    }

    debug!(orig_w, orig_h, size, "Resampling symbol to print size");

    imageops::resize(img, size, size, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn create_test_image(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([128]))
    }

    #[test]
    fn test_resize_square_upscale() {
        let img = create_test_image(250, 250);
        let result = resize_square(&img, 531);
        assert_eq!(result.dimensions(), (531, 531));
    }

    #[test]
    fn test_resize_square_downscale() {
        let img = create_test_image(800, 800);
        let result = resize_square(&img, 100);
        assert_eq!(result.dimensions(), (100, 100));
    }

    #[test]
    fn test_resize_square_same_size() {
        let img = create_test_image(64, 64);
        let result = resize_square(&img, 64);
        assert_eq!(result.dimensions(), (64, 64));
        assert_eq!(result.as_raw(), img.as_raw());
    }

    #[test]
    fn test_resize_square_never_empty() {
        let img = create_test_image(10, 10);
        let result = resize_square(&img, 0);
        assert_eq!(result.dimensions(), (1, 1));
    }

    #[test]
    fn test_resize_keeps_solid_colours() {
        let img = GrayImage::from_pixel(40, 40, Luma([0]));
        let result = resize_square(&img, 97);
        assert_eq!(result.get_pixel(48, 48), &Luma([0]));
    }
}
