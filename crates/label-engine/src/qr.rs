//! QR symbol rendering for label images.

use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

/// Pixels per QR module before the symbol is resampled to print size.
pub const MODULE_PX: u32 = 10;

/// Quiet zone around the symbol, in modules.
pub const QUIET_ZONE_MODULES: u32 = 2;

#[derive(Debug, thiserror::Error)]
#[error("QR encode error for {content:?}: {source}")]
pub struct QrError {
    content: String,
    #[source]
    source: qrcode::types::QrError,
}

/// Encode `data` at the smallest symbol version that fits at level H and
/// render it with `MODULE_PX` pixels per module plus the quiet zone.
pub fn render_symbol(data: &str) -> Result<GrayImage, QrError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H).map_err(|e| {
        QrError {
            content: data.to_string(),
            source: e,
        }
    })?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let img_size = (module_count + QUIET_ZONE_MODULES * 2) * MODULE_PX;
    let offset = QUIET_ZONE_MODULES * MODULE_PX;

    debug!(
        content = data,
        version = ?code.version(),
        modules = module_count,
        img_size,
        "Encoded QR symbol"
    );

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;

        if *color == qrcode::Color::Dark {
            for dx in 0..MODULE_PX {
                for dy in 0..MODULE_PX {
                    img.put_pixel(
                        offset + x * MODULE_PX + dx,
                        offset + y * MODULE_PX + dy,
                        Luma([0u8]),
                    );
                }
            }
        }
    }

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valve_content_fits_version_one() {
        // "VENTIL-007" is 10 alphanumeric chars; version 1-H holds 10.
        let img = render_symbol("VENTIL-007").unwrap();
        let expected = (21 + QUIET_ZONE_MODULES * 2) * MODULE_PX;
        assert_eq!(img.width(), expected);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn quiet_zone_is_white() {
        let img = render_symbol("VENTIL-150").unwrap();
        for i in 0..QUIET_ZONE_MODULES * MODULE_PX {
            assert_eq!(img.get_pixel(i, i), &Luma([255u8]));
        }
        // Top-left finder pattern starts right after the quiet zone.
        let edge = QUIET_ZONE_MODULES * MODULE_PX;
        assert_eq!(img.get_pixel(edge, edge), &Luma([0u8]));
    }

    #[test]
    fn longer_content_grows_the_symbol() {
        let small = render_symbol("VENTIL-001").unwrap();
        let large = render_symbol("VENTIL-001-WITH-A-MUCH-LONGER-SUFFIX").unwrap();
        assert!(large.width() > small.width());
    }
}
