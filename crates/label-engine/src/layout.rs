//! Physical-to-pixel layout arithmetic for printed labels.
//!
//! All physical sizes are millimetres; pixel sizes are derived once per run
//! from the print resolution and never change afterwards.

use tracing::debug;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Default pixel gap between the canvas top edge and the QR block.
pub const DEFAULT_TOP_MARGIN_PX: u32 = 10;

/// Default pixel gap between the QR block and the caption baseline box.
pub const DEFAULT_CAPTION_GAP_PX: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LayoutError {
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("QR block ({qr_px}px) is wider than the canvas ({canvas_px}px)")]
    QrWiderThanCanvas { qr_px: u32, canvas_px: u32 },
    #[error(
        "QR block ({qr_px}px) plus caption block ({caption_px}px) exceeds canvas height ({canvas_px}px)"
    )]
    BlocksExceedHeight {
        qr_px: u32,
        caption_px: u32,
        canvas_px: u32,
    },
    #[error("QR block ends at {bottom_px}px, below the canvas bottom ({canvas_px}px)")]
    QrBelowCanvas { bottom_px: u64, canvas_px: u32 },
    #[error(
        "caption needs {needed_px}px below the QR block but the canvas ends at {canvas_px}px; lower the font size or enlarge the label"
    )]
    CaptionOverflow { needed_px: u64, canvas_px: u32 },
}

/// Convert a physical length to whole pixels at `dpi`, rounding down.
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    (mm / MM_PER_INCH * f64::from(dpi)).floor().max(0.0) as u32
}

/// Label geometry as requested in physical units.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalLayout {
    pub qr_size_mm: f64,
    pub caption_height_mm: f64,
    pub canvas_width_mm: f64,
    pub canvas_height_mm: f64,
    pub dpi: u32,
    pub top_margin_px: u32,
    pub caption_gap_px: u32,
}

impl Default for PhysicalLayout {
    fn default() -> Self {
        Self {
            qr_size_mm: 45.0,
            caption_height_mm: 35.0,
            canvas_width_mm: 50.0,
            canvas_height_mm: 80.0,
            dpi: 300,
            top_margin_px: DEFAULT_TOP_MARGIN_PX,
            caption_gap_px: DEFAULT_CAPTION_GAP_PX,
        }
    }
}

/// Label geometry in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub qr_px: u32,
    pub caption_px: u32,
    pub canvas_width_px: u32,
    pub canvas_height_px: u32,
    pub dpi: u32,
    pub top_margin_px: u32,
    pub caption_gap_px: u32,
}

impl PhysicalLayout {
    /// Convert to pixels and check that the blocks fit on the canvas.
    pub fn to_pixels(&self) -> Result<PixelLayout, LayoutError> {
        positive("qr_size_mm", self.qr_size_mm)?;
        positive("caption_height_mm", self.caption_height_mm)?;
        positive("canvas_width_mm", self.canvas_width_mm)?;
        positive("canvas_height_mm", self.canvas_height_mm)?;
        positive("dpi", f64::from(self.dpi))?;

        let px = PixelLayout {
            qr_px: mm_to_px(self.qr_size_mm, self.dpi),
            caption_px: mm_to_px(self.caption_height_mm, self.dpi),
            canvas_width_px: mm_to_px(self.canvas_width_mm, self.dpi),
            canvas_height_px: mm_to_px(self.canvas_height_mm, self.dpi),
            dpi: self.dpi,
            top_margin_px: self.top_margin_px,
            caption_gap_px: self.caption_gap_px,
        };
        px.validate()?;

        debug!(
            qr_px = px.qr_px,
            caption_px = px.caption_px,
            width = px.canvas_width_px,
            height = px.canvas_height_px,
            dpi = px.dpi,
            "Computed label layout"
        );
        Ok(px)
    }
}

impl PixelLayout {
    fn validate(&self) -> Result<(), LayoutError> {
        // A sub-pixel request collapses to zero after flooring.
        positive("qr block in pixels", f64::from(self.qr_px))?;
        positive("canvas width in pixels", f64::from(self.canvas_width_px))?;
        positive("canvas height in pixels", f64::from(self.canvas_height_px))?;

        if self.qr_px > self.canvas_width_px {
            return Err(LayoutError::QrWiderThanCanvas {
                qr_px: self.qr_px,
                canvas_px: self.canvas_width_px,
            });
        }
        let canvas_height = u64::from(self.canvas_height_px);
        if u64::from(self.qr_px) + u64::from(self.caption_px) > canvas_height {
            return Err(LayoutError::BlocksExceedHeight {
                qr_px: self.qr_px,
                caption_px: self.caption_px,
                canvas_px: self.canvas_height_px,
            });
        }
        let qr_bottom = u64::from(self.top_margin_px) + u64::from(self.qr_px);
        if qr_bottom > canvas_height {
            return Err(LayoutError::QrBelowCanvas {
                bottom_px: qr_bottom,
                canvas_px: self.canvas_height_px,
            });
        }
        Ok(())
    }

    /// Left edge of the horizontally centered QR block.
    pub fn qr_x(&self) -> u32 {
        (self.canvas_width_px - self.qr_px) / 2
    }

    /// First pixel row below the QR block.
    pub fn qr_bottom(&self) -> u32 {
        self.top_margin_px.saturating_add(self.qr_px)
    }

    /// Top of the caption text box.
    pub fn caption_y(&self) -> u32 {
        self.qr_bottom().saturating_add(self.caption_gap_px)
    }

    /// Check that a caption of `line_height` pixels fits under the QR block.
    pub fn check_caption_fits(&self, line_height: u32) -> Result<(), LayoutError> {
        let needed = u64::from(self.top_margin_px)
            + u64::from(self.qr_px)
            + u64::from(self.caption_gap_px)
            + u64::from(line_height);
        if needed > u64::from(self.canvas_height_px) {
            return Err(LayoutError::CaptionOverflow {
                needed_px: needed,
                canvas_px: self.canvas_height_px,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_mm_at_300_dpi_is_590_px() {
        assert_eq!(mm_to_px(50.0, 300), 590);
    }

    #[test]
    fn mm_to_px_rounds_down() {
        // 45 / 25.4 * 300 = 531.49...
        assert_eq!(mm_to_px(45.0, 300), 531);
        // 80 / 25.4 * 300 = 944.88...
        assert_eq!(mm_to_px(80.0, 300), 944);
    }

    #[test]
    fn default_layout_converts() {
        let px = PhysicalLayout::default().to_pixels().unwrap();
        assert_eq!(px.qr_px, 531);
        assert_eq!(px.caption_px, 413);
        assert_eq!(px.canvas_width_px, 590);
        assert_eq!(px.canvas_height_px, 944);
        assert_eq!(px.qr_x(), 29);
        assert_eq!(px.caption_y(), 551);
    }

    #[test]
    fn rejects_zero_dpi() {
        let layout = PhysicalLayout {
            dpi: 0,
            ..PhysicalLayout::default()
        };
        assert!(matches!(
            layout.to_pixels(),
            Err(LayoutError::NonPositive { field: "dpi", .. })
        ));
    }

    #[test]
    fn rejects_qr_wider_than_canvas() {
        let layout = PhysicalLayout {
            qr_size_mm: 60.0,
            ..PhysicalLayout::default()
        };
        assert!(matches!(
            layout.to_pixels(),
            Err(LayoutError::QrWiderThanCanvas { .. })
        ));
    }

    #[test]
    fn rejects_blocks_taller_than_canvas() {
        let layout = PhysicalLayout {
            caption_height_mm: 40.0,
            ..PhysicalLayout::default()
        };
        assert!(matches!(
            layout.to_pixels(),
            Err(LayoutError::BlocksExceedHeight { .. })
        ));
    }

    #[test]
    fn huge_sizes_are_rejected_without_overflow() {
        let layout = PhysicalLayout {
            qr_size_mm: 1e9,
            caption_height_mm: 1e9,
            canvas_width_mm: 1e9,
            canvas_height_mm: 1e9,
            ..PhysicalLayout::default()
        };
        assert!(matches!(
            layout.to_pixels(),
            Err(LayoutError::BlocksExceedHeight { .. })
        ));
    }

    #[test]
    fn huge_margins_are_rejected_without_overflow() {
        let layout = PhysicalLayout {
            top_margin_px: u32::MAX,
            ..PhysicalLayout::default()
        };
        assert!(matches!(
            layout.to_pixels(),
            Err(LayoutError::QrBelowCanvas { .. })
        ));

        let px = PixelLayout {
            caption_gap_px: u32::MAX,
            ..PhysicalLayout::default().to_pixels().unwrap()
        };
        assert!(matches!(
            px.check_caption_fits(u32::MAX),
            Err(LayoutError::CaptionOverflow { .. })
        ));
    }

    #[test]
    fn caption_fit_check() {
        let px = PhysicalLayout::default().to_pixels().unwrap();
        assert!(px.check_caption_fits(90).is_ok());
        assert!(px.check_caption_fits(944 - 551).is_ok());
        assert_eq!(
            px.check_caption_fits(600),
            Err(LayoutError::CaptionOverflow {
                needed_px: 1151,
                canvas_px: 944
            })
        );
    }
}
