//! Caption font resolution with a never-failing fallback chain.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use tracing::{debug, info, warn};

use crate::bitmap_font::BitmapFont;
use crate::text;

/// Font used to draw captions at a fixed pixel size.
pub enum CaptionFont {
    Outline {
        font: FontVec,
        scale: PxScale,
        source: PathBuf,
    },
    Builtin(BitmapFont),
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { scale, source, .. } => f
                .debug_struct("Outline")
                .field("size", &scale.y)
                .field("source", source)
                .finish(),
            Self::Builtin(font) => f.debug_tuple("Builtin").field(font).finish(),
        }
    }
}

impl CaptionFont {
    /// Try each candidate in order; fall back to the built-in bitmap font.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P], size_px: f32) -> Self {
        for path in candidates {
            let path = path.as_ref();
            match load_outline(path) {
                Ok(font) => {
                    info!(path = %path.display(), size = size_px, "Using caption font");
                    return Self::Outline {
                        font,
                        scale: PxScale::from(size_px),
                        source: path.to_path_buf(),
                    };
                }
                Err(reason) => debug!(path = %path.display(), %reason, "Skipping font candidate"),
            }
        }
        warn!(
            candidates = candidates.len(),
            "No usable caption font found, using built-in bitmap font"
        );
        Self::builtin(size_px)
    }

    pub fn builtin(size_px: f32) -> Self {
        Self::Builtin(BitmapFont::for_size(size_px))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    pub fn line_height(&self) -> u32 {
        match self {
            Self::Outline { font, scale, .. } => text::line_height(font, *scale),
            Self::Builtin(font) => font.line_height(),
        }
    }

    pub fn measure(&self, caption: &str) -> u32 {
        match self {
            Self::Outline { font, scale, .. } => text::measure_text_width(font, *scale, caption),
            Self::Builtin(font) => font.measure(caption),
        }
    }

    /// Draw `caption` horizontally centered with its top at `y`.
    pub fn draw_centered(&self, img: &mut RgbImage, y: u32, caption: &str, color: Rgb<u8>) {
        match self {
            Self::Outline { font, scale, .. } => {
                text::draw_centered_text(img, font, *scale, y as i32, caption, color)
            }
            Self::Builtin(font) => font.draw_centered(img, i64::from(y), caption, color),
        }
    }
}

fn load_outline(path: &Path) -> Result<FontVec, String> {
    let data = std::fs::read(path).map_err(|e| e.to_string())?;
    FontVec::try_from_vec(data).map_err(|_| "not a TTF/OTF font".to_string())
}

/// Bold system fonts tried before the platform defaults.
pub fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\arialbd.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
            "C:\\Windows\\Fonts\\segoeui.ttf",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        ]
    }
}
