//! Image file encoding for finished labels.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use tracing::debug;

/// JPEG quality used for print output.
pub const JPEG_QUALITY: u8 = 95;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Output codec for label files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Png,
    #[default]
    Jpeg,
}

impl OutputFormat {
    /// File extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
        }
    }

    /// Format named by the file extension of `path`, if it is a known one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(format!("unsupported output format '{other}' (expected png or jpeg)")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        })
    }
}

/// Encode `img` and write it to `path`, replacing any existing file.
///
/// JPEG output carries `dpi` as its JFIF pixel density.
pub fn save_label(
    img: &RgbImage,
    path: &Path,
    format: OutputFormat,
    dpi: u32,
) -> Result<(), EncodeError> {
    let io_err = |source| EncodeError::Io {
        path: path.display().to_string(),
        source,
    };
    let image_err = |source| EncodeError::Image {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let (w, h) = img.dimensions();

    match format {
        OutputFormat::Png => PngEncoder::new(&mut writer)
            .write_image(img.as_raw(), w, h, ExtendedColorType::Rgb8)
            .map_err(image_err)?,
        OutputFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            let density = u16::try_from(dpi).unwrap_or(u16::MAX);
            encoder.set_pixel_density(PixelDensity::dpi(density));
            encoder
                .write_image(img.as_raw(), w, h, ExtendedColorType::Rgb8)
                .map_err(image_err)?;
        }
    }
    writer.flush().map_err(io_err)?;

    debug!(path = %path.display(), %format, w, h, "Saved label");
    Ok(())
}
