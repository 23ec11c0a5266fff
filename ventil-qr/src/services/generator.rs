//! Single-label generation: content, composition and file output.

use std::path::{Path, PathBuf};

use image::RgbImage;
use label_engine::{CaptionFont, EncodeError, PixelLayout, QrError, compose_label, save_label};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GeneratorConfig};
use crate::content;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Qr(#[from] QrError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Renders and writes valve labels with one fixed configuration.
///
/// Layout and caption font are resolved once at construction and shared
/// read-only by every generation call.
#[derive(Debug)]
pub struct LabelGenerator {
    config: GeneratorConfig,
    layout: PixelLayout,
    font: Option<CaptionFont>,
}

impl LabelGenerator {
    /// Validate `config`, compute the pixel layout and resolve the caption font.
    ///
    /// Fails when the caption at the requested font size would not fit
    /// between the QR block and the bottom edge of the label.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = config.layout.to_pixels()?;

        let font = match config.caption {
            Some(_) => {
                let font = CaptionFont::resolve(&config.font_candidates, config.font_size as f32);
                layout.check_caption_fits(font.line_height())?;
                Some(font)
            }
            None => None,
        };

        info!(
            width = layout.canvas_width_px,
            height = layout.canvas_height_px,
            qr_px = layout.qr_px,
            dpi = layout.dpi,
            caption = config.caption.is_some(),
            format = %config.format,
            "Label generator ready"
        );

        Ok(Self {
            config,
            layout,
            font,
        })
    }

    pub fn layout(&self) -> &PixelLayout {
        &self.layout
    }

    pub fn font(&self) -> Option<&CaptionFont> {
        self.font.as_ref()
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Default destination for `id` inside the output directory.
    pub fn output_path(&self, id: u32) -> PathBuf {
        self.config.output_dir.join(content::file_name(
            &self.config.file_prefix,
            id,
            self.config.format.extension(),
        ))
    }

    /// Compose the label image for `id` without touching the filesystem.
    pub fn render(&self, id: u32) -> Result<RgbImage, GenerateError> {
        let data = content::content_string(&self.config.content_prefix, id);
        let caption = self
            .config
            .caption
            .zip(self.font.as_ref())
            .map(|(style, font)| (style.caption(id), font));

        if let Some((text, font)) = &caption {
            let width = font.measure(text);
            if width > self.layout.canvas_width_px {
                warn!(
                    id,
                    width,
                    canvas = self.layout.canvas_width_px,
                    "Caption is wider than the label and will be clipped"
                );
            }
        }

        let img = compose_label(
            &data,
            caption.as_ref().map(|(text, font)| (text.as_str(), *font)),
            &self.layout,
        )?;
        Ok(img)
    }

    /// Generate the label for `id` at its default path.
    pub fn generate(&self, id: u32) -> Result<PathBuf, GenerateError> {
        self.generate_to(id, &self.output_path(id))
    }

    /// Generate the label for `id` at `path`, creating parent directories and
    /// replacing any existing file.
    pub fn generate_to(&self, id: u32, path: &Path) -> Result<PathBuf, GenerateError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| GenerateError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let img = self.render(id)?;
        save_label(&img, path, self.config.format, self.layout.dpi)?;

        debug!(id, path = %path.display(), "Label written");
        Ok(path.to_path_buf())
    }
}
