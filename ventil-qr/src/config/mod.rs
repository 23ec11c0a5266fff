//! Generator configuration: compiled defaults, `.env` / environment
//! overrides and validation. CLI flags are applied on top by the caller.

pub mod defaults;
pub mod validation;

use std::path::PathBuf;

use label_engine::font::system_font_candidates;
use label_engine::{LayoutError, OutputFormat, PhysicalLayout};

use crate::content::CaptionStyle;
use defaults::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
    #[error("invalid label layout: {0}")]
    Layout(#[from] LayoutError),
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// A setting counts as supplied only when it is not blank.
pub fn is_supplied(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Everything the label generator needs, fixed for one run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub layout: PhysicalLayout,
    pub font_size: u32,
    /// `None` when labels are generated without a caption.
    pub caption: Option<CaptionStyle>,
    pub content_prefix: String,
    pub file_prefix: String,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
    /// Caption fonts in preference order; the built-in font is used last.
    pub font_candidates: Vec<PathBuf>,
    pub workers: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            layout: PhysicalLayout::default(),
            font_size: DEFAULT_FONT_SIZE,
            caption: Some(CaptionStyle::default()),
            content_prefix: DEFAULT_CONTENT_PREFIX.into(),
            file_prefix: DEFAULT_FILE_PREFIX.into(),
            format: OutputFormat::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            font_candidates: system_font_candidates().iter().map(PathBuf::from).collect(),
            workers: default_workers(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults overridden by `VENTIL_QR_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(v) if is_supplied(Some(&v)) => {
                    validation::validate_setting(key, &v)
                        .map_err(|reason| ConfigError::invalid(key, reason))?;
                    Ok(Some(v.trim().to_string()))
                }
                _ => Ok(None),
            }
        };

        if let Some(dir) = get(ENV_OUTPUT_DIR)? {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(font) = get(ENV_FONT)? {
            config.prefer_font(PathBuf::from(font));
        }
        if let Some(size) = get(ENV_FONT_SIZE)? {
            config.font_size = parse(ENV_FONT_SIZE, &size)?;
        }
        if let Some(dpi) = get(ENV_DPI)? {
            config.layout.dpi = parse(ENV_DPI, &dpi)?;
        }
        if let Some(format) = get(ENV_FORMAT)? {
            config.format = format
                .parse()
                .map_err(|reason: String| ConfigError::invalid(ENV_FORMAT, reason))?;
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            // An empty prefix is meaningful here: bare `007.jpg` names.
            validation::validate_file_prefix(&prefix)
                .map_err(|reason| ConfigError::invalid(ENV_PREFIX, reason))?;
            config.file_prefix = prefix;
        }
        if let Some(workers) = get(ENV_WORKERS)? {
            config.workers = parse(ENV_WORKERS, &workers)?;
        }

        Ok(config)
    }

    /// Put `path` at the front of the caption font chain.
    pub fn prefer_font(&mut self, path: PathBuf) {
        self.font_candidates.retain(|p| p != &path);
        self.font_candidates.insert(0, path);
    }

    /// Check the settings that are not covered by layout validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_font_size(self.font_size)
            .map_err(|reason| ConfigError::invalid("font_size", reason))?;
        validation::validate_file_prefix(&self.file_prefix)
            .map_err(|reason| ConfigError::invalid("file_prefix", reason))?;
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::invalid(
                "workers",
                format!("must be between 1 and {MAX_WORKERS}"),
            ));
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{value}'")))
}
