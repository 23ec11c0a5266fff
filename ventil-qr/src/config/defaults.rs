//! Compiled-in defaults and environment variable names.

pub const DEFAULT_START: u32 = 1;
pub const DEFAULT_END: u32 = 199;
pub const DEFAULT_OUTPUT_DIR: &str = "QRCodes";

pub const DEFAULT_FONT_SIZE: u32 = 72;
pub const MIN_FONT_SIZE: u32 = 1;
pub const MAX_FONT_SIZE: u32 = 500;

pub const DEFAULT_CONTENT_PREFIX: &str = "VENTIL-";
pub const DEFAULT_FILE_PREFIX: &str = "Ventil_";

/// Upper bound for the automatically chosen worker count.
pub const MAX_DEFAULT_WORKERS: usize = 8;
pub const MAX_WORKERS: usize = 64;

pub const ENV_OUTPUT_DIR: &str = "VENTIL_QR_OUTPUT_DIR";
pub const ENV_FONT: &str = "VENTIL_QR_FONT";
pub const ENV_FONT_SIZE: &str = "VENTIL_QR_FONT_SIZE";
pub const ENV_DPI: &str = "VENTIL_QR_DPI";
pub const ENV_FORMAT: &str = "VENTIL_QR_FORMAT";
pub const ENV_PREFIX: &str = "VENTIL_QR_PREFIX";
pub const ENV_WORKERS: &str = "VENTIL_QR_WORKERS";

/// Worker count used when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_DEFAULT_WORKERS)
}
