//! Setting value validation.

use super::defaults::{
    ENV_DPI, ENV_FONT_SIZE, ENV_FORMAT, ENV_PREFIX, ENV_WORKERS, MAX_FONT_SIZE, MAX_WORKERS,
    MIN_FONT_SIZE,
};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        ENV_FONT_SIZE => validate_int_range(value, MIN_FONT_SIZE as i64, MAX_FONT_SIZE as i64)?,
        ENV_DPI => validate_int_range(value, 1, 2400)?,
        ENV_WORKERS => validate_int_range(value, 1, MAX_WORKERS as i64)?,
        ENV_FORMAT => {
            if !["png", "jpg", "jpeg"].contains(&value.trim().to_ascii_lowercase().as_str()) {
                return Err("must be 'png' or 'jpeg'".into());
            }
        }
        ENV_PREFIX => validate_file_prefix(value)?,
        _ => {}
    }
    Ok(())
}

/// A file prefix must not escape the output directory.
pub fn validate_file_prefix(value: &str) -> Result<(), String> {
    if value.contains(['/', '\\']) || value.contains("..") {
        return Err("must not contain path separators or '..'".into());
    }
    Ok(())
}

pub fn validate_font_size(size: u32) -> Result<(), String> {
    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
        return Err(format!(
            "font size must be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE}"
        ));
    }
    Ok(())
}

pub fn validate_range(start: u32, end: u32) -> Result<(), String> {
    if start > end {
        return Err(format!("start ({start}) must not be greater than end ({end})"));
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.trim().parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
