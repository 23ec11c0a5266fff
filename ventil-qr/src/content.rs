//! Deterministic strings derived from a valve number.

use std::str::FromStr;

/// Digits every valve number is zero-padded to.
pub const ID_WIDTH: usize = 3;

/// Text encoded in the QR symbol, e.g. `VENTIL-007`.
pub fn content_string(prefix: &str, id: u32) -> String {
    format!("{prefix}{id:0width$}", width = ID_WIDTH)
}

/// Output file name, e.g. `Ventil_007.jpg`.
pub fn file_name(prefix: &str, id: u32, extension: &str) -> String {
    format!("{prefix}{id:0width$}{extension}", width = ID_WIDTH)
}

/// How the human-readable caption under the symbol is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionStyle {
    /// Plain number: `7`.
    #[default]
    Number,
    /// Padded with a label: `Ventil 007`.
    Labeled,
}

impl CaptionStyle {
    pub fn caption(&self, id: u32) -> String {
        match self {
            Self::Number => id.to_string(),
            Self::Labeled => format!("Ventil {id:0width$}", width = ID_WIDTH),
        }
    }
}

impl FromStr for CaptionStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" => Ok(Self::Number),
            "labeled" | "labelled" => Ok(Self::Labeled),
            other => Err(format!(
                "unknown caption style '{other}' (expected number or labeled)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_zero_padded() {
        assert_eq!(content_string("VENTIL-", 7), "VENTIL-007");
        assert_eq!(content_string("VENTIL-", 150), "VENTIL-150");
        assert_eq!(content_string("VENTIL-", 1), "VENTIL-001");
    }

    #[test]
    fn wide_ids_are_not_truncated() {
        assert_eq!(content_string("VENTIL-", 1234), "VENTIL-1234");
    }

    #[test]
    fn file_names_follow_pattern() {
        assert_eq!(file_name("Ventil_", 7, ".jpg"), "Ventil_007.jpg");
        assert_eq!(file_name("", 199, ".png"), "199.png");
    }

    #[test]
    fn caption_styles() {
        assert_eq!(CaptionStyle::Number.caption(7), "7");
        assert_eq!(CaptionStyle::Labeled.caption(7), "Ventil 007");
        assert_eq!("Labeled".parse::<CaptionStyle>(), Ok(CaptionStyle::Labeled));
        assert!("fancy".parse::<CaptionStyle>().is_err());
    }
}
