//! Interactive caption font-size prompt.

use std::io::{self, BufRead, Write};

use crate::config::defaults::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FontSizeInputError {
    #[error("Please enter a valid number.")]
    NotANumber,
    #[error("Please enter a number between 1 and 500.")]
    OutOfRange,
}

/// Parse one line of prompt input. Empty input selects the default.
pub fn parse_font_size(input: &str) -> Result<u32, FontSizeInputError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_FONT_SIZE);
    }
    let value: i64 = input.parse().map_err(|_| FontSizeInputError::NotANumber)?;
    if value < i64::from(MIN_FONT_SIZE) || value > i64::from(MAX_FONT_SIZE) {
        return Err(FontSizeInputError::OutOfRange);
    }
    Ok(value as u32)
}

/// Ask for the caption font size until a valid answer is given.
///
/// End of input selects the default so a closed stdin cannot loop forever.
pub fn ask_font_size<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<u32> {
    writeln!(output, "How large should the number under the QR code be?")?;
    writeln!(
        output,
        "(Default: {DEFAULT_FONT_SIZE}, press Enter to keep the default)"
    )?;

    let mut line = String::new();
    loop {
        write!(output, "Font size: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(DEFAULT_FONT_SIZE);
        }

        match parse_font_size(&line) {
            Ok(size) => return Ok(size),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}
