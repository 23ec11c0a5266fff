use std::path::PathBuf;

use clap::Parser;
use label_engine::OutputFormat;

use crate::config::defaults::{DEFAULT_END, DEFAULT_START, MAX_WORKERS};
use crate::content::CaptionStyle;

#[derive(Parser, Debug)]
#[command(name = "ventil-qr", version)]
#[command(about = "Generate printable QR-code labels for numbered valves", long_about = None)]
pub struct Cli {
    /// First valve number
    #[arg(long, default_value_t = DEFAULT_START)]
    pub start: u32,

    /// Last valve number (inclusive)
    #[arg(long, default_value_t = DEFAULT_END)]
    pub end: u32,

    /// Output directory [default: QRCodes]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not draw the human-readable number under the QR code
    #[arg(long)]
    pub no_label: bool,

    /// Generate a single valve number instead of a range
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub single: Option<u32>,

    /// Explicit file path for --single
    #[arg(long, requires = "single")]
    pub output_path: Option<PathBuf>,

    /// Caption font size in pixels (asked interactively when omitted)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub font_size: Option<u32>,

    /// Output image format: png or jpeg [default: jpeg]
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// File name prefix [default: Ventil_]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Caption wording: number (7) or labeled (Ventil 007)
    #[arg(long, default_value = "number")]
    pub caption: CaptionStyle,

    /// Preferred caption font file (TTF/OTF)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Print resolution in dots per inch [default: 300]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2400))]
    pub dpi: Option<u32>,

    /// Number of labels rendered in parallel
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u32).range(1..=MAX_WORKERS as i64))]
    pub workers: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_cover_full_range() {
        let cli = Cli::try_parse_from(["ventil-qr"]).unwrap();
        assert_eq!((cli.start, cli.end), (1, 199));
        assert!(cli.single.is_none());
        assert!(!cli.no_label);
        assert_eq!(cli.caption, CaptionStyle::Number);
    }

    #[test]
    fn parses_single_mode() {
        let cli = Cli::try_parse_from([
            "ventil-qr",
            "--single",
            "42",
            "--output-path",
            "out/42.png",
            "--format",
            "png",
            "--font-size",
            "96",
        ])
        .unwrap();
        assert_eq!(cli.single, Some(42));
        assert_eq!(cli.output_path, Some(PathBuf::from("out/42.png")));
        assert_eq!(cli.format, Some(OutputFormat::Png));
        assert_eq!(cli.font_size, Some(96));
    }

    #[test]
    fn rejects_out_of_range_font_size() {
        assert!(Cli::try_parse_from(["ventil-qr", "--font-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["ventil-qr", "--font-size", "501"]).is_err());
    }

    #[test]
    fn output_path_needs_single() {
        assert!(Cli::try_parse_from(["ventil-qr", "--output-path", "x.png"]).is_err());
    }
}
