pub mod cli;
pub mod config;
pub mod content;
pub mod prompt;
pub mod services;

use std::io::IsTerminal;
use std::sync::Arc;

use label_engine::OutputFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::defaults::ENV_FONT_SIZE;
use config::{ConfigError, GeneratorConfig, validation};
use services::batch;
use services::generator::LabelGenerator;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ventil_qr=debug,label_engine=debug,info"
    } else {
        "ventil_qr=info,label_engine=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Layer CLI flags over the environment-derived configuration.
pub fn apply_cli(config: &mut GeneratorConfig, cli: &Cli) -> Result<(), ConfigError> {
    if let Some(dir) = &cli.output {
        config.output_dir = dir.clone();
    }
    config.caption = (!cli.no_label).then_some(cli.caption);
    if let Some(size) = cli.font_size {
        config.font_size = size;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(path) = &cli.output_path {
        match (OutputFormat::from_path(path), cli.format) {
            (Some(inferred), None) => config.format = inferred,
            (Some(inferred), Some(format)) if inferred != format => tracing::warn!(
                path = %path.display(),
                %format,
                "Output path extension does not match --format; writing {format}"
            ),
            _ => {}
        }
    }
    if let Some(prefix) = &cli.prefix {
        validation::validate_file_prefix(prefix)
            .map_err(|reason| ConfigError::invalid("--prefix", reason))?;
        config.file_prefix = prefix.clone();
    }
    if let Some(font) = &cli.font {
        config.prefer_font(font.clone());
    }
    if let Some(dpi) = cli.dpi {
        config.layout.dpi = dpi;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers as usize;
    }
    Ok(())
}

/// Whether the caption size was given on the command line or in the environment.
fn font_size_supplied(cli_size: Option<u32>, env_value: Option<&str>) -> bool {
    cli_size.is_some() || config::is_supplied(env_value)
}

/// Run one invocation: a single label or a whole range.
///
/// Per-item failures in range mode are reported in the summary and do not
/// make this return an error; a failed single label does.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::from_env()?;
    apply_cli(&mut config, &cli)?;

    let env_font_size = std::env::var(ENV_FONT_SIZE).ok();
    let font_size_given = font_size_supplied(cli.font_size, env_font_size.as_deref());
    if config.caption.is_some() && !font_size_given && std::io::stdin().is_terminal() {
        let stdin = std::io::stdin();
        config.font_size = prompt::ask_font_size(&mut stdin.lock(), &mut std::io::stdout())?;
        println!("Using font size: {}", config.font_size);
        println!();
    }

    if let Some(id) = cli.single {
        let generator = LabelGenerator::new(config)?;
        println!("Generating QR code for valve {id}...");
        let path = match &cli.output_path {
            Some(path) => generator.generate_to(id, path)?,
            None => generator.generate(id)?,
        };
        println!("QR code saved: {}", path.display());
        return Ok(());
    }

    validation::validate_range(cli.start, cli.end)
        .map_err(|reason| ConfigError::invalid("--start/--end", reason))?;

    let workers = config.workers;
    let mm = (config.layout.canvas_width_mm, config.layout.canvas_height_mm);
    let generator = Arc::new(LabelGenerator::new(config)?);
    let layout = *generator.layout();

    println!(
        "Generating QR codes for valves {} to {}...",
        cli.start, cli.end
    );
    println!("Output directory: {}", generator.output_dir().display());
    println!(
        "Size: {}x{}mm ({}x{}px at {} DPI)",
        mm.0, mm.1, layout.canvas_width_px, layout.canvas_height_px, layout.dpi
    );
    println!("{}", "-".repeat(60));

    let summary = batch::run_batch(generator, cli.start..=cli.end, workers).await;
    summary.print_report();
    Ok(())
}
