//! Command-line entry point.

use clap::Parser;

use ventil_qr::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    ventil_qr::init_tracing(cli.verbose);
    ventil_qr::load_dotenv();

    println!("{}", "=".repeat(60));
    println!("Valve QR label generator");
    println!("{}", "=".repeat(60));
    println!();

    ventil_qr::run(cli).await
}
