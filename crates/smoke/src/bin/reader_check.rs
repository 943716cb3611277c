use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use ui_smoke::{checks::reader, logging, screenshot};

/// Smoke-check that the reader page renders non-empty reading text, then
/// record a screenshot. Assumes the server is already running.
#[derive(Parser, Debug)]
#[command(name = "reader-check", version)]
struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Address of the running app under test
    #[arg(long, default_value = reader::DEFAULT_BASE_URL)]
    base_url: String,

    /// Where to write the full-page screenshot
    #[arg(long, default_value = screenshot::DEFAULT_PATH)]
    screenshot: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = reader::run(&cli.base_url, &cli.screenshot).await {
        error!(target = "smoke", error = %err, "reader check failed");
        std::process::exit(1);
    }
}
