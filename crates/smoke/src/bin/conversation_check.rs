use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use ui_smoke::{checks::conversation, logging, screenshot};

/// Smoke-check the conversation list and the selection-triggered
/// vocabulary panel. Assumes the dev server is already running.
#[derive(Parser, Debug)]
#[command(name = "conversation-check", version)]
struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Address of the running app under test
    #[arg(long, default_value = conversation::DEFAULT_BASE_URL)]
    base_url: String,

    /// Where to write the full-page screenshot
    #[arg(long, default_value = screenshot::DEFAULT_PATH)]
    screenshot: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = conversation::run(&cli.base_url, &cli.screenshot).await {
        error!(target = "smoke", error = %err, "conversation check failed");
        std::process::exit(1);
    }
}
