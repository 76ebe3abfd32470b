use std::process::ExitCode;

use clap::Parser;

use cogito::cli::{self, Cli};
use cogito::config::AppConfig;
use cogito::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = telemetry::init(&config.server) {
        eprintln!("Failed to initialise logging: {e}");
    }

    match cli::run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
