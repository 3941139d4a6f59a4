//! Sunblock CLI - find the next block of sunshine at your location
//!
//! Fetches the Open-Meteo hourly forecast (or reads a saved one), then prints
//! the start and mean temperature of the first run of N sunny daylight hours.

use std::process::ExitCode;

use clap::Parser;

use sunblock::app;
use sunblock::cli::{Cli, RunConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env = env_logger::Env::default().default_filter_or(cli.log_level.as_str());
    env_logger::init_from_env(env);

    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Running with {:?}", config);

    match app::run(&config).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
