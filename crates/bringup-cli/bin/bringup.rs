//! Bringup binary entry point.
//!
//! This is a thin wrapper around the bringup-cli library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Validates configuration
//! 4. Runs the command

use anyhow::Result;
use bringup_cli::Config;

fn main() -> Result<()> {
    let config = Config::from_args();

    // Logs go to stderr so stdout stays clean for listings
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    config.validate()?;

    let stdout = std::io::stdout();
    bringup_cli::run(&config, &mut stdout.lock())
}
