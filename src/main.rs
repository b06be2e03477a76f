//! Phone Photo Copier - CLI Entry Point
//!
//! Copies photos that haven't been copied yet from a connected iPhone to a
//! local directory, using the Windows shell namespace.
//!
//! This binary is a thin wrapper around the library, handling argument parsing,
//! logging setup, and running the copy.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::info;
use phone_photo_copier::cli::{self, Args, DualWriter};
use phone_photo_copier::core::config::Config;
use std::fs::OpenOptions;
use std::io::Write;

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match args.config {
        Some(ref config_path) => match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    // Apply CLI overrides to config
    cli::apply_args(&args, &mut config);

    // Initialize logger
    let log_level = cli::log_level(&config.logging.level);

    if config.logging.log_to_file {
        // Set up logging to both console and file
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.logging.log_file)
            .with_context(|| {
                format!(
                    "Failed to open log file '{}'",
                    config.logging.log_file.display()
                )
            })?;

        Builder::new()
            .filter_level(log_level)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} {} {}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .target(env_logger::Target::Pipe(Box::new(DualWriter {
                console: std::io::stderr(),
                file: log_file,
            })))
            .init();

        info!("Logging to file: {}", config.logging.log_file.display());
    } else {
        Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
            .init();
    }

    info!("{} v{}", phone_photo_copier::NAME, phone_photo_copier::VERSION);

    cli::run_command(&args, &config)?;

    Ok(())
}
